//! Core Types - 공용 타입 정의
//!
//! 모든 레이어에서 공통으로 사용하는 상태/액션 타입들

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// State - 상태 레코드
// ============================================================================

/// Reducer가 다루는 상태 값
///
/// 조합된 reducer는 항상 key별 slot을 가진 JSON object(record)를 다룹니다.
pub type State = Value;

/// 빈 레코드 (`{}`)
pub fn empty_record() -> State {
    Value::Object(Map::new())
}

// ============================================================================
// Action - 디스패치되는 액션
// ============================================================================

/// 내부 액션 타입 접두사
pub const INTERNAL_ACTION_PREFIX: &str = "@@combiner/";

/// Store 생성 시 초기 상태를 계산하기 위한 액션 타입
pub const INIT_ACTION_TYPE: &str = "@@combiner/INIT";

/// Reducer 교체 직후 새 slot의 기본 상태를 채우기 위한 액션 타입
pub const REPLACE_ACTION_TYPE: &str = "@@combiner/REPLACE";

/// `payload`가 없을 때 값으로 쓰는 필드 이름
pub const VALUE_FIELD: &str = "value";

static NULL: Value = Value::Null;

/// 디스패치 액션
///
/// 와이어 포맷은 `{"type": "...", "payload": ...}` 입니다. 그 밖의 필드
/// (`{"type": "push", "value": "a"}` 등)는 `extra`에 그대로 보존됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// 액션 타입
    #[serde(rename = "type")]
    pub action_type: String,

    /// 부가 데이터
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,

    /// 나머지 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Value::Null,
            extra: Map::new(),
        }
    }

    /// payload 설정
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    /// 추가 필드 설정
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// 추가 필드 조회
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// 액션이 운반하는 값: `payload`, 없으면 `value` 필드, 둘 다 없으면 null
    pub fn value(&self) -> &Value {
        if !self.payload.is_null() {
            return &self.payload;
        }
        self.field(VALUE_FIELD).unwrap_or(&NULL)
    }

    /// Store 초기화 액션
    pub fn init() -> Self {
        Self::new(INIT_ACTION_TYPE)
    }

    /// Reducer 교체 액션
    pub fn replace() -> Self {
        Self::new(REPLACE_ACTION_TYPE)
    }

    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    /// 내부 액션(`@@combiner/...`) 여부
    pub fn is_internal(&self) -> bool {
        self.action_type.starts_with(INTERNAL_ACTION_PREFIX)
    }

    pub fn is_replace(&self) -> bool {
        self.is(REPLACE_ACTION_TYPE)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.action_type)
    }
}
