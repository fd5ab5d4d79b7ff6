//! Combine - 여러 reducer를 하나의 record reducer로 합치기
//!
//! key → reducer mapping을 받아, 같은 key 구조의 record를 다루는 reducer를
//! 만듭니다. 각 reducer는 `state[key]` slot만 보고 다음 값을 계산합니다.
//!
//! ```text
//!   { counter: 1, stack: ["a"] }  + action
//!        │            │
//!        ▼            ▼
//!   counter(1, a)  stack(["a"], a)
//!        │            │
//!        └─────┬──────┘
//!              ▼
//!   { counter: .., stack: .. }   (mapping에 없는 key는 버려짐)
//! ```

use crate::core::{Action, Reducer, State};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::warn;

/// key 순서를 보존하는 reducer mapping
pub type ReducerMap = IndexMap<String, Reducer>;

// ============================================================================
// CombineOptions
// ============================================================================

/// 조합 옵션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombineOptions {
    /// mapping에 없는 state key 경고 (key당 1회)
    #[serde(default = "default_warn_unexpected_keys")]
    pub warn_unexpected_keys: bool,
}

fn default_warn_unexpected_keys() -> bool {
    true
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            warn_unexpected_keys: default_warn_unexpected_keys(),
        }
    }
}

impl CombineOptions {
    /// 경고 없는 조합
    pub fn quiet() -> Self {
        Self {
            warn_unexpected_keys: false,
        }
    }
}

// ============================================================================
// combine_reducers
// ============================================================================

/// 기본 옵션으로 mapping을 하나의 reducer로 합침
pub fn combine_reducers(reducers: ReducerMap) -> Reducer {
    combine_reducers_with(reducers, &CombineOptions::default())
}

/// mapping을 하나의 reducer로 합침
///
/// - 정의되지 않았거나 object가 아닌 state는 빈 record로 취급
/// - 각 slot은 해당 key의 reducer 결과로 채워짐
/// - mapping에 없는 key는 결과에서 제거됨
pub fn combine_reducers_with(reducers: ReducerMap, options: &CombineOptions) -> Reducer {
    let warn_unexpected = options.warn_unexpected_keys;
    let warned: RefCell<HashSet<String>> = RefCell::new(HashSet::new());

    Reducer::new(move |state, action| {
        let previous = record_of(state);

        if warn_unexpected && !action.is_replace() {
            if let Some(record) = previous {
                warn_unexpected_keys(record, &reducers, action, &warned);
            }
        }

        let mut next = Map::new();
        for (key, reducer) in &reducers {
            let slot = previous.and_then(|record| record.get(key));
            next.insert(key.clone(), reducer.reduce(slot, action));
        }

        Value::Object(next)
    })
}

fn record_of(state: Option<&State>) -> Option<&Map<String, Value>> {
    match state {
        Some(Value::Object(record)) => Some(record),
        Some(other) => {
            warn!(
                "Previous state has unexpected type '{}', expected an object record",
                json_type_name(other)
            );
            None
        }
        None => None,
    }
}

fn warn_unexpected_keys(
    record: &Map<String, Value>,
    reducers: &ReducerMap,
    action: &Action,
    warned: &RefCell<HashSet<String>>,
) {
    let mut warned = warned.borrow_mut();
    for key in record.keys() {
        if reducers.contains_key(key) || warned.contains(key) {
            continue;
        }
        warn!(
            "Unexpected key '{}' in state while handling '{}'; expected one of {:?}, it will be ignored",
            key,
            action,
            reducers.keys().collect::<Vec<_>>()
        );
        warned.insert(key.clone());
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
