//! Error types for the reducer combiner
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Combiner 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Registry 관련
    // ========================================================================
    /// 이미 등록된 키로 `add_reducer` 호출 (mapping은 변경되지 않음)
    #[error("Already existing reducer: {key}")]
    DuplicateKey { key: String },

    // ========================================================================
    // Store 관련
    // ========================================================================
    /// reducer 실행 중 다시 dispatch 시도
    #[error("Reducers may not dispatch actions (while handling '{0}')")]
    ReentrantDispatch(String),

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 중복 키 에러 생성 헬퍼
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Error::DuplicateKey { key: key.into() }
    }

    /// 중복 키 에러인지 확인
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::DuplicateKey { .. })
    }

    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::DuplicateKey { .. } | Error::NotFound(_) | Error::InvalidInput(_)
        )
    }
}
