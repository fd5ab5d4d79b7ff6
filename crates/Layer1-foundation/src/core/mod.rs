//! Core Module - 핵심 타입
//!
//! ## 타입 계층
//!
//! - `types.rs`: 데이터 타입 (State, Action)
//! - `reducer.rs`: 상태 전이 함수 핸들 (Reducer)
//!
//! ```text
//!   prev state ──┐
//!                ├──► Reducer ──► next state
//!   action ──────┘
//! ```

pub mod reducer;
pub mod types;

// ============================================================================
// Types - 데이터 타입 (types.rs)
// ============================================================================

pub use types::{
    empty_record, Action, State, INIT_ACTION_TYPE, INTERNAL_ACTION_PREFIX, REPLACE_ACTION_TYPE,
    VALUE_FIELD,
};

// ============================================================================
// Reducer (reducer.rs)
// ============================================================================

pub use reducer::Reducer;
