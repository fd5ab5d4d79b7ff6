//! # combiner-foundation
//!
//! Foundation layer for the reducer combiner:
//! - Core: 상태/액션 타입과 Reducer 핸들
//! - Combine: key → reducer mapping을 하나의 record reducer로 합치는 primitive
//! - Config: 통합 설정 (CombinerConfig, StoreConfig)
//! - Storage: JsonStore (설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  { counter: Reducer, stack: Reducer, ... }              │
//! │                     │                                   │
//! │                     ▼                                   │
//! │          combine_reducers (record reducer)              │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   (state, action) -> { counter: .., stack: .. }         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod combine;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core (핵심 타입)
// ============================================================================
pub use core::{
    empty_record, Action, Reducer, State, INIT_ACTION_TYPE, INTERNAL_ACTION_PREFIX,
    REPLACE_ACTION_TYPE, VALUE_FIELD,
};

// ============================================================================
// Combine (조합 primitive)
// ============================================================================
pub use combine::{combine_reducers, combine_reducers_with, CombineOptions, ReducerMap};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{CombinerConfig, StoreConfig, COMBINER_CONFIG_FILE, DEFAULT_STORE_NAME};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
