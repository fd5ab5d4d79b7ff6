//! Config - 통합 설정 관리
//!
//! - `combiner.rs` - CombinerConfig 통합 설정 (Store + 조합 옵션)

mod combiner;

pub use combiner::{CombinerConfig, StoreConfig, COMBINER_CONFIG_FILE, DEFAULT_STORE_NAME};
