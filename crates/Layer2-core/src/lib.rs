//! combiner-core: Reducer registry and store runtime
//!
//! Layer2 - registry 트리와 그것을 실행하는 store
//!
//! # 주요 모듈
//!
//! - `registry`: 변경 가능한 reducer 트리 (ReducerCombiner)
//! - `runtime`: Store, StoreController
//!
//! # 사용 예시
//!
//! ```ignore
//! use combiner_core::{ReducerCombiner, Store, StoreController};
//! use combiner_foundation::{Action, Reducer};
//!
//! let root = ReducerCombiner::from_entries([("counter", counter())]);
//! let store = Store::new(root.combine_reducers(), Some(json!({})));
//! let _controller = StoreController::bind(&root, &store)?;
//!
//! store.dispatch(&Action::new("increment"))?;
//!
//! // 런타임에 reducer 추가 - store reducer는 자동으로 교체됨
//! root.add_reducer("stack", stack())?;
//!
//! // 상태를 유지한 채 제거
//! root.remove_reducer("counter", true);
//! ```

pub mod registry;
pub mod runtime;

// Re-exports: Registry
pub use registry::{
    same_handler, update_handler, EntryMap, ReducerCombiner, ReducerEntry, UpdateHandler,
    WeakReducerCombiner,
};

// Re-exports: Runtime
pub use runtime::{Listener, ListenerId, Store, StoreController, WeakStore};

// Re-exports: Foundation
pub use combiner_foundation::{
    combine_reducers, empty_record, Action, CombineOptions, Error, Reducer, ReducerMap, Result,
    State,
};
