//! Runtime - 조합된 reducer를 실행하는 쪽
//!
//! - `store.rs`: 단일 스레드 Store (dispatch / replace_reducer / subscribe)
//! - `controller.rs`: 루트 combiner 변경 → store reducer 교체

mod controller;
mod store;

pub use controller::StoreController;
pub use store::{Listener, ListenerId, Store, WeakStore};
