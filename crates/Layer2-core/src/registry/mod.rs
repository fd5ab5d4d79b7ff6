//! # Reducer Registry
//!
//! 런타임에 추가/제거/교체 가능한 reducer 트리
//!
//! ## 설계 원칙
//!
//! 1. **Interior Mutability**: `Rc<RefCell<..>>` 핸들, 단일 스레드 동기 실행
//! 2. **Tree**: 항목은 leaf reducer 또는 하위 `ReducerCombiner`
//! 3. **Single Handler**: combiner마다 상위 통지 대상은 하나뿐
//! 4. **No Back-pointer**: 하위 combiner는 부모의 통지 루틴만 보관
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  root: ReducerCombiner            update_handler ──► sink │
//! │  ┌──────────┬──────────┬────────────────────────┐        │
//! │  │ counter  │ stack    │ child: ReducerCombiner │        │
//! │  │ (leaf)   │ (leaf)   │  update_handler ───────┼─► root.notifier
//! │  └──────────┴──────────┴────────────────────────┘        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용 예시
//!
//! ```ignore
//! use combiner_core::{ReducerCombiner, Store, StoreController};
//!
//! let root = ReducerCombiner::from_entries([("counter", counter())]);
//! let store = Store::new(root.combine_reducers(), None);
//! let _controller = StoreController::bind(&root, &store)?;
//!
//! // 변경 시 store reducer가 자동으로 교체됨
//! root.add_reducer("stack", stack())?;
//! store.dispatch(&Action::new("push").with_payload("a"))?;
//! ```

mod combiner;
mod entry;
mod handler;

pub use combiner::{EntryMap, ReducerCombiner, WeakReducerCombiner};
pub use entry::ReducerEntry;
pub use handler::{same_handler, update_handler, UpdateHandler};
