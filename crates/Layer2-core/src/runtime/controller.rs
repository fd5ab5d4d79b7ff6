//! Store Controller - combiner 변경 시 store reducer 자동 교체

use super::store::Store;
use crate::registry::{update_handler, ReducerCombiner};
use combiner_foundation::{CombineOptions, Result};
use tracing::{debug, error, trace};

/// 루트 combiner와 store를 연결
///
/// 연결되면 combiner 트리의 모든 변경이 `combine_reducers_with` →
/// `Store::replace_reducer`로 이어집니다. handler는 양쪽을 `Weak`으로만
/// 잡으므로 controller를 drop해도 연결은 유지되고, `unbind`로만 끊깁니다.
#[derive(Debug)]
pub struct StoreController {
    combiner: ReducerCombiner,
    store: Store,
    options: CombineOptions,
}

impl StoreController {
    /// 기본 옵션으로 연결
    pub fn bind(combiner: &ReducerCombiner, store: &Store) -> Result<Self> {
        Self::bind_with(combiner, store, CombineOptions::default())
    }

    /// 연결 후 현재 트리를 즉시 설치
    pub fn bind_with(combiner: &ReducerCombiner, store: &Store, options: CombineOptions) -> Result<Self> {
        store.replace_reducer(combiner.combine_reducers_with(&options))?;

        let weak_combiner = combiner.downgrade();
        let weak_store = store.downgrade();
        let handler_options = options.clone();
        combiner.set_update_handler(update_handler(move || {
            let (Some(combiner), Some(store)) = (weak_combiner.upgrade(), weak_store.upgrade()) else {
                trace!("Combiner or store dropped, skipping reducer refresh");
                return;
            };
            if let Err(e) = store.replace_reducer(combiner.combine_reducers_with(&handler_options)) {
                error!("[{}] Failed to install recombined reducer: {}", store.name(), e);
            }
        }));

        debug!("[{}] Bound to combiner '{}'", store.name(), combiner.name());

        Ok(Self {
            combiner: combiner.clone(),
            store: store.clone(),
            options,
        })
    }

    /// 현재 트리를 다시 조합해서 설치
    pub fn refresh(&self) -> Result<()> {
        self.store
            .replace_reducer(self.combiner.combine_reducers_with(&self.options))
    }

    /// 연결 해제 (combiner의 update handler 제거)
    pub fn unbind(self) {
        self.combiner.delete_update_handler();
        debug!("[{}] Unbound from combiner '{}'", self.store.name(), self.combiner.name());
    }

    pub fn combiner(&self) -> &ReducerCombiner {
        &self.combiner
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn options(&self) -> &CombineOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combiner_foundation::{Action, Reducer};
    use serde_json::json;

    fn counter() -> Reducer {
        Reducer::with_default(json!(0), |state, action| {
            if action.is("increment") {
                json!(state.as_i64().unwrap_or(0) + 1)
            } else {
                state
            }
        })
    }

    #[test]
    fn test_bind_installs_current_tree() {
        let root = ReducerCombiner::from_entries([("counter", counter())]);
        let store = Store::new(Reducer::passthrough(), Some(json!({})));

        let controller = StoreController::bind(&root, &store).unwrap();
        assert_eq!(store.get_state(), json!({"counter": 0}));
        assert!(root.has_update_handler());
        assert!(controller.options().warn_unexpected_keys);
    }

    #[test]
    fn test_mutation_reinstalls_reducer() {
        let root = ReducerCombiner::empty();
        let store = Store::new(Reducer::passthrough(), Some(json!({})));
        let _controller = StoreController::bind(&root, &store).unwrap();

        root.add_reducer("counter", counter()).unwrap();
        assert_eq!(store.get_state(), json!({"counter": 0}));

        store.dispatch(&Action::new("increment")).unwrap();
        assert_eq!(store.get_state(), json!({"counter": 1}));
    }

    #[test]
    fn test_unbind_stops_refresh() {
        let root = ReducerCombiner::empty();
        let store = Store::new(Reducer::passthrough(), Some(json!({})));
        let controller = StoreController::bind(&root, &store).unwrap();

        controller.unbind();
        assert!(!root.has_update_handler());

        root.add_reducer("counter", counter()).unwrap();
        assert_eq!(store.get_state(), json!({}));
    }

    #[test]
    fn test_refresh_after_unwired_change() {
        let root = ReducerCombiner::empty();
        let store = Store::new(Reducer::passthrough(), Some(json!({})));
        let controller = StoreController::bind_with(&root, &store, CombineOptions::quiet()).unwrap();

        root.delete_update_handler();
        root.add_reducer("counter", counter()).unwrap();
        assert_eq!(store.get_state(), json!({}));

        controller.refresh().unwrap();
        assert_eq!(store.get_state(), json!({"counter": 0}));
    }

    #[test]
    fn test_dropped_store_is_ignored() {
        let root = ReducerCombiner::empty();
        let store = Store::new(Reducer::passthrough(), None);
        let controller = StoreController::bind(&root, &store).unwrap();
        drop(controller);
        drop(store);

        // handler는 남아 있지만 store가 없으므로 아무 일도 하지 않음
        root.add_reducer("counter", counter()).unwrap();
        assert!(root.has_update_handler());
    }
}
