//! Store - reducer를 실제로 실행하는 단일 스레드 상태 컨테이너
//!
//! registry는 dispatch를 하지 않습니다. Store가 현재 reducer로 액션을 처리하고,
//! reducer 교체 시 교체 액션을 dispatch해서 새 slot의 기본 상태를 채웁니다.

use combiner_foundation::{Action, Error, Reducer, Result, State, StoreConfig};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// dispatch 이후 호출되는 리스너
pub type Listener = Rc<dyn Fn()>;

// ============================================================================
// ListenerId
// ============================================================================

/// 리스너 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

// ============================================================================
// Store
// ============================================================================

struct StoreInner {
    name: String,
    state: RefCell<State>,
    reducer: RefCell<Reducer>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener_id: Cell<u64>,
    dispatching: Cell<bool>,
}

/// 상태 컨테이너
///
/// Clone은 같은 store를 공유합니다.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

/// 소유하지 않는 store 핸들
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl Store {
    /// 새 store 생성
    ///
    /// 초기 상태는 `preloaded_state`에 초기화 액션을 적용한 결과입니다.
    pub fn new(reducer: Reducer, preloaded_state: Option<State>) -> Self {
        let config = StoreConfig {
            preloaded_state,
            ..StoreConfig::default()
        };
        Self::from_config(reducer, &config)
    }

    /// 설정으로 생성
    pub fn from_config(reducer: Reducer, config: &StoreConfig) -> Self {
        let state = reducer.reduce(config.preloaded_state.as_ref(), &Action::init());
        debug!("[{}] Store created", config.name());

        Self {
            inner: Rc::new(StoreInner {
                name: config.name().to_string(),
                state: RefCell::new(state),
                reducer: RefCell::new(reducer),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(1),
                dispatching: Cell::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// 현재 상태 (복사본)
    pub fn get_state(&self) -> State {
        self.inner.state.borrow().clone()
    }

    /// 액션 처리
    ///
    /// reducer 실행 중 다시 호출되면 `Error::ReentrantDispatch`를 반환합니다.
    pub fn dispatch(&self, action: &Action) -> Result<()> {
        self.ensure_idle(action)?;

        let reducer = self.inner.reducer.borrow().clone();
        {
            let _guard = DispatchGuard::enter(&self.inner.dispatching);
            let next = {
                let previous = self.inner.state.borrow();
                reducer.reduce(Some(&*previous), action)
            };
            *self.inner.state.borrow_mut() = next;
        }

        trace!("[{}] Dispatched: {}", self.inner.name, action);
        self.notify_listeners();
        Ok(())
    }

    /// reducer 교체 후 교체 액션 dispatch
    pub fn replace_reducer(&self, reducer: Reducer) -> Result<()> {
        let action = Action::replace();
        self.ensure_idle(&action)?;

        *self.inner.reducer.borrow_mut() = reducer;
        debug!("[{}] Reducer replaced", self.inner.name);

        self.dispatch(&action)
    }

    // ========================================================================
    // 리스너
    // ========================================================================

    /// 리스너 등록
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener_id.get());
        self.inner.next_listener_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        trace!("[{}] Subscribed {}", self.inner.name, id);
        id
    }

    /// 리스너 해제
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn ensure_idle(&self, action: &Action) -> Result<()> {
        if self.inner.dispatching.get() {
            warn!("[{}] Rejected dispatch of '{}' from inside a reducer", self.inner.name, action);
            return Err(Error::ReentrantDispatch(action.action_type.clone()));
        }
        Ok(())
    }

    fn notify_listeners(&self) {
        // 리스너가 구독을 바꿀 수 있으므로 스냅샷으로 호출
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("state", &self.inner.state.try_borrow().ok())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
