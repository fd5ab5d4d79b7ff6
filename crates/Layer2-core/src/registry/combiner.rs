//! Reducer Combiner - 동적으로 변경 가능한 reducer 레지스트리

use super::entry::ReducerEntry;
use super::handler::{same_handler, UpdateHandler};
use combiner_foundation::combine;
use combiner_foundation::{CombineOptions, Error, Reducer, ReducerMap, Result};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// key 순서를 보존하는 항목 mapping
pub type EntryMap = IndexMap<String, ReducerEntry>;

const DEFAULT_NAME: &str = "combiner";

// ============================================================================
// CombinerInner
// ============================================================================

struct CombinerInner {
    /// 항목 저장소 (이 combiner만 소유)
    reducers: EntryMap,

    /// 상위 통지 대상 (부모의 notifier 또는 외부 sink)
    update_handler: Option<UpdateHandler>,

    /// 이 combiner 자신의 통지 루틴 (하위 combiner에 전파되는 값)
    notifier: UpdateHandler,

    /// 이름 (디버깅용)
    name: String,
}

impl CombinerInner {
    fn notify(inner: &RefCell<CombinerInner>) {
        let handler = {
            let inner = inner.borrow();
            match &inner.update_handler {
                Some(handler) => {
                    trace!("[{}] Notifying update handler", inner.name);
                    Rc::clone(handler)
                }
                None => {
                    trace!("[{}] Update without handler", inner.name);
                    return;
                }
            }
        };
        handler();
    }
}

// ============================================================================
// ReducerCombiner
// ============================================================================

/// 이름 붙은 reducer들의 변경 가능한 트리
///
/// - `add_reducer` / `remove_reducer` / `update_reducer`로 mapping 변경
/// - `combine_reducers`로 현재 트리를 하나의 reducer로 조합
/// - 변경마다 update handler를 정확히 한 번 호출 (하위 변경은 루트까지 전파)
///
/// Clone은 같은 combiner를 가리키는 핸들을 만듭니다. 단일 스레드 전용입니다.
/// combiner를 자기 자신(또는 조상) 아래에 넣는 것은 지원하지 않습니다.
#[derive(Clone)]
pub struct ReducerCombiner {
    inner: Rc<RefCell<CombinerInner>>,
}

/// 소유하지 않는 combiner 핸들
#[derive(Clone)]
pub struct WeakReducerCombiner {
    inner: Weak<RefCell<CombinerInner>>,
}

impl WeakReducerCombiner {
    pub fn upgrade(&self) -> Option<ReducerCombiner> {
        self.inner.upgrade().map(|inner| ReducerCombiner { inner })
    }
}

impl ReducerCombiner {
    /// 초기 mapping으로 생성 (통지 없음)
    pub fn new(initial: EntryMap) -> Self {
        Self::named(DEFAULT_NAME, initial)
    }

    /// 빈 combiner
    pub fn empty() -> Self {
        Self::new(EntryMap::new())
    }

    /// 이름과 초기 mapping으로 생성
    pub fn named(name: impl Into<String>, initial: EntryMap) -> Self {
        let name = name.into();
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<CombinerInner>>| {
            let weak = weak.clone();
            let notifier: UpdateHandler = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    CombinerInner::notify(&inner);
                }
            });
            RefCell::new(CombinerInner {
                reducers: initial,
                update_handler: None,
                notifier,
                name,
            })
        });

        let combiner = Self { inner };
        let children: Vec<ReducerEntry> = combiner
            .inner
            .borrow()
            .reducers
            .values()
            .filter(|entry| entry.is_nested())
            .cloned()
            .collect();
        for child in &children {
            combiner.propagate_update_handler(child);
        }

        combiner
    }

    /// (key, 값) 목록으로 생성
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ReducerEntry>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    // ========================================================================
    // 등록 / 해제 / 교체
    // ========================================================================

    /// 새 항목 추가
    ///
    /// 이미 있는 key면 `Error::DuplicateKey`를 반환하고 아무것도 바꾸지 않습니다.
    pub fn add_reducer(&self, key: impl Into<String>, reducer: impl Into<ReducerEntry>) -> Result<()> {
        let key = key.into();
        let entry = reducer.into();

        {
            let mut inner = self.inner.borrow_mut();
            if inner.reducers.contains_key(&key) {
                warn!(
                    "[{}] Key '{}' already exists, use update_reducer() instead",
                    inner.name, key
                );
                return Err(Error::duplicate_key(key));
            }
            debug!("[{}] Added: {} ({})", inner.name, key, entry.kind());
            inner.reducers.insert(key, entry.clone());
        }

        self.propagate_update_handler(&entry);
        self.on_update();
        Ok(())
    }

    /// 항목 제거
    ///
    /// `preserve_state`가 true면 같은 key에 passthrough reducer를 넣어 마지막
    /// 상태를 그대로 유지합니다. 없는 key여도 통지는 발생합니다.
    pub fn remove_reducer(&self, key: &str, preserve_state: bool) -> Option<ReducerEntry> {
        let removed = self.inner.borrow_mut().reducers.shift_remove(key);

        if let Some(entry) = &removed {
            if let ReducerEntry::Nested(child) = entry {
                child.delete_update_handler();
            }

            // 보존하지 않으면 다음 dispatch에서 state slot이 사라짐
            if preserve_state {
                self.inner
                    .borrow_mut()
                    .reducers
                    .insert(key.to_string(), Reducer::passthrough().into());
            }

            debug!(
                "[{}] Removed: {} ({}, preserve_state={})",
                self.name(),
                key,
                entry.kind(),
                preserve_state
            );
        } else {
            trace!("[{}] Remove of unknown key: {}", self.name(), key);
        }

        self.on_update();
        removed
    }

    /// 항목 덮어쓰기 (없으면 추가)
    ///
    /// 이전 값이 하위 combiner였어도 그 handler는 해제하지 않습니다.
    /// 분리가 필요하면 먼저 `remove_reducer`를 호출해야 합니다.
    pub fn update_reducer(
        &self,
        key: impl Into<String>,
        reducer: impl Into<ReducerEntry>,
    ) -> Option<ReducerEntry> {
        let key = key.into();
        let entry = reducer.into();

        let previous = {
            let mut inner = self.inner.borrow_mut();
            debug!("[{}] Updated: {} ({})", inner.name, key, entry.kind());
            inner.reducers.insert(key, entry.clone())
        };

        self.propagate_update_handler(&entry);
        self.on_update();
        previous
    }

    // ========================================================================
    // 조합
    // ========================================================================

    /// 현재 트리를 하나의 reducer로 조합 (기본 옵션)
    pub fn combine_reducers(&self) -> Reducer {
        self.combine_reducers_with(&CombineOptions::default())
    }

    /// 현재 트리를 하나의 reducer로 조합
    ///
    /// 읽기 전용: mapping을 바꾸지 않고 통지도 하지 않습니다. 캐시가 없으므로
    /// 트리가 바뀔 때마다 다시 호출해야 합니다.
    pub fn combine_reducers_with(&self, options: &CombineOptions) -> Reducer {
        let inner = self.inner.borrow();
        let resolved: ReducerMap = inner
            .reducers
            .iter()
            .map(|(key, entry)| (key.clone(), entry.resolve(options)))
            .collect();

        trace!("[{}] Combined {} reducers", inner.name, resolved.len());

        if resolved.is_empty() {
            Reducer::passthrough()
        } else {
            combine::combine_reducers_with(resolved, options)
        }
    }

    // ========================================================================
    // 통지
    // ========================================================================

    /// 통지 대상 설정 (기존 handler 대체)
    pub fn set_update_handler(&self, handler: UpdateHandler) {
        self.inner.borrow_mut().update_handler = Some(handler);
    }

    /// 통지 대상 해제
    pub fn delete_update_handler(&self) {
        self.inner.borrow_mut().update_handler = None;
    }

    pub fn has_update_handler(&self) -> bool {
        self.inner.borrow().update_handler.is_some()
    }

    /// handler가 있으면 호출
    pub fn on_update(&self) {
        CombinerInner::notify(&self.inner);
    }

    /// 이 combiner의 통지 루틴 (하위 combiner의 handler로 쓰이는 값)
    pub fn notifier(&self) -> UpdateHandler {
        Rc::clone(&self.inner.borrow().notifier)
    }

    /// 이 combiner의 handler가 `parent`의 통지 루틴인지 확인
    pub fn notifies(&self, parent: &ReducerCombiner) -> bool {
        let handler = self.inner.borrow().update_handler.clone();
        let notifier = parent.notifier();
        handler.is_some_and(|handler| same_handler(&handler, &notifier))
    }

    fn propagate_update_handler(&self, entry: &ReducerEntry) {
        if let ReducerEntry::Nested(child) = entry {
            child.set_update_handler(self.notifier());
        }
    }

    // ========================================================================
    // 조회
    // ========================================================================

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// 모든 키 (삽입 순서)
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().reducers.keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<ReducerEntry> {
        self.inner.borrow().reducers.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().reducers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 같은 combiner를 가리키는지 확인
    pub fn ptr_eq(&self, other: &ReducerCombiner) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakReducerCombiner {
        WeakReducerCombiner {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for ReducerCombiner {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ReducerCombiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("ReducerCombiner")
                .field("name", &inner.name)
                .field("keys", &inner.reducers.keys().collect::<Vec<_>>())
                .field("attached", &inner.update_handler.is_some())
                .finish(),
            Err(_) => f.debug_struct("ReducerCombiner").finish_non_exhaustive(),
        }
    }
}
