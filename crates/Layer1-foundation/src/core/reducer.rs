//! Reducer - 상태 전이 함수
//!
//! `(이전 상태, 액션) -> 다음 상태` 형태의 순수 함수를 감싸는 핸들입니다.
//! 이전 상태가 없으면(`None`) reducer가 선언한 기본 상태에서 시작합니다.

use super::types::{empty_record, Action, State};
use std::rc::Rc;

type ReducerFn = dyn Fn(Option<&State>, &Action) -> State;

/// 상태 전이 함수 핸들
///
/// Clone은 같은 함수를 공유합니다 (`Rc`).
#[derive(Clone)]
pub struct Reducer {
    inner: Rc<ReducerFn>,
}

impl Reducer {
    /// 원시 함수로 생성
    ///
    /// `state`가 `None`이면 slot이 아직 정의되지 않은 상태입니다.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&State>, &Action) -> State + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// 기본 상태를 가진 reducer 생성
    ///
    /// 정의되지 않은 slot은 `default`로 대체된 뒤 `f`에 전달됩니다.
    pub fn with_default<F>(default: State, f: F) -> Self
    where
        F: Fn(State, &Action) -> State + 'static,
    {
        Self::new(move |state, action| {
            let state = state.cloned().unwrap_or_else(|| default.clone());
            f(state, action)
        })
    }

    /// 받은 상태를 그대로 돌려주는 reducer (`(state = {}, _) => state`)
    pub fn passthrough() -> Self {
        Self::new(|state, _| state.cloned().unwrap_or_else(empty_record))
    }

    /// 상태 전이 실행
    pub fn reduce(&self, state: Option<&State>, action: &Action) -> State {
        (self.inner)(state, action)
    }

    /// 같은 함수를 가리키는지 확인
    pub fn ptr_eq(&self, other: &Reducer) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.inner) as *const (),
            Rc::as_ptr(&other.inner) as *const (),
        )
    }
}

impl std::fmt::Debug for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("ptr", &(Rc::as_ptr(&self.inner) as *const ()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_with_default_on_undefined_state() {
        let reducer = counter();
        assert_eq!(reducer.reduce(None, &Action::init()), json!(0));
        assert_eq!(reducer.reduce(None, &Action::new("increment")), json!(1));
        assert_eq!(reducer.reduce(Some(&json!(41)), &Action::new("increment")), json!(42));
    }

    #[test]
    fn test_passthrough() {
        let reducer = Reducer::passthrough();
        assert_eq!(reducer.reduce(None, &Action::new("anything")), json!({}));
        assert_eq!(
            reducer.reduce(Some(&json!({"a": [1, 2]})), &Action::new("anything")),
            json!({"a": [1, 2]})
        );
        assert_eq!(reducer.reduce(Some(&json!(7)), &Action::init()), json!(7));
    }

    #[test]
    fn test_ptr_eq() {
        let a = counter();
        let b = a.clone();
        let c = counter();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
