//! Update Handler - 변경 통지 콜백

use std::rc::Rc;

/// 인자 없는 변경 통지 콜백
///
/// 하위 combiner는 부모의 통지 루틴을 이 타입으로 보관합니다.
/// 부모에 대한 참조는 콜백 내부의 `Weak`뿐입니다.
pub type UpdateHandler = Rc<dyn Fn()>;

/// 클로저를 UpdateHandler로 감싸기
pub fn update_handler(f: impl Fn() + 'static) -> UpdateHandler {
    Rc::new(f)
}

/// 두 handler가 같은 콜백인지 확인 (주소 비교)
pub fn same_handler(a: &UpdateHandler, b: &UpdateHandler) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
