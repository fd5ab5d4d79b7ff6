//! Storage module
//!
//! - `json`: JSON - 설정 파일 저장/로드
//!
//! 상태(State) 영속화는 하지 않습니다. 설정 파일 전용입니다.

mod json;

pub use json::JsonStore;
