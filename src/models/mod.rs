//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `product`: 상품(Product)과 생성 요청
//! - `demo`: 데모 변형의 고정 응답 항목
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::Product`처럼 짧게 접근할 수 있습니다.

pub mod demo;
pub mod product;

pub use demo::*;
pub use product::*;
