//! # 서비스 모듈
//!
//! 외부 시스템과 상호작용하는 로직입니다.
//! - `credentials`: DB 비밀번호로 쓸 단기 토큰 발급 (AWS IAM / 고정 비밀번호)

pub mod credentials;
