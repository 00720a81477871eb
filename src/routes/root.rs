//! # 정적 엔드포인트
//!
//! 데이터베이스 없이 고정된 값을 돌려주는 핸들러들입니다.
//! - `GET /` → 인사말 (plain text)
//! - `GET /api/data` → 고정된 두 항목 (데모 변형 전용)

use axum::Json;

use crate::models::{DemoItem, DEMO_ITEMS};

pub const GREETING: &str = "Hello from .NET Web API!";

/// `GET /` — `&'static str`을 반환하면 axum이 `text/plain; charset=utf-8`로 응답합니다.
pub async fn index() -> &'static str {
    GREETING
}

/// `GET /api/data`
pub async fn demo_data() -> Json<[DemoItem; 2]> {
    Json(DEMO_ITEMS)
}
