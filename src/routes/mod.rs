//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 두 가지 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `products`: 상품 목록/생성
//! - `root`: 인사말, 데모 데이터
//!
//! ## 변형(Variant)
//! - catalog: `GET /`, `GET /health`, `GET /products`, `POST /products`
//! - demo: `GET /`, `GET /health`, `GET /api/data`

pub mod health;
pub mod products;
pub mod root;

pub use health::*;
pub use products::*;
pub use root::*;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// 상품 API 라우터
///
/// `.with_state()`로 모든 핸들러에서 `AppState`를 사용할 수 있게 합니다.
pub fn catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        // 같은 경로에 GET과 POST를 체이닝해서 매핑합니다.
        .route("/products", get(list_products).post(create_product))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// DB 없는 데모 라우터
pub fn demo_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/data", get(demo_data))
        .layer(TraceLayer::new_for_http())
}
