//! # 상품(Product) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /products | `list_products` | 전체 상품 목록 (id 오름차순) |
//! | POST | /products | `create_product` | 새 상품 생성 → 201 + Location |
//!
//! 두 핸들러 모두 요청마다 DB 연결을 하나씩 열고 닫습니다 (`db::PgProductStore`).
//! 연결/쿼리/토큰 발급 실패는 `AppError`를 통해 500으로 변환됩니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    db::ProductStore,
    error::AppError,
    models::{CreateProductRequest, Product},
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 저장소는 `Arc<dyn ProductStore>`라서 clone해도 같은 구현을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

/// `GET /products` — 전체 상품을 JSON 배열로 반환합니다.
///
/// 행이 없으면 `[]`.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.store.list_products().await?;
    Ok(Json(products))
}

/// `POST /products` + `{ "name": "..." }`
///
/// `Json<T>`을 바로 받으면 axum이 필드 누락을 422로 응답합니다.
/// 여기서는 `Result<Json<T>, JsonRejection>`으로 받아서
/// 본문 관련 실패(문법 오류, 필드 누락, Content-Type 누락)를 400으로 통일합니다.
/// 본문 크기 제한(`DefaultBodyLimit`, 2MB)을 넘은 경우만 413을 유지합니다.
/// 어느 쪽이든 저장소는 호출되지 않으므로 행이 생기지 않습니다.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;

    let product = state.store.create_product(&req.name).await?;
    tracing::info!(id = product.id, "created product");

    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}
