use serde::{Deserialize, Serialize};

/// 상품 엔티티 — `products` 테이블의 한 행
///
/// `id`는 데이터베이스가 삽입 순서대로 부여합니다.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// `POST /products`의 요청 본문
///
/// `name` 필드가 없으면 역직렬화가 실패하고, 핸들러가 400으로 응답합니다.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
}
