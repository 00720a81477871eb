//! 테스트용 인메모리 상품 저장소
//!
//! PostgreSQL 없이 라우트를 검증할 때 씁니다.
//! id는 1부터 삽입 순서대로 부여하며, 동시 삽입도 서로 다른 id를 받습니다.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ProductStore;
use crate::{error::AppError, models::Product};

#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn create_product(&self, name: &str) -> Result<Product, AppError> {
        let mut rows = self.rows.lock().await;
        let id = rows.last().map_or(1, |p| p.id + 1);
        let product = Product {
            id,
            name: name.to_string(),
        };
        rows.push(product.clone());
        Ok(product)
    }
}

/// 모든 호출이 실패하는 저장소 (DB 장애 상황)
pub struct BrokenProductStore;

#[async_trait]
impl ProductStore for BrokenProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_product(&self, _name: &str) -> Result<Product, AppError> {
        Err(AppError::Timeout("connect"))
    }
}
