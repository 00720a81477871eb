//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 라우트 핸들러는 `ProductStore` 트레이트에만 의존합니다.
//! 운영 구현인 `PgProductStore`는 요청마다 연결을 새로 열고,
//! 문장 하나를 실행한 뒤 연결을 닫습니다. 풀링은 하지 않습니다.
//!
//! 각 하위 모듈:
//! - `connection`: 토큰 발급 → 연결 디스크립터 → `PgConnection`
//! - `products`: `products` 테이블 쿼리

pub mod connection;
pub mod products;

#[cfg(test)]
pub mod memory;

/// `migrations/`의 스키마. 서비스는 실행하지 않고, SQL 테스트에서만 적용합니다.
#[cfg(test)]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use crate::{
    config::DbSettings, error::AppError, models::Product, services::credentials::TokenProvider,
};
use connection::ConnectionDescriptor;

/// 상품 저장소
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 전체 상품을 id 오름차순으로 반환합니다.
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;

    /// 상품을 저장하고 DB가 부여한 id가 담긴 행을 반환합니다.
    async fn create_product(&self, name: &str) -> Result<Product, AppError>;
}

/// PostgreSQL 구현. 요청당 연결 하나.
pub struct PgProductStore {
    settings: DbSettings,
    tokens: Arc<dyn TokenProvider>,
}

impl PgProductStore {
    pub fn new(settings: DbSettings, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { settings, tokens }
    }

    fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// 토큰 발급부터 연결까지. 실패하면 연결은 만들어지지 않습니다.
    async fn open(&self) -> Result<PgConnection, AppError> {
        let descriptor = ConnectionDescriptor::build(&self.settings, self.tokens.as_ref()).await?;
        descriptor.connect(self.timeout()).await
    }

    /// 쿼리 future에 타임아웃을 겁니다.
    async fn run<T, F>(&self, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>> + Send,
    {
        tokio::time::timeout(self.timeout(), query)
            .await
            .map_err(|_| AppError::Timeout("query"))?
    }
}

/// 연결을 돌려놓습니다.
///
/// 성공했으면 종료 메시지를 보내고 정상 종료합니다.
/// 실패(타임아웃 포함)했으면 연결 상태를 믿을 수 없으므로 그냥 drop해서 소켓을 닫습니다.
async fn release(conn: PgConnection, succeeded: bool, timeout: Duration) {
    if !succeeded {
        drop(conn);
        return;
    }

    close_within(conn.close(), timeout).await;
}

/// 종료 핸드셰이크에도 타임아웃을 겁니다.
///
/// 제한 시간을 넘기면 future가 drop되면서 연결도 함께 drop되어 소켓이 닫힙니다.
/// 응답은 이미 성공이므로 어느 경우든 경고 로그만 남깁니다.
async fn close_within<F>(close: F, timeout: Duration)
where
    F: Future<Output = Result<(), sqlx::Error>>,
{
    match tokio::time::timeout(timeout, close).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("failed to close database connection cleanly: {}", e),
        Err(_) => tracing::warn!("closing database connection timed out; dropping it"),
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let mut conn = self.open().await?;
        let result = self.run(products::list_products(&mut conn)).await;
        release(conn, result.is_ok(), self.timeout()).await;
        result
    }

    async fn create_product(&self, name: &str) -> Result<Product, AppError> {
        let mut conn = self.open().await?;
        let result = self.run(products::insert_product(&mut conn, name)).await;
        release(conn, result.is_ok(), self.timeout()).await;
        result
    }
}
