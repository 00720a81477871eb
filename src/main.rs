//! # catalog-api 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 읽기 (catalog / demo 변형 선택)
//! 4. catalog 변형이면 DB 토큰 발급기와 상품 저장소 구성
//! 5. 라우터 설정
//! 6. HTTP 서버 시작 (Ctrl+C / SIGTERM 시 정상 종료)
//!
//! 연결 풀은 만들지 않습니다. 상품 요청마다 IAM 토큰으로 연결을 새로 엽니다.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use config::{Config, DbAuth, Variant};
use db::{connection::TlsPolicy, PgProductStore};
use routes::AppState;
use services::credentials::{RdsTokenProvider, StaticTokenProvider, TokenProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 catalog_api, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting catalog-api ({:?} variant) on {}:{}",
        config.variant,
        config.host,
        config.port
    );

    let app = match config.variant {
        Variant::Demo => routes::demo_router(),
        Variant::Catalog => catalog_app(&config).await,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 상품 API 구성: 토큰 발급기 → 저장소 → 라우터
async fn catalog_app(config: &Config) -> Router {
    let tokens: Arc<dyn TokenProvider> = match &config.db.auth {
        DbAuth::Iam => {
            tracing::info!("Using IAM auth tokens for {}@{}", config.db.username, config.db.host);
            Arc::new(RdsTokenProvider::from_env().await)
        }
        DbAuth::Password(password) => {
            tracing::info!("Using static password for {}@{}", config.db.username, config.db.host);
            Arc::new(StaticTokenProvider::new(password.clone()))
        }
    };

    if TlsPolicy::from_settings(&config.db) == TlsPolicy::RequireUnverified {
        tracing::warn!(
            "DB_TRUST_SERVER_CERTIFICATE is enabled: database TLS certificates are not verified"
        );
    }

    let store = PgProductStore::new(config.db.clone(), tokens);
    routes::catalog_router(AppState {
        store: Arc::new(store),
    })
}

/// Ctrl+C 또는 SIGTERM을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting shutdown"),
    }
}
