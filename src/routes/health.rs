//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /health` → `{ "status": "healthy", "timestamp": "2026-10-19T08:00:00Z" }`
//!
//! 데이터베이스를 확인하지 않습니다. 프로세스가 응답할 수 있으면 항상 healthy입니다.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 헬스체크 응답 본문
///
/// `DateTime<Utc>`는 serde로 직렬화하면 RFC 3339(ISO-8601) 문자열이 됩니다.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health` — 서버 상태와 현재 UTC 시각을 반환합니다.
///
/// `Result`를 사용하지 않으므로 이 핸들러는 실패하지 않습니다.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now(),
    })
}
