//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 백엔드 장애(자격 증명, 연결, 쿼리, 타임아웃)는 모두 500으로 변환되며,
//! 클라이언트에게는 내부 내용을 알려주지 않습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 본문 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 요청 본문이 크기 제한을 넘음 (HTTP 413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// IAM 토큰 등 DB 자격 증명을 얻지 못함 (HTTP 500)
    #[error("Credential error: {0}")]
    Credential(String),

    /// 데이터베이스 연결/쿼리 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 연결 또는 쿼리가 제한 시간 안에 끝나지 않음 (HTTP 500)
    /// 어떤 단계에서 멈췄는지("connect", "query")를 담습니다.
    #[error("Timed out during {0}")]
    Timeout(&'static str),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // 백엔드 장애는 종류와 관계없이 같은 코드/메시지로 응답합니다.
        // 클라이언트가 DB 장애인지 자격 증명 장애인지 구분할 수 없게 합니다.
        let internal = || {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            )
        };

        let (status, code, message) = match self {
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::PayloadTooLarge(ref msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg.clone())
            }
            AppError::Credential(ref msg) => {
                tracing::error!("Credential error: {}", msg);
                internal()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                internal()
            }
            AppError::Timeout(stage) => {
                tracing::error!("Database {} timed out", stage);
                internal()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
        };

        // 결과: { "error": { "code": "bad_request", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_keeps_message() {
        let (status, body) = render(AppError::BadRequest("missing field `name`".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
        assert_eq!(body["error"]["message"], "missing field `name`");
    }

    #[tokio::test]
    async fn backend_failures_are_opaque_500s() {
        let cases = [
            AppError::Credential("AccessDenied: rds-db:connect".into()),
            AppError::Database(sqlx::Error::PoolTimedOut),
            AppError::Timeout("connect"),
            AppError::Internal("boom".into()),
        ];

        let mut bodies = Vec::new();
        for err in cases {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            bodies.push(body);
        }

        // 어떤 백엔드 장애였는지 응답만으로는 구분할 수 없어야 합니다.
        for body in &bodies {
            assert_eq!(body, &bodies[0]);
        }
        assert_eq!(bodies[0]["error"]["code"], "internal_error");
        assert_eq!(bodies[0]["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn payload_too_large_is_413() {
        let (status, body) = render(AppError::PayloadTooLarge("length limit exceeded".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "payload_too_large");
    }
}
