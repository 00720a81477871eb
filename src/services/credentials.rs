//! # DB 자격 증명 서비스
//!
//! 데이터베이스 비밀번호로 쓸 토큰을 발급하는 `TokenProvider`와 구현체들입니다.
//!
//! - `RdsTokenProvider`: AWS IAM 인증 토큰. 주변 환경(환경변수, 프로파일,
//!   인스턴스/태스크 역할)의 AWS 자격 증명으로 서명하며, 몇 분 뒤 만료됩니다.
//! - `StaticTokenProvider`: 고정 비밀번호. 로컬 개발용입니다.
//!
//! 토큰은 연결 한 번에만 쓰고 버립니다. 로그에 남기지 않습니다.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_rds::auth_token::{AuthTokenGenerator, Config as AuthTokenConfig};

use crate::error::AppError;

/// host/port/user로 단기 DB 비밀번호를 발급하는 외부 협력자
///
/// 트레이트로 두었기 때문에 테스트에서는 클라우드 없이 가짜 구현을 넣을 수 있습니다.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self, host: &str, port: u16, user: &str) -> Result<String, AppError>;
}

/// AWS RDS IAM 인증 토큰 발급기
pub struct RdsTokenProvider {
    sdk_config: SdkConfig,
}

impl RdsTokenProvider {
    /// 기본 자격 증명 체인으로 AWS 설정을 한 번 읽어둡니다.
    ///
    /// 자격 증명 자체는 토큰을 서명할 때 확인되므로,
    /// 권한이 없어도 여기서는 실패하지 않고 요청 시점에 500이 됩니다.
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(sdk_config)
    }

    pub fn new(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }
}

#[async_trait]
impl TokenProvider for RdsTokenProvider {
    async fn get_token(&self, host: &str, port: u16, user: &str) -> Result<String, AppError> {
        let config = AuthTokenConfig::builder()
            .hostname(host)
            .port(u64::from(port))
            .username(user)
            .build()
            .map_err(|e| AppError::Credential(format!("invalid token request: {e}")))?;

        let token = AuthTokenGenerator::new(config)
            .auth_token(&self.sdk_config)
            .await
            .map_err(|e| AppError::Credential(format!("failed to sign IAM auth token: {e}")))?;

        tracing::debug!(host, port, user, "issued IAM auth token");
        Ok(token.as_str().to_string())
    }
}

/// 항상 같은 비밀번호를 돌려주는 발급기
pub struct StaticTokenProvider {
    password: String,
}

impl StaticTokenProvider {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _host: &str, _port: u16, _user: &str) -> Result<String, AppError> {
        Ok(self.password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_ignores_target() {
        let provider = StaticTokenProvider::new("s3cret");
        let token = provider.get_token("db.example", 5432, "dbadmin").await.unwrap();
        assert_eq!(token, "s3cret");
    }
}
