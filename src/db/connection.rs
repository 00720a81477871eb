//! # 연결 디스크립터(Connection Descriptor)
//!
//! 요청 하나가 DB 연결 하나를 열 때 필요한 정보(호스트, DB 이름, 사용자,
//! 비밀번호, TLS 모드)를 만들고, 실제로 연결을 여는 함수입니다.
//!
//! 비밀번호는 `TokenProvider`가 발급한 단기 토큰이므로
//! 디스크립터는 연결 시도 한 번에만 유효합니다.

use std::{fmt, path::PathBuf, time::Duration};

use sqlx::{
    postgres::{PgConnectOptions, PgConnection, PgSslMode},
    Connection,
};

use crate::{config::DbSettings, error::AppError, services::credentials::TokenProvider};

/// TLS 정책. 어느 쪽이든 TLS는 필수이고 평문 연결은 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsPolicy {
    /// 서버 인증서 체인과 호스트 이름을 검증합니다 (`sslmode=verify-full`).
    VerifyFull,
    /// 암호화는 하되 인증서를 검증하지 않습니다 (`sslmode=require`).
    /// 중간자 공격에 취약하므로 명시적으로 켰을 때만 사용합니다.
    RequireUnverified,
}

impl TlsPolicy {
    pub fn from_settings(settings: &DbSettings) -> Self {
        if settings.trust_server_certificate {
            TlsPolicy::RequireUnverified
        } else {
            TlsPolicy::VerifyFull
        }
    }

    fn ssl_mode(self) -> PgSslMode {
        match self {
            TlsPolicy::VerifyFull => PgSslMode::VerifyFull,
            TlsPolicy::RequireUnverified => PgSslMode::Require,
        }
    }
}

/// 연결 한 번을 위한 접속 정보
#[derive(Clone)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub tls: TlsPolicy,
    pub ssl_root_cert: Option<PathBuf>,
}

// 비밀번호(토큰)가 로그에 찍히지 않도록 Debug를 직접 구현합니다.
impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("ssl_root_cert", &self.ssl_root_cert)
            .finish()
    }
}

impl ConnectionDescriptor {
    /// 토큰을 새로 발급받아 디스크립터를 만듭니다.
    ///
    /// 발급기가 실패하면(네트워크 오류, IAM 권한 거부 등) 디스크립터를 만들 수 없고,
    /// 에러가 그대로 핸들러까지 올라가 500 응답이 됩니다.
    pub async fn build(
        settings: &DbSettings,
        tokens: &dyn TokenProvider,
    ) -> Result<Self, AppError> {
        let password = tokens
            .get_token(&settings.host, settings.port, &settings.username)
            .await?;

        Ok(Self {
            host: settings.host.clone(),
            port: settings.port,
            database: settings.database.clone(),
            username: settings.username.clone(),
            password,
            tls: TlsPolicy::from_settings(settings),
            ssl_root_cert: settings.ssl_root_cert.clone(),
        })
    }

    /// sqlx 연결 옵션으로 변환합니다.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(self.tls.ssl_mode())
            .application_name(env!("CARGO_PKG_NAME"));

        match &self.ssl_root_cert {
            Some(path) => options.ssl_root_cert(path),
            None => options,
        }
    }

    /// 연결을 하나 엽니다. `timeout` 안에 끝나지 않으면 `AppError::Timeout`.
    ///
    /// 반환된 `PgConnection`은 호출자가 소유합니다.
    /// 중간에 에러가 나서 drop되면 소켓도 함께 닫힙니다.
    pub async fn connect(&self, timeout: Duration) -> Result<PgConnection, AppError> {
        tracing::debug!(
            host = %self.host,
            database = %self.database,
            tls = ?self.tls,
            "opening database connection"
        );

        let options = self.connect_options();
        let conn = tokio::time::timeout(timeout, PgConnection::connect_with(&options))
            .await
            .map_err(|_| AppError::Timeout("connect"))??;

        Ok(conn)
    }
}
