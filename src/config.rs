//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `HOST`, `PORT`: 서버 바인딩 주소 (기본값 `0.0.0.0:8080`)
//! - `APP_VARIANT`: `catalog`(상품 API) 또는 `demo`(정적 데모 API)
//! - `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PORT`: 데이터베이스 접속 정보
//! - `DB_AUTH`: `iam`(클라우드 토큰) 또는 `password`(`DB_PASSWORD` 사용)
//! - `DB_TRUST_SERVER_CERTIFICATE`: 서버 인증서 검증을 끌지 여부 (기본값: 검증함)
//! - `DB_SSL_ROOT_CERT`: 인증서 검증에 사용할 루트 CA 파일 경로
//! - `DB_TIMEOUT_SECS`: 연결/쿼리 타임아웃 (초)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// 설정값이 잘못되었을 때의 에러
///
/// 서버 시작 단계에서만 발생하므로 HTTP 응답으로 변환하지 않고,
/// `main`에서 anyhow로 감싸 프로세스를 종료합니다.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must be set when DB_AUTH=password")]
    Missing(&'static str),
}

/// 어떤 라우트 묶음을 서빙할지 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `/`, `/health`, `/products`
    Catalog,
    /// `/`, `/health`, `/api/data` — 데이터베이스 없음
    Demo,
}

/// DB 비밀번호를 어디서 얻을지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbAuth {
    /// 요청마다 IAM 인증 토큰을 새로 발급받아 비밀번호로 사용
    Iam,
    /// 고정 비밀번호 (로컬 개발용)
    Password(String),
}

/// 데이터베이스 접속에 필요한 설정
///
/// 비밀번호는 여기 없습니다. 요청마다 `TokenProvider`가 새로 만들어 줍니다.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub auth: DbAuth,
    /// `true`면 TLS는 쓰지만 인증서 체인을 검증하지 않습니다.
    pub trust_server_certificate: bool,
    pub ssl_root_cert: Option<PathBuf>,
    pub timeout: Duration,
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8080)
    pub port: u16,
    pub variant: Variant,
    pub db: DbSettings,
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 읽습니다.
    ///
    /// `from_env`는 이 함수에 `env::var`를 넘길 뿐입니다.
    /// 테스트에서는 HashMap을 넘겨 전역 환경변수를 건드리지 않습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 값이 없으면 기본값을 쓰는 작은 헬퍼 클로저
        let or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let variant = match or_default("APP_VARIANT", "catalog").to_ascii_lowercase().as_str() {
            "catalog" => Variant::Catalog,
            "demo" => Variant::Demo,
            other => {
                return Err(ConfigError::Invalid {
                    key: "APP_VARIANT",
                    value: other.to_string(),
                })
            }
        };

        let auth = match or_default("DB_AUTH", "iam").to_ascii_lowercase().as_str() {
            "iam" => DbAuth::Iam,
            "password" => DbAuth::Password(
                lookup("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?,
            ),
            other => {
                return Err(ConfigError::Invalid {
                    key: "DB_AUTH",
                    value: other.to_string(),
                })
            }
        };

        let trust_server_certificate = match lookup("DB_TRUST_SERVER_CERTIFICATE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                key: "DB_TRUST_SERVER_CERTIFICATE",
                value: raw,
            })?,
            None => false,
        };

        let timeout_secs = match lookup("DB_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => 10,
        };

        Ok(Self {
            host: or_default("HOST", "0.0.0.0"),
            // 포트 파싱에 실패하면 기본값을 씁니다.
            port: or_default("PORT", "8080").parse().unwrap_or(8080),
            variant,
            db: DbSettings {
                host: or_default("DB_HOST", "localhost"),
                port: or_default("DB_PORT", "5432").parse().unwrap_or(5432),
                database: or_default("DB_NAME", "catalogdb"),
                username: or_default("DB_USER", "dbadmin"),
                auth,
                trust_server_certificate,
                ssl_root_cert: lookup("DB_SSL_ROOT_CERT").map(PathBuf::from),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
