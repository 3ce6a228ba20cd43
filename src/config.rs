//! 環境変数から読み込むアプリケーション設定

use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/study_rooms";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 部屋と予約の保存先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// プロセス内に保持（既定の部屋で初期化）
    Memory,
    /// `DATABASE_URL`のPostgreSQL
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// 起動時に読み込む設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub database_url: String,
    pub max_connections: u32,
    /// 同じ日付の割り当てをプロセス内で直列化するか
    pub serialize_by_date: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            storage: StorageBackend::Memory,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            serialize_by_date: true,
        }
    }
}

impl AppConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `lookup`経由で設定を読み込む。未設定の変数は既定値を使う
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let storage = parse_var(&lookup, "STORAGE_BACKEND", defaults.storage)?;
        let max_connections = parse_var(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            defaults.max_connections,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                name: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }
        let serialize_by_date = match lookup("BOOKING_SERIALIZE_BY_DATE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                name: "BOOKING_SERIALIZE_BY_DATE",
                reason: format!("expected true or false, got {raw:?}"),
            })?,
            None => defaults.serialize_by_date,
        };

        Ok(Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            storage,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections,
            serialize_by_date,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.serialize_by_date);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("STORAGE_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://db/rooms"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BOOKING_SERIALIZE_BY_DATE", "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url, "postgres://db/rooms");
        assert_eq!(config.max_connections, 12);
        assert!(!config.serialize_by_date);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "redis")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "STORAGE_BACKEND",
                reason: "unknown storage backend: redis".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_connections_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup(&[("BOOKING_SERIALIZE_BY_DATE", "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "BOOKING_SERIALIZE_BY_DATE",
                ..
            }
        ));
    }
}
