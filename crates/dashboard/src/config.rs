//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Server
//! - `MSME_HOST` - Bind address (default: 127.0.0.1)
//! - `MSME_PORT` - Listen port (default: 3000)
//!
//! ## Storage
//! - `MSME_STORAGE` - `file` or `memory` (default: file)
//! - `MSME_DATA_DIR` - Directory for file storage (default: .msme-data)
//!
//! ## Simulated latency (milliseconds)
//! - `MSME_READ_LATENCY_MS` (default: 300)
//! - `MSME_WRITE_LATENCY_MS` (default: 500)
//! - `MSME_CHAT_LATENCY_MS` (default: 800)
//! - `MSME_PROCESSING_LATENCY_MS` (default: 2000)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - e.g. "development", "production"
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate, 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::db::Latency;
use crate::storage::{FileStorage, MemoryStorage, SharedStorage, StorageError};

pub const DEFAULT_DATA_DIR: &str = ".msme-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where collections are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key in a directory.
    File(PathBuf),
    /// Process memory; lost on restart.
    Memory,
}

impl StorageBackend {
    /// Open the backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the data directory cannot be created.
    pub fn open(&self) -> Result<SharedStorage, StorageError> {
        Ok(match self {
            Self::File(dir) => Arc::new(FileStorage::open(dir.clone())?),
            Self::Memory => Arc::new(MemoryStorage::new()),
        })
    }
}

/// Dashboard server configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    pub storage: StorageBackend,
    pub latency: Latency,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_env(&lookup, "MSME_HOST", "127.0.0.1")?;
        let port = parse_env(&lookup, "MSME_PORT", "3000")?;

        let data_dir = get_env_or_default(&lookup, "MSME_DATA_DIR", DEFAULT_DATA_DIR);
        let storage = match get_env_or_default(&lookup, "MSME_STORAGE", "file").as_str() {
            "file" => StorageBackend::File(PathBuf::from(data_dir)),
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "MSME_STORAGE".to_string(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };

        let latency = Latency {
            read: parse_millis(&lookup, "MSME_READ_LATENCY_MS", Latency::DEFAULT_READ_MS)?,
            write: parse_millis(&lookup, "MSME_WRITE_LATENCY_MS", Latency::DEFAULT_WRITE_MS)?,
            chat: parse_millis(&lookup, "MSME_CHAT_LATENCY_MS", Latency::DEFAULT_CHAT_MS)?,
            processing: parse_millis(
                &lookup,
                "MSME_PROCESSING_LATENCY_MS",
                Latency::DEFAULT_PROCESSING_MS,
            )?,
        };

        let sentry_dsn = get_optional_env(&lookup, "SENTRY_DSN");
        let sentry_environment = get_optional_env(&lookup, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env(&lookup, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env(&lookup, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            storage,
            latency,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(lookup, key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    parse_env::<u64>(lookup, key, &default.to_string()).map(Duration::from_millis)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from(".msme-data")));
        assert_eq!(config.latency, Latency::default());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_memory_storage_and_zero_latency() {
        let config = config(&[
            ("MSME_STORAGE", "memory"),
            ("MSME_READ_LATENCY_MS", "0"),
            ("MSME_WRITE_LATENCY_MS", "0"),
            ("MSME_CHAT_LATENCY_MS", "0"),
            ("MSME_PROCESSING_LATENCY_MS", "0"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.latency, Latency::none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("MSME_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MSME_PORT"));
    }

    #[test]
    fn test_unknown_storage_backend() {
        let err = config(&[("MSME_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MSME_STORAGE"));
    }

    #[test]
    fn test_empty_sentry_dsn_is_unset() {
        let config = config(&[("SENTRY_DSN", ""), ("SENTRY_SAMPLE_RATE", "0.5")]).unwrap();
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 0.5).abs() < f32::EPSILON);
    }
}
