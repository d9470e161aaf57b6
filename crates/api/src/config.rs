use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use students_db::timeout::SCAN_TIMEOUT;
use students_db::DEFAULT_DATABASE;

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database URI has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8082`).
    pub port: u16,
    /// MongoDB connection URI (required).
    pub mongo_uri: String,
    /// Database holding the `students` collection (default: `studentsdb`).
    pub mongo_database: String,
    /// Optional log file, truncated at startup.
    pub log_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// Whole-request timeout in seconds (default: `30`). Must exceed the
    /// database scan timeout so store deadlines fire first.
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown (default: `5`).
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8082`                  |
    /// | `MONGO_URI`             | required                |
    /// | `MONGO_DATABASE`        | `studentsdb`            |
    /// | `LOG_PATH`              | unset                   |
    /// | `LOG_FORMAT`            | `text`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `5`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = parse_or("HOST", var("HOST"), "0.0.0.0")?;
        let port = parse_or("PORT", var("PORT"), "8082")?;

        let mongo_uri = var("MONGO_URI").ok_or(ConfigError::Missing("MONGO_URI"))?;
        let mongo_database = var("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into());

        let log_path = var("LOG_PATH").map(PathBuf::from);
        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'text' or 'json'".into(),
                })
            }
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs: u64 =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), "30")?;
        if request_timeout_secs <= SCAN_TIMEOUT.as_secs() {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: request_timeout_secs.to_string(),
                reason: format!("must be greater than {}", SCAN_TIMEOUT.as_secs()),
            });
        }
        let shutdown_timeout_secs =
            parse_or("SHUTDOWN_TIMEOUT_SECS", var("SHUTDOWN_TIMEOUT_SECS"), "5")?;

        Ok(Self {
            host,
            port,
            mongo_uri,
            mongo_database,
            log_path,
            log_format,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config = load(&[("MONGO_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8082");
        assert_eq!(config.mongo_database, "studentsdb");
        assert_eq!(config.log_path, None);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_uri_is_an_error() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("MONGO_URI")));
        assert_matches!(
            load(&[("MONGO_URI", "   ")]),
            Err(ConfigError::Missing("MONGO_URI"))
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("MONGO_URI", "mongodb://db:27017"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MONGO_DATABASE", "school"),
            ("LOG_PATH", "/tmp/students.log"),
            ("LOG_FORMAT", "json"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("SHUTDOWN_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.mongo_database, "school");
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/students.log")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn invalid_values_are_errors() {
        assert_matches!(
            load(&[("MONGO_URI", "mongodb://db"), ("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        );
        assert_matches!(
            load(&[("MONGO_URI", "mongodb://db"), ("HOST", "not a host")]),
            Err(ConfigError::Invalid { key: "HOST", .. })
        );
        assert_matches!(
            load(&[("MONGO_URI", "mongodb://db"), ("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { key: "LOG_FORMAT", .. })
        );
    }

    #[test]
    fn request_timeout_must_outlast_database_timeouts() {
        for value in ["0", "5", "10"] {
            assert_matches!(
                load(&[("MONGO_URI", "mongodb://db"), ("REQUEST_TIMEOUT_SECS", value)]),
                Err(ConfigError::Invalid { key: "REQUEST_TIMEOUT_SECS", .. })
            );
        }

        let config = load(&[
            ("MONGO_URI", "mongodb://db"),
            ("REQUEST_TIMEOUT_SECS", "11"),
        ])
        .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(11));
    }
}
