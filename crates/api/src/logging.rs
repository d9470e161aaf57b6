//! Tracing subscriber setup.
//!
//! Console output is always on. When a log path is configured, a second
//! plain-text layer writes the same events to that file, which is truncated
//! on every start.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ServerConfig};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "students_api=debug,students_db=debug,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Install the global subscriber.
pub fn init_tracing(config: &ServerConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let file_layer = match &config.log_path {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::OpenLogFile {
                path: path.clone(),
                source,
            })?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    match config.log_format {
        LogFormat::Text => registry.with(fmt::layer()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
    }
    Ok(())
}
