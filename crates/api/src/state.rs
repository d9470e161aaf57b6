use std::sync::Arc;

use students_db::StudentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Student persistence. MongoDB in production, in-memory in tests.
    pub students: Arc<dyn StudentStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(students: Arc<dyn StudentStore>, config: ServerConfig) -> Self {
        Self {
            students,
            config: Arc::new(config),
        }
    }
}
