use axum::{routing::get, Router};

use crate::state::AppState;

/// Plain-text greeting served at `/`.
pub const WELCOME_MESSAGE: &str = "welcome to students api";

/// GET / -- confirms the service is up.
async fn welcome() -> &'static str {
    tracing::debug!("Served welcome message to client");
    WELCOME_MESSAGE
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}
