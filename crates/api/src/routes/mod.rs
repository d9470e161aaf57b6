pub mod health;
pub mod root;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                 list (GET), create (POST)
/// /students/{id}            get (GET), update (PUT), delete (DELETE)
/// ```
///
/// The `{id}` segment reaches handlers as a raw string; they parse and
/// validate it themselves.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/students",
            get(handlers::student::list_students).post(handlers::student::create_student),
        )
        .route(
            "/students/{id}",
            get(handlers::student::get_student)
                .put(handlers::student::update_student)
                .delete(handlers::student::delete_student),
        )
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed)
}
