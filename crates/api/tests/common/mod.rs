#![allow(dead_code)]

use std::future::pending;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use students_api::config::ServerConfig;
use students_api::router::build_app_router;
use students_api::state::AppState;
use students_core::student::{CreateStudent, StudentPatch};
use students_core::types::StudentId;
use students_db::models::student::Student;
use students_db::{InMemoryStudentStore, StoreError, StudentStore};

/// A well-formed identifier that no test ever inserts.
pub const MISSING_ID: &str = "65f1c2a9b3d4e5f60718293a";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "MONGO_URI" => Some("mongodb://localhost:27017".to_string()),
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("0".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Build the full application router around the given store.
///
/// Uses the same `build_app_router` as `main.rs` so tests exercise the
/// production middleware stack.
pub fn build_test_app(store: Arc<InMemoryStudentStore>) -> Router {
    build_test_app_with(store, test_config())
}

/// Build the router around any store and an explicit configuration.
pub fn build_test_app_with(students: Arc<dyn StudentStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(students, config.clone()), &config)
}

/// A store whose calls never complete.
pub struct StalledStudentStore;

#[async_trait]
impl StudentStore for StalledStudentStore {
    async fn insert(&self, _input: &CreateStudent) -> Result<StudentId, StoreError> {
        pending().await
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        pending().await
    }

    async fn find_by_id(&self, _id: &StudentId) -> Result<Option<Student>, StoreError> {
        pending().await
    }

    async fn update(&self, _id: &StudentId, _patch: &StudentPatch) -> Result<bool, StoreError> {
        pending().await
    }

    async fn delete(&self, _id: &StudentId) -> Result<bool, StoreError> {
        pending().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        pending().await
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_raw(app, method, uri, &body.to_string()).await
}

/// Send a body verbatim with a JSON content type.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a student through the API and return its id.
pub async fn create_student(app: Router, body: serde_json::Value) -> String {
    let response = post_json(app, "/api/students", body).await;
    assert_eq!(response.status(), 201);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
