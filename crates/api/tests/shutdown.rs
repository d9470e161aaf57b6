//! Tests for the bounded graceful shutdown of the serve loop.

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use students_api::server::serve_until_shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn listener() -> (TcpListener, std::net::SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

#[tokio::test]
async fn idle_server_stops_on_signal() {
    let (listener, _) = listener().await;
    let (tx, rx) = oneshot::channel::<()>();
    let app = Router::new().route("/", get(|| async { "hi" }));

    let server = tokio::spawn(serve_until_shutdown(
        listener,
        app,
        Duration::from_secs(5),
        async {
            rx.await.ok();
        },
    ));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn in_flight_request_completes_within_grace() {
    let (listener, addr) = listener().await;
    let (tx, rx) = oneshot::channel::<()>();
    let app = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "done"
        }),
    );

    let server = tokio::spawn(serve_until_shutdown(
        listener,
        app,
        Duration::from_secs(5),
        async {
            rx.await.ok();
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("done"));

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn stalled_request_is_cut_off_after_grace() {
    let (listener, addr) = listener().await;
    let (tx, rx) = oneshot::channel::<()>();
    let app = Router::new().route(
        "/stuck",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "never"
        }),
    );

    let server = tokio::spawn(serve_until_shutdown(
        listener,
        app,
        Duration::from_millis(100),
        async {
            rx.await.ok();
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /stuck HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("shutdown was not bounded by the grace period")
        .unwrap();
    assert!(result.is_ok());
}
