//! Serve loop with bounded graceful shutdown.

use std::future::Future;
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

/// Serve `app` on `listener` until `signal` resolves.
///
/// Once the signal fires the listener stops accepting connections and
/// in-flight requests get `grace` to finish. Anything still running after
/// that is dropped. If the server stops on its own before the signal, its
/// error is returned immediately.
pub async fn serve_until_shutdown<F>(
    listener: TcpListener,
    app: Router,
    grace: Duration,
    signal: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let token = CancellationToken::new();
    let server_token = token.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_token.cancelled().await })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            tracing::error!("Server stopped before a shutdown signal was received");
            return flatten(joined);
        }
        () = signal => {
            tracing::info!("Shutting down the server");
        }
    }

    token.cancel();
    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => {
            flatten(joined)?;
            tracing::info!("Server shut down gracefully");
        }
        Err(_) => {
            tracing::warn!(?grace, "In-flight requests did not finish in time, forcing close");
            server.abort();
        }
    }
    Ok(())
}

fn flatten(joined: Result<io::Result<()>, JoinError>) -> io::Result<()> {
    joined.map_err(io::Error::other)?
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager. If a handler cannot be installed, that source is ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
