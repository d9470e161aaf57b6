//! Lifecycle of the process-wide MongoDB connection.

use std::sync::atomic::{AtomicBool, Ordering};

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

use crate::error::StoreError;
use crate::models::student::Student;
use crate::timeout::{CONNECT_TIMEOUT, DISCONNECT_TIMEOUT};
use crate::STUDENTS_COLLECTION;

/// Owns the MongoDB client for the lifetime of the process.
///
/// A gateway only exists once [`MongoGateway::connect`] has succeeded, so
/// collection access can never happen on an unconnected handle. The driver
/// pools connections internally and the handle is safe to share between
/// request tasks without extra locking.
pub struct MongoGateway {
    client: Client,
    database: Database,
    closed: AtomicBool,
}

impl MongoGateway {
    /// Connect to `uri` and verify liveness with a ping.
    ///
    /// The whole sequence is bounded by [`CONNECT_TIMEOUT`]; an unreachable
    /// server or a failed ping yields [`StoreError::Connection`].
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let attempt = async {
            let client = Client::with_uri_str(uri)
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            let database = client.database(database);
            database
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            Ok(Self {
                client,
                database,
                closed: AtomicBool::new(false),
            })
        };

        match tokio::time::timeout(CONNECT_TIMEOUT, attempt).await {
            Ok(Ok(gateway)) => {
                tracing::info!(database = %gateway.database.name(), "Connected to MongoDB");
                Ok(gateway)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(StoreError::Connection(format!(
                "ping did not complete within {CONNECT_TIMEOUT:?}"
            ))),
        }
    }

    /// Handle to the `students` collection.
    pub fn students(&self) -> Collection<Student> {
        self.database.collection(STUDENTS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Release the connection, waiting at most [`DISCONNECT_TIMEOUT`].
    ///
    /// Safe to call more than once; only the first call does anything.
    /// Failures are logged and swallowed.
    pub async fn disconnect(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let client = self.client.clone();
        let shutdown = async move { client.shutdown().await };
        match tokio::time::timeout(DISCONNECT_TIMEOUT, shutdown).await {
            Ok(()) => tracing::info!("MongoDB client disconnected"),
            Err(_) => tracing::error!(
                timeout = ?DISCONNECT_TIMEOUT,
                "Failed to disconnect MongoDB client within grace period"
            ),
        }
    }
}
