//! Time bounds for database calls.

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

/// Bound for single-document reads and writes.
pub const SINGLE_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound for full collection scans.
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound for the initial connect + ping round-trip.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Grace period granted to the driver when disconnecting.
pub const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `fut`, failing with [`StoreError::Timeout`] if it does not finish
/// within `after`. Expiry drops the in-flight call.
pub async fn bounded<T, F>(
    operation: &'static str,
    after: Duration,
    fut: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, ?after, "Database call timed out");
            Err(StoreError::Timeout { operation, after })
        }
    }
}
