use std::time::Duration;

/// Failures surfaced by a [`StudentStore`](crate::StudentStore).
///
/// Timeouts and connection loss are kept apart from driver errors so callers
/// can log them differently, even though the HTTP layer currently renders
/// all of them as a 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The unique index on `email` rejected the write.
    #[error("Student with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),

    #[error("{0}")]
    Internal(String),
}
