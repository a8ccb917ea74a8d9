//! # Framework Errors
//!
//! Common error types shared by the supervisor, its clients and the worker loop.

/// Errors that can occur within the worker framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Supervisor closed")]
    SupervisorClosed,
    #[error("Supervisor dropped response channel")]
    SupervisorDropped,
    #[error("Supervisor is shutting down")]
    ShuttingDown,
    #[error("Worker cancelled")]
    Cancelled,
    #[error("Worker error: {0}")]
    WorkerError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns `true` for the errors that mean "the population is going away".
    ///
    /// A worker that sees one of these should stop its loop quietly instead of
    /// reporting a failure.
    pub fn is_shutdown(&self) -> bool {
        matches!(
            self,
            FrameworkError::Cancelled
                | FrameworkError::ShuttingDown
                | FrameworkError::SupervisorClosed
                | FrameworkError::SupervisorDropped
        )
    }
}
