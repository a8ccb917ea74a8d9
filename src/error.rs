//! Error types for the factory.

use thiserror::Error;
use worker_framework::FrameworkError;

/// Errors that can occur while configuring or running the factory.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A speed factor of zero would make every duration infinite.
    #[error("Invalid speed factor: {0} (must be at least 1)")]
    InvalidSpeed(u32),

    /// The population cap and the initial population do not fit together.
    #[error("Invalid population: {initial} initial robots with a cap of {cap}")]
    InvalidPopulation { initial: usize, cap: usize },

    /// The supervisor task panicked or was aborted before reporting.
    #[error("Supervisor failed: {0}")]
    SupervisorFailed(String),

    /// An error bubbled up from the worker framework.
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
