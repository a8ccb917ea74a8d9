//! # Shutdown Latch
//!
//! [`ShutdownSignal`] is the single cancellation source shared by the supervisor and
//! every worker it spawns. It is a one-shot latch: the first call to
//! [`ShutdownSignal::trigger`] records its [`ShutdownReason`] and wakes every waiter,
//! later calls are no-ops that return `false`.
//!
//! Workers never poll the latch in a busy loop. Every suspension point goes through
//! [`ShutdownSignal::sleep`] (or an explicit [`ShutdownSignal::cancelled`] race), so a
//! trigger takes effect the next time a worker would have yielded anyway.
//!
//! ```rust,ignore
//! let shutdown = ShutdownSignal::new();
//!
//! // Inside a worker cycle
//! shutdown.sleep(Duration::from_secs(2)).await?; // Err(FrameworkError::Cancelled) once triggered
//!
//! // From a Ctrl+C handler
//! shutdown.trigger(ShutdownReason::Requested);
//! ```

use crate::error::FrameworkError;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Why the population was shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The registry reached the configured population cap.
    PopulationCap { population: usize },
    /// An external request (e.g. Ctrl+C) asked the system to stop.
    Requested,
    /// Every client of the supervisor was dropped.
    Closed,
}

impl Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::PopulationCap { population } => {
                write!(f, "population cap reached ({population} workers)")
            }
            ShutdownReason::Requested => write!(f, "shutdown requested"),
            ShutdownReason::Closed => write!(f, "supervisor channel closed"),
        }
    }
}

/// Cloneable one-shot cancellation latch.
#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    state: Arc<watch::Sender<Option<ShutdownReason>>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
        }
    }

    /// Trips the latch.
    ///
    /// Returns `true` only for the call that actually triggered the shutdown, so
    /// concurrent triggers (population cap racing Ctrl+C) resolve to a single reason.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        let first = self.state.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
        if first {
            tracing::info!(%reason, "Shutdown triggered");
        } else {
            tracing::debug!(%reason, "Shutdown already in progress");
        }
        first
    }

    pub fn is_triggered(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// The reason recorded by the first trigger, if any.
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.state.borrow()
    }

    /// Resolves once the latch has been triggered.
    pub async fn cancelled(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so this can only resolve through the predicate.
        let _ = receiver.wait_for(Option::is_some).await;
    }

    /// Cancellable sleep: the suspension point every worker delay goes through.
    pub async fn sleep(&self, duration: Duration) -> Result<(), FrameworkError> {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(FrameworkError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_wins() {
        let shutdown = ShutdownSignal::new();
        assert!(!shutdown.is_triggered());
        assert_eq!(shutdown.reason(), None);

        assert!(shutdown.trigger(ShutdownReason::PopulationCap { population: 30 }));
        assert!(!shutdown.trigger(ShutdownReason::Requested));

        assert!(shutdown.is_triggered());
        assert_eq!(
            shutdown.reason(),
            Some(ShutdownReason::PopulationCap { population: 30 })
        );
    }

    #[test]
    fn test_clones_share_the_latch() {
        let shutdown = ShutdownSignal::new();
        let other = shutdown.clone();
        other.trigger(ShutdownReason::Requested);
        assert_eq!(shutdown.reason(), Some(ShutdownReason::Requested));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes_without_trigger() {
        let shutdown = ShutdownSignal::new();
        assert!(shutdown.sleep(Duration::from_secs(10)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_is_interrupted_by_trigger() {
        let shutdown = ShutdownSignal::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.trigger(ShutdownReason::Requested);
        });

        let started = tokio::time::Instant::now();
        let result = shutdown.sleep(Duration::from_secs(3600)).await;
        assert!(matches!(result, Err(FrameworkError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_sleep_after_trigger_returns_immediately() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger(ShutdownReason::Requested);
        let result = shutdown.sleep(Duration::from_secs(3600)).await;
        assert!(matches!(result, Err(FrameworkError::Cancelled)));
    }
}
