//! # Worker Trait
//!
//! The contract a type must satisfy to be spawned and supervised by a
//! [`Supervisor`](crate::Supervisor).

use crate::error::FrameworkError;
use crate::shutdown::ShutdownSignal;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any long-running agent must implement to be managed by a [`Supervisor`](crate::Supervisor).
///
/// # Architecture Note
/// A worker is an indefinitely looping unit of work. The framework owns the loop
/// (see [`Worker::cycle`]): it calls `cycle` until the shutdown latch trips or the
/// worker reports a failure. The worker owns only its private state; everything it
/// shares with its siblings arrives through the injected [`Worker::Context`].
///
/// # Context Injection
/// The `Context` is handed to the supervisor's `run()` and cloned into every
/// worker it spawns. It usually carries shared handles and a
/// [`SupervisorClient`](crate::SupervisorClient), which lets a worker spawn
/// siblings without owning the registry.
#[async_trait]
pub trait Worker: Send + 'static {
    /// Unique identity assigned by the supervisor.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// Dependencies shared by every worker of the population.
    type Context: Clone + Send + Sync + 'static;

    /// Builds a fresh worker for the given identity.
    /// Called by the supervisor while it holds the registry, so it must not block.
    fn from_id(id: Self::Id, ctx: &Self::Context) -> Self;

    fn id(&self) -> &Self::Id;

    /// Runs one decision cycle.
    ///
    /// Every suspension inside a cycle must go through `shutdown` (typically
    /// [`ShutdownSignal::sleep`]) so that cancellation is observed promptly.
    /// Returning [`FrameworkError::Cancelled`] ends the loop quietly; any other error
    /// ends this worker's loop and is logged as a failure.
    async fn cycle(
        &mut self,
        ctx: &Self::Context,
        shutdown: &ShutdownSignal,
    ) -> Result<(), FrameworkError>;
}
