//! # Supervisor Messages
//!
//! The request protocol between [`SupervisorClient`](crate::SupervisorClient) and
//! [`Supervisor`](crate::Supervisor).

use crate::error::FrameworkError;
use crate::worker::Worker;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the supervisor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Requests the supervisor processes, one at a time, in arrival order.
///
/// Because the supervisor is the only owner of the registry, sequential
/// processing is what makes "register then check the cap" a single atomic step.
#[derive(Debug)]
pub enum SupervisorRequest<W: Worker> {
    /// Create, register and schedule a new worker.
    Spawn { respond_to: Response<W::Id> },
    /// Read the registry, oldest worker first.
    Roster { respond_to: Response<Vec<W::Id>> },
}
