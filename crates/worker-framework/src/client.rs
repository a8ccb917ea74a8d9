//! # Supervisor Client
//!
//! Cloneable handle used by the orchestrator and by workers themselves to talk to
//! the supervisor.

use crate::error::FrameworkError;
use crate::message::SupervisorRequest;
use crate::worker::Worker;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A type-safe client for interacting with a [`Supervisor`](crate::Supervisor).
pub struct SupervisorClient<W: Worker> {
    sender: mpsc::Sender<SupervisorRequest<W>>,
}

// Manual impl: a derive would require `W: Clone`.
impl<W: Worker> Clone for SupervisorClient<W> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<W: Worker> SupervisorClient<W> {
    pub fn new(sender: mpsc::Sender<SupervisorRequest<W>>) -> Self {
        Self { sender }
    }

    /// Spawns and registers a new worker, returning its identity.
    ///
    /// Fails with [`FrameworkError::ShuttingDown`] once the shutdown latch has tripped.
    #[instrument(skip(self))]
    pub async fn spawn(&self) -> Result<W::Id, FrameworkError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SupervisorRequest::Spawn { respond_to })
            .await
            .map_err(|_| FrameworkError::SupervisorClosed)?;
        response.await.map_err(|_| FrameworkError::SupervisorDropped)?
    }

    /// Returns every worker registered so far, in spawn order.
    pub async fn roster(&self) -> Result<Vec<W::Id>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SupervisorRequest::Roster { respond_to })
            .await
            .map_err(|_| FrameworkError::SupervisorClosed)?;
        response.await.map_err(|_| FrameworkError::SupervisorDropped)?
    }
}
