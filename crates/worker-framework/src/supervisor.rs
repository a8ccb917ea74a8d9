//! # Population Supervisor
//!
//! This module defines the [`Supervisor`], the actor that owns the population
//! registry. It admits new workers, schedules their loops on the Tokio runtime, and
//! coordinates the shutdown of the whole population.

use crate::client::SupervisorClient;
use crate::error::FrameworkError;
use crate::message::SupervisorRequest;
use crate::shutdown::{ShutdownReason, ShutdownSignal};
use crate::worker::Worker;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// What the supervisor hands back once the population has been shut down.
#[derive(Debug, Clone, PartialEq)]
pub struct ShutdownReport<Id> {
    pub reason: ShutdownReason,
    /// Every worker ever registered, oldest first.
    pub roster: Vec<Id>,
}

/// The actor that owns the population registry.
///
/// # Architecture Note
/// The registry is append-only and lives inside this struct, so nothing but the
/// supervisor's own loop can touch it. Spawn requests are processed one at a time:
/// registering a worker and checking the population cap happen in the same message
/// handler, which is why the cap can only ever fire once and the registry can never
/// overshoot it.
///
/// # Shutdown
/// The loop races incoming requests against the [`ShutdownSignal`]. Once the latch
/// trips (population cap, external request, or every client dropped):
///
/// 1. The request channel is closed and queued requests are refused with
///    [`FrameworkError::ShuttingDown`].
/// 2. Every worker task is awaited. Workers observe the same latch at their next
///    suspension point, so this wait is bounded by the longest single sleep.
pub struct Supervisor<W: Worker> {
    receiver: mpsc::Receiver<SupervisorRequest<W>>,
    roster: Vec<W::Id>,
    handles: Vec<JoinHandle<()>>,
    next_id: u32,
    population_cap: usize,
    shutdown: ShutdownSignal,
}

impl<W: Worker> Supervisor<W> {
    /// Creates a new `Supervisor` and its associated `SupervisorClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel.
    /// * `population_cap` - Registry size that triggers the shutdown.
    /// * `shutdown` - The latch shared with every worker.
    pub fn new(
        buffer_size: usize,
        population_cap: usize,
        shutdown: ShutdownSignal,
    ) -> (Self, SupervisorClient<W>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let supervisor = Self {
            receiver,
            roster: Vec::new(),
            handles: Vec::new(),
            next_id: 1,
            population_cap,
            shutdown,
        };
        (supervisor, SupervisorClient::new(sender))
    }

    /// Runs the supervisor's event loop until the population is shut down.
    ///
    /// The `context` is cloned into every worker spawned by this supervisor.
    pub async fn run(mut self, context: W::Context) -> ShutdownReport<W::Id> {
        info!(population_cap = self.population_cap, "Supervisor started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg, &context),
                    None => {
                        self.shutdown.trigger(ShutdownReason::Closed);
                        break;
                    }
                },
            }
        }

        self.drain().await
    }

    fn handle(&mut self, msg: SupervisorRequest<W>, context: &W::Context) {
        match msg {
            SupervisorRequest::Spawn { respond_to } => {
                let result = self.spawn_and_register(context);
                let _ = respond_to.send(result);
            }
            SupervisorRequest::Roster { respond_to } => {
                debug!(population = self.roster.len(), "Roster");
                let _ = respond_to.send(Ok(self.roster.clone()));
            }
        }
    }

    fn spawn_and_register(&mut self, context: &W::Context) -> Result<W::Id, FrameworkError> {
        if self.shutdown.is_triggered() {
            warn!("Spawn refused: shutting down");
            return Err(FrameworkError::ShuttingDown);
        }

        let id = W::Id::from(self.next_id);
        self.next_id += 1;

        let worker = W::from_id(id.clone(), context);
        self.roster.push(id.clone());
        self.handles.push(tokio::spawn(work(
            worker,
            context.clone(),
            self.shutdown.clone(),
        )));

        let population = self.roster.len();
        info!(worker = %id, population, "Spawned");

        if population >= self.population_cap
            && self
                .shutdown
                .trigger(ShutdownReason::PopulationCap { population })
        {
            info!(population, "Population cap reached");
        }
        Ok(id)
    }

    async fn drain(mut self) -> ShutdownReport<W::Id> {
        let reason = self.shutdown.reason().unwrap_or(ShutdownReason::Closed);
        info!(%reason, population = self.roster.len(), "Shutting down");

        self.receiver.close();
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorRequest::Spawn { respond_to } => {
                    let _ = respond_to.send(Err(FrameworkError::ShuttingDown));
                }
                SupervisorRequest::Roster { respond_to } => {
                    let _ = respond_to.send(Ok(self.roster.clone()));
                }
            }
        }

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!(error = %e, "Worker task failed");
            }
        }

        info!(population = self.roster.len(), "Supervisor shutdown complete");
        ShutdownReport {
            reason,
            roster: self.roster,
        }
    }
}

/// The loop every spawned worker runs.
///
/// A failing worker stops on its own; the rest of the population keeps going.
async fn work<W: Worker>(mut worker: W, context: W::Context, shutdown: ShutdownSignal) {
    debug!(worker = %worker.id(), "Worker started");

    let error = loop {
        if shutdown.is_triggered() {
            break FrameworkError::Cancelled;
        }
        if let Err(e) = worker.cycle(&context, &shutdown).await {
            break e;
        }
        // A cycle may complete without ever suspending.
        tokio::task::yield_now().await;
    };

    if error.is_shutdown() {
        warn!(worker = %worker.id(), "Cancelled");
    } else {
        error!(worker = %worker.id(), error = %error, "Worker failed");
    }
}
