use crate::clock::SimClock;
use crate::config::FactoryConfig;
use crate::error::FactoryError;
use crate::pool::ResourcePool;
use crate::robot::{FactoryContext, Robot, RobotId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use worker_framework::{
    ShutdownReason, ShutdownReport, ShutdownSignal, Supervisor, SupervisorClient,
};

/// Capacity of the supervisor's request channel.
pub const SUPERVISOR_BUFFER: usize = 32;

/// The running production line.
///
/// `Factory` owns the shared pool, the shutdown latch and the supervisor task. It is
/// the only place the three are wired together.
///
/// # Example
///
/// ```ignore
/// let factory = Factory::start(FactoryConfig::default()).await?;
///
/// // Stop early, or let the population cap do it
/// factory.request_shutdown();
///
/// let report = factory.wait().await?;
/// ```
pub struct Factory {
    pool: Arc<ResourcePool>,
    supervisor: SupervisorClient<Robot>,
    shutdown: ShutdownSignal,
    handle: JoinHandle<ShutdownReport<RobotId>>,
}

impl Factory {
    /// Validates the configuration, starts the supervisor and spawns the initial
    /// robots.
    pub async fn start(config: FactoryConfig) -> Result<Self, FactoryError> {
        config.validate()?;
        let clock = SimClock::new(config.speed)?;
        let pool = Arc::new(ResourcePool::new(config.initial_stock.stock()));
        let shutdown = ShutdownSignal::new();

        let (supervisor, client) =
            Supervisor::<Robot>::new(SUPERVISOR_BUFFER, config.population_cap, shutdown.clone());
        let context = FactoryContext {
            pool: pool.clone(),
            supervisor: client.clone(),
            clock,
            seed: config.seed,
        };
        let handle = tokio::spawn(supervisor.run(context));

        info!(
            speed = config.speed,
            population_cap = config.population_cap,
            initial_robots = config.initial_robots,
            "Factory opening"
        );

        for _ in 0..config.initial_robots {
            if let Err(e) = client.spawn().await {
                error!(error = %e, "Failed to spawn initial robot");
                shutdown.trigger(ShutdownReason::Requested);
                return Err(e.into());
            }
        }

        Ok(Self {
            pool,
            supervisor: client,
            shutdown,
            handle,
        })
    }

    pub fn pool(&self) -> Arc<ResourcePool> {
        self.pool.clone()
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Asks the factory to stop. Returns `false` if it was already stopping.
    pub fn request_shutdown(&self) -> bool {
        self.shutdown.trigger(ShutdownReason::Requested)
    }

    /// Every robot registered so far, oldest first.
    pub async fn roster(&self) -> Result<Vec<RobotId>, FactoryError> {
        Ok(self.supervisor.roster().await?)
    }

    /// Waits until every robot has stopped and logs the final roster.
    pub async fn wait(self) -> Result<ShutdownReport<RobotId>, FactoryError> {
        let report = self
            .handle
            .await
            .map_err(|e| FactoryError::SupervisorFailed(e.to_string()))?;

        info!("The last {} working robots are:", report.roster.len());
        for robot in &report.roster {
            info!("{robot}");
        }
        Ok(report)
    }
}
