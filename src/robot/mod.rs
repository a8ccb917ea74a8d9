//! # Robot Worker
//!
//! A [`Robot`] is one autonomous worker of the factory. Each cycle it reads a
//! snapshot of the pool, picks an eligible action at random and performs it (see
//! [`actions`] for what each action does to the pool).
//!
//! Robots never talk to each other. Everything they share goes through the
//! [`FactoryContext`] injected by the supervisor when the robot is spawned:
//!
//! - the [`ResourcePool`] handle,
//! - a [`SupervisorClient`] used by `BuyWorker` to register a new robot,
//! - the [`SimClock`] that scales every delay.

pub mod actions;

use crate::clock::SimClock;
use crate::model::{choose_action, Action, Stock};
use crate::pool::ResourcePool;
use async_trait::async_trait;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::info;
use worker_framework::{FrameworkError, ShutdownSignal, SupervisorClient, Worker};

/// Identity assigned by the supervisor, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId(pub u32);

impl From<u32> for RobotId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Robot {}", self.0)
    }
}

/// Everything a robot needs from the outside world.
#[derive(Clone)]
pub struct FactoryContext {
    pub pool: Arc<ResourcePool>,
    pub supervisor: SupervisorClient<Robot>,
    pub clock: SimClock,
    /// Base seed; each robot derives its own stream from it.
    pub seed: Option<u64>,
}

pub struct Robot {
    id: RobotId,
    last_action: Option<Action>,
    rng: ChaCha8Rng,
}

impl Robot {
    /// With a seed, the robot's choices depend only on the seed and its identity.
    pub fn new(id: RobotId, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(u64::from(id.0));
                rng
            }
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            id,
            last_action: None,
            rng,
        }
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn choose(&mut self, stock: &Stock) -> Action {
        choose_action(stock, &mut self.rng)
    }
}

#[async_trait]
impl Worker for Robot {
    type Id = RobotId;
    type Context = FactoryContext;

    fn from_id(id: RobotId, ctx: &FactoryContext) -> Self {
        Self::new(id, ctx.seed)
    }

    fn id(&self) -> &RobotId {
        &self.id
    }

    async fn cycle(
        &mut self,
        ctx: &FactoryContext,
        shutdown: &ShutdownSignal,
    ) -> Result<(), FrameworkError> {
        let stock = ctx.pool.snapshot();
        info!(
            robot = %self.id,
            foo = stock.foo,
            bar = stock.bar,
            money = stock.money,
            foobar = stock.foobar,
            "Stock"
        );
        let action = self.choose(&stock);
        self.perform(action, ctx, shutdown).await
    }
}
