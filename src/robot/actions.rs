//! What each action does to the pool.
//!
//! Every action follows the same shape: optional relocation, then the work
//! duration, then a single pool transaction. Both delays go through the shutdown
//! latch, and the latch is checked once more right before the transaction, so a
//! cancelled robot leaves the pool exactly as it found it. A robot bought while the
//! supervisor is refusing spawns is refunded.

use super::{FactoryContext, Robot};
use crate::model::{needs_relocation, Action, Resource, FOOBAR_SUCCESS_RATE};
use rand::Rng;
use tracing::{info, warn};
use worker_framework::{FrameworkError, ShutdownSignal};

impl Robot {
    /// Runs one action to completion.
    ///
    /// Unmet preconditions are logged and swallowed. Only cancellation and
    /// supervisor failures come back as errors.
    pub async fn perform(
        &mut self,
        action: Action,
        ctx: &FactoryContext,
        shutdown: &ShutdownSignal,
    ) -> Result<(), FrameworkError> {
        if needs_relocation(self.last_action, action) {
            info!(robot = %self.id, "Moving to new task");
            shutdown.sleep(ctx.clock.relocation()).await?;
        }
        self.last_action = Some(action);

        info!(robot = %self.id, %action, "Start");
        let units = action.work_units(&mut self.rng);
        if units > 0.0 {
            shutdown.sleep(ctx.clock.duration(units)).await?;
        }
        // BuyWorker has no delay, so this may be the only place it sees the latch.
        if shutdown.is_triggered() {
            return Err(FrameworkError::Cancelled);
        }

        match action {
            Action::MiningFoo => ctx.pool.deposit(Resource::Foo, 1),
            Action::MiningBar => ctx.pool.deposit(Resource::Bar, 1),
            Action::MakeFoobar => self.make_foobar(ctx),
            Action::SellFoobar => self.sell_foobar(ctx),
            Action::BuyWorker => self.buy_worker(ctx).await?,
        }
        info!(robot = %self.id, %action, "End");
        Ok(())
    }

    fn make_foobar(&mut self, ctx: &FactoryContext) {
        if !ctx.pool.try_consume_foo_bar() {
            warn!(robot = %self.id, "Make foobar: resources unavailable");
            return;
        }
        if self.rng.gen_bool(FOOBAR_SUCCESS_RATE) {
            ctx.pool.credit_foobar(1);
            info!(robot = %self.id, "Make foobar: success");
        } else {
            // The foo is lost, the bar goes back to the store.
            ctx.pool.refund_bar(1);
            warn!(robot = %self.id, "Make foobar: failed");
        }
    }

    fn sell_foobar(&mut self, ctx: &FactoryContext) {
        let rng = &mut self.rng;
        match ctx.pool.sell_foobar(|max| rng.gen_range(1..=max)) {
            Some(sold) => info!(robot = %self.id, sold, "Sold foobar"),
            None => warn!(robot = %self.id, "Sell foobar: resources unavailable"),
        }
    }

    async fn buy_worker(&mut self, ctx: &FactoryContext) -> Result<(), FrameworkError> {
        if !ctx.pool.try_buy_robot() {
            warn!(robot = %self.id, "Buy robot: resources unavailable");
            return Ok(());
        }
        match ctx.supervisor.spawn().await {
            Ok(recruit) => {
                info!(robot = %self.id, %recruit, "Bought robot");
                Ok(())
            }
            Err(e) => {
                // Paid but never delivered: the price goes back to the store.
                ctx.pool.refund_robot();
                warn!(robot = %self.id, error = %e, "Buy robot: spawn refused, refunded");
                Err(e)
            }
        }
    }
}
