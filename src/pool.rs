//! # Resource Pool
//!
//! The shared economy every robot reads and writes.
//!
//! Each counter sits behind its own [`Mutex`]. A transaction locks exactly the
//! counters it touches, always in [`Resource::LOCK_ORDER`] (`foo → bar → money →
//! foobar`), checks its precondition under those locks, mutates, and releases them
//! when the guards drop. Two consequences:
//!
//! - **No deadlock**: every thread climbs the same lock ladder, so no cycle of waiters
//!   can form no matter how many robots run.
//! - **No torn reads**: a multi-counter transaction holds all of its locks before the
//!   first write, and [`ResourcePool::snapshot`] holds all four at once.
//!
//! Transactions are synchronous and never hold a lock across an `.await`, so a
//! cancelled robot can never leave the pool half-updated.

use crate::model::{Resource, Stock, MAX_FOOBAR_SALE, ROBOT_COST_FOO, ROBOT_COST_MONEY};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ResourcePool {
    foo: Mutex<u32>,
    bar: Mutex<u32>,
    money: Mutex<u32>,
    foobar: Mutex<u32>,
}

/// Counters each transaction locks, in acquisition order.
const FOO_BAR_LOCKS: [Resource; 2] = [Resource::Foo, Resource::Bar];
const SALE_LOCKS: [Resource; 2] = [Resource::Money, Resource::Foobar];
const PURCHASE_LOCKS: [Resource; 2] = [Resource::Foo, Resource::Money];
const SNAPSHOT_LOCKS: [Resource; 4] = Resource::LOCK_ORDER;

/// Locks one counter.
///
/// A poisoned lock still holds a valid count: every write is a single store made
/// after its precondition check.
fn lock(counter: &Mutex<u32>) -> MutexGuard<'_, u32> {
    counter.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResourcePool {
    pub fn new(initial: Stock) -> Self {
        Self {
            foo: Mutex::new(initial.foo),
            bar: Mutex::new(initial.bar),
            money: Mutex::new(initial.money),
            foobar: Mutex::new(initial.foobar),
        }
    }

    fn counter(&self, resource: Resource) -> &Mutex<u32> {
        match resource {
            Resource::Foo => &self.foo,
            Resource::Bar => &self.bar,
            Resource::Money => &self.money,
            Resource::Foobar => &self.foobar,
        }
    }

    /// Locks several counters, first to last. Every multi-counter transaction goes
    /// through here, so the lock order is checked in one place.
    fn lock_all<const N: usize>(&self, resources: [Resource; N]) -> [MutexGuard<'_, u32>; N] {
        debug_assert!(
            resources.windows(2).all(|pair| pair[0] < pair[1]),
            "locks taken out of order: {resources:?}"
        );
        resources.map(|resource| lock(self.counter(resource)))
    }

    /// Consistent view of all four counters.
    pub fn snapshot(&self) -> Stock {
        let [foo, bar, money, foobar] = self.lock_all(SNAPSHOT_LOCKS);
        Stock {
            foo: *foo,
            bar: *bar,
            foobar: *foobar,
            money: *money,
        }
    }

    /// Adds to a single counter. Mining results and crafting outcomes land here.
    pub fn deposit(&self, resource: Resource, amount: u32) {
        let mut count = lock(self.counter(resource));
        *count = count.saturating_add(amount);
        debug!(%resource, amount, total = *count, "Deposit");
    }

    pub fn credit_foobar(&self, amount: u32) {
        self.deposit(Resource::Foobar, amount);
    }

    /// Gives back the bar of a failed foobar assembly.
    pub fn refund_bar(&self, amount: u32) {
        self.deposit(Resource::Bar, amount);
    }

    /// Takes one foo and one bar, or nothing at all.
    pub fn try_consume_foo_bar(&self) -> bool {
        let [mut foo, mut bar] = self.lock_all(FOO_BAR_LOCKS);
        if *foo == 0 || *bar == 0 {
            return false;
        }
        *foo -= 1;
        *bar -= 1;
        true
    }

    /// Sells a batch of foobar: `money += k`, `foobar -= k`.
    ///
    /// `pick` receives the largest allowed batch, `min(MAX_FOOBAR_SALE, foobar)`, and
    /// returns the batch size; it is clamped to `1..=max`. Returns `None` without
    /// touching anything when there is no foobar to sell.
    pub fn sell_foobar(&self, pick: impl FnOnce(u32) -> u32) -> Option<u32> {
        let [mut money, mut foobar] = self.lock_all(SALE_LOCKS);
        if *foobar == 0 {
            return None;
        }
        let max = (*foobar).min(MAX_FOOBAR_SALE);
        let sold = pick(max).clamp(1, max);
        *foobar -= sold;
        *money = money.saturating_add(sold);
        Some(sold)
    }

    /// Pays for a new robot: takes `ROBOT_COST_MONEY` money and `ROBOT_COST_FOO` foo,
    /// or nothing at all.
    pub fn try_buy_robot(&self) -> bool {
        let [mut foo, mut money] = self.lock_all(PURCHASE_LOCKS);
        if *money < ROBOT_COST_MONEY || *foo < ROBOT_COST_FOO {
            return false;
        }
        *money -= ROBOT_COST_MONEY;
        *foo -= ROBOT_COST_FOO;
        true
    }

    /// Gives back the price of a robot whose spawn was refused.
    pub fn refund_robot(&self) {
        let [mut foo, mut money] = self.lock_all(PURCHASE_LOCKS);
        *foo = foo.saturating_add(ROBOT_COST_FOO);
        *money = money.saturating_add(ROBOT_COST_MONEY);
    }
}
