//! The five things a robot can do, and the policy that picks one.
//!
//! Selection is split in two so it can be tested without a runtime:
//! [`eligible_actions`] is a pure function of a [`Stock`] snapshot, and
//! [`choose_action`] samples uniformly from it with whatever RNG it is given.

use super::stock::Stock;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Units of simulated time spent walking to a different task.
pub const RELOCATION_UNITS: f64 = 5.0;
/// Price of a new robot.
pub const ROBOT_COST_MONEY: u32 = 3;
pub const ROBOT_COST_FOO: u32 = 6;
/// Largest batch sold by a single `SellFoobar`.
pub const MAX_FOOBAR_SALE: u32 = 5;
/// Chance that assembling a foobar succeeds.
pub const FOOBAR_SUCCESS_RATE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MiningFoo,
    MiningBar,
    MakeFoobar,
    SellFoobar,
    BuyWorker,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MiningFoo,
        Action::MiningBar,
        Action::MakeFoobar,
        Action::SellFoobar,
        Action::BuyWorker,
    ];

    /// Whether this action may be picked given a (possibly stale) snapshot.
    pub fn is_eligible(self, stock: &Stock) -> bool {
        match self {
            Action::MiningFoo | Action::MiningBar => true,
            Action::MakeFoobar => stock.foo > 0 && stock.bar > 0,
            Action::SellFoobar => stock.foobar > 1,
            Action::BuyWorker => stock.money >= ROBOT_COST_MONEY && stock.foo >= ROBOT_COST_FOO,
        }
    }

    /// Unscaled work time of one execution.
    ///
    /// Mining bar takes a random whole number of tenths between 0.5 and 2.0.
    pub fn work_units<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Action::MiningFoo => 1.0,
            Action::MiningBar => f64::from(rng.gen_range(5u32..=20)) / 10.0,
            Action::MakeFoobar => 2.0,
            Action::SellFoobar => 10.0,
            Action::BuyWorker => 0.0,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::MiningFoo => "mining foo",
            Action::MiningBar => "mining bar",
            Action::MakeFoobar => "make foobar",
            Action::SellFoobar => "sell foobar",
            Action::BuyWorker => "buy robot",
        };
        f.write_str(name)
    }
}

pub fn eligible_actions(stock: &Stock) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| action.is_eligible(stock))
        .collect()
}

/// Picks uniformly among the eligible actions. Mining is always eligible.
pub fn choose_action<R: Rng + ?Sized>(stock: &Stock, rng: &mut R) -> Action {
    eligible_actions(stock)
        .choose(rng)
        .copied()
        .unwrap_or(Action::MiningFoo)
}

/// A robot relocates when it switches task, but never before its first one.
pub fn needs_relocation(last: Option<Action>, next: Action) -> bool {
    matches!(last, Some(previous) if previous != next)
}
