//! Command-line and runtime configuration.
//!
//! [`Cli`] is the clap surface of the binary. It resolves into a plain
//! [`FactoryConfig`], which is all the factory itself ever sees, so tests can build
//! configurations directly without going through argument parsing.

use crate::error::FactoryError;
use crate::model::Stock;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// What the pool holds before the first robot starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum InitialStock {
    /// Every counter at zero.
    #[default]
    Empty,
    /// One foo and one bar.
    Seeded,
}

impl InitialStock {
    pub fn stock(self) -> Stock {
        match self {
            InitialStock::Empty => Stock::EMPTY,
            InitialStock::Seeded => Stock::SEEDED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Divisor applied to every simulated duration.
    pub speed: u32,
    /// Registry size that shuts the factory down.
    pub population_cap: usize,
    pub initial_robots: usize,
    pub initial_stock: InitialStock,
    /// Seed for the robots' action choices; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            speed: 1,
            population_cap: 30,
            initial_robots: 2,
            initial_stock: InitialStock::Empty,
            seed: None,
        }
    }
}

impl FactoryConfig {
    pub fn validate(&self) -> Result<(), FactoryError> {
        if self.speed == 0 {
            return Err(FactoryError::InvalidSpeed(self.speed));
        }
        if self.population_cap == 0
            || self.initial_robots == 0
            || self.initial_robots > self.population_cap
        {
            return Err(FactoryError::InvalidPopulation {
                initial: self.initial_robots,
                cap: self.population_cap,
            });
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(name = "foobartory")]
#[command(about = "Robots mine foo and bar, assemble foobar, sell it and buy more robots")]
#[command(
    after_help = "The factory stops on its own once the population cap is reached. Press Ctrl+C to stop it early."
)]
pub struct Cli {
    /// Speed factor: every duration is divided by this value
    #[arg(short, long, env = "FOOBARTORY_SPEED", default_value_t = 1)]
    pub speed: u32,

    /// Number of robots at which the factory shuts down
    #[arg(long, default_value_t = 30)]
    pub population_cap: usize,

    /// Robots working when the factory opens
    #[arg(long, default_value_t = 2)]
    pub initial_robots: usize,

    /// Contents of the store when the factory opens
    #[arg(long, value_enum, default_value_t = InitialStock::Empty)]
    pub initial_stock: InitialStock,

    /// Random seed for reproducible runs (uses OS entropy if not specified)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<Cli> for FactoryConfig {
    fn from(cli: Cli) -> Self {
        Self {
            speed: cli.speed,
            population_cap: cli.population_cap,
            initial_robots: cli.initial_robots,
            initial_stock: cli.initial_stock,
            seed: cli.seed,
        }
    }
}
