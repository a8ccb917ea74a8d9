//! # Foobartory
//!
//! > **An automated foobar production line.**
//!
//! Robots mine `foo` and `bar`, assemble them into `foobar`, sell `foobar` for money
//! and spend money and `foo` on more robots. The factory shuts itself down once the
//! population reaches its cap (30 by default), or earlier on Ctrl+C.
//!
//! ## 🏗️ Architecture Notes
//!
//! ### 1. One Shared Pool, Many Locks
//! The [`ResourcePool`](pool::ResourcePool) is the only shared mutable state. Each
//! counter has its own lock and every transaction locks in one global order, so
//! robots never deadlock and never see torn state.
//!
//! ### 2. A Supervisor Owns the Population
//! Robots never spawn tasks themselves. Buying a robot sends a request to the
//! [`Supervisor`](worker_framework::Supervisor), which registers the newcomer and
//! checks the cap in a single step.
//!
//! ### 3. Cooperative Cancellation
//! Every delay (relocation, work time) goes through the shared
//! [`ShutdownSignal`](worker_framework::ShutdownSignal). A cancelled robot stops at
//! its next delay, before it touches the pool again.
//!
//! ### 4. Pure Decisions
//! Action selection is a pure function of a stock snapshot plus a seeded RNG (see
//! [`model`]), so it is tested without any runtime.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: counters, actions and the selection policy.
//! - [`pool`]: the lock-ordered resource pool.
//! - [`robot`]: the worker that ties selection and actions together.
//! - [`lifecycle`]: the [`Factory`](lifecycle::Factory) orchestrator.
//! - [`config`] and [`clock`]: command line and simulated time.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Ten times faster than real time, reproducible choices
//! cargo run -- --speed 10 --seed 42
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pool;
pub mod robot;
