//! # Worker Framework
//!
//! Building blocks for running a growing population of autonomous, indefinitely
//! looping workers on Tokio, and for shutting all of them down cleanly.
//!
//! ## Why a Supervisor Actor?
//!
//! Workers spawn other workers. Letting every worker call `tokio::spawn` directly
//! would scatter the population registry across tasks and make "stop at N workers"
//! racy. Instead, one actor owns the registry:
//!
//! - **Single owner**: only the [`Supervisor`] loop mutates the roster.
//! - **Sequential admission**: spawn requests are handled one at a time, so the cap
//!   check and the registration are one step.
//! - **One fan-out target**: the supervisor holds every worker's task handle and
//!   awaits them all on shutdown.
//!
//! ## Cooperative Cancellation
//!
//! A single [`ShutdownSignal`] latch is shared by the supervisor and every worker.
//! Workers route each suspension through it ([`ShutdownSignal::sleep`]), so a
//! shutdown takes effect at the next suspension point and never in the middle of
//! synchronous work. The latch is one-shot: concurrent triggers (cap reached while
//! Ctrl+C arrives) resolve to whichever came first.
//!
//! ## Usage Pattern
//!
//! ```rust,ignore
//! use worker_framework::{ShutdownSignal, Supervisor};
//!
//! let shutdown = ShutdownSignal::new();
//!
//! // 1. Create: the supervisor (server) and its client.
//! let (supervisor, client) = Supervisor::<MyWorker>::new(32, 30, shutdown.clone());
//!
//! // 2. Wire: the context usually carries the client, so workers can spawn siblings.
//! let handle = tokio::spawn(supervisor.run(MyContext { supervisor: client.clone() }));
//!
//! // 3. Seed the population.
//! client.spawn().await?;
//!
//! // 4. Wait for the cap, or trip the latch yourself.
//! shutdown.trigger(ShutdownReason::Requested);
//! let report = handle.await?;
//! ```
//!
//! ## Error Policy
//!
//! A worker whose cycle returns [`FrameworkError::Cancelled`] (or any other
//! shutdown-related error, see [`FrameworkError::is_shutdown`]) stops quietly. Any
//! other error stops **that worker only** and is logged at error level; its
//! siblings keep running.

pub mod client;
pub mod error;
pub mod message;
pub mod shutdown;
pub mod supervisor;
pub mod tracing;
pub mod worker;

// Re-export core types for convenience
pub use client::SupervisorClient;
pub use error::FrameworkError;
pub use message::{Response, SupervisorRequest};
pub use shutdown::{ShutdownReason, ShutdownSignal};
pub use supervisor::{ShutdownReport, Supervisor};
pub use worker::Worker;
