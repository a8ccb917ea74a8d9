//! # Factory Lifecycle
//!
//! Starting, wiring and stopping the whole production line.
//!
//! The supervisor, the pool and the robots depend on each other in a loop: robots
//! need a supervisor client to buy new robots, and the supervisor needs the robots'
//! context to spawn them. As with any actor system, the loop is broken by late
//! binding:
//!
//! ```rust,ignore
//! // 1. Create the supervisor and its client (no context yet)
//! let (supervisor, client) = Supervisor::<Robot>::new(SUPERVISOR_BUFFER, cap, shutdown.clone());
//!
//! // 2. Inject the context, which itself carries a client clone
//! let handle = tokio::spawn(supervisor.run(FactoryContext { supervisor: client.clone(), .. }));
//!
//! // 3. Seed the population through the same client
//! client.spawn().await?;
//! ```
//!
//! Because every robot holds a client, the supervisor's channel never closes on its
//! own. Shutdown is always explicit: the population cap or
//! [`Factory::request_shutdown`] trips the shared latch.

pub mod factory;

pub use factory::*;
