//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the structured logger used by every binary in the
//! workspace.
//!
//! The compact formatter hides the module prefix (`with_target(false)`); workers are
//! identified by their structured `worker` / `robot` fields instead.
//!
//! ```bash
//! # Default: one line per decision, action and spawn
//! cargo run
//!
//! # Only shutdown, failures and cancellations
//! RUST_LOG=warn cargo run
//!
//! # Supervisor request traffic as well
//! RUST_LOG=debug cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` is honoured when set; otherwise the filter defaults to `info`, since a
/// simulation run is meant to be watched.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
