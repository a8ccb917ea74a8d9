use clap::Parser;
use foobartory::config::{Cli, FactoryConfig};
use foobartory::lifecycle::Factory;
use tracing::{error, info, warn};
use worker_framework::tracing::setup_tracing;
use worker_framework::ShutdownReason;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = FactoryConfig::from(Cli::parse());
    let factory = Factory::start(config).await.map_err(|e| {
        error!(error = %e, "Factory failed to start");
        e.to_string()
    })?;

    let shutdown = factory.shutdown_signal();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                shutdown.trigger(ShutdownReason::Requested);
            }
            Err(e) => warn!(error = %e, "Unable to listen for Ctrl+C"),
        }
    });

    let pool = factory.pool();
    let report = factory.wait().await.map_err(|e| e.to_string())?;

    let stock = pool.snapshot();
    info!(
        reason = %report.reason,
        foo = stock.foo,
        bar = stock.bar,
        money = stock.money,
        foobar = stock.foobar,
        "Factory closed"
    );
    Ok(())
}
