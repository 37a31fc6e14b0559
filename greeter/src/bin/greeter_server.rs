//! # greeter-server
//!
//! Serves `greet.Greeter` until Ctrl-C.
//!
//! 1. **Initialization**: Parses the (empty) command line and reads the environment.
//! 2. **Bind**: Acquires the listener. An unavailable address ends the process with exit code 1.
//! 3. **Serve**: Runs until Ctrl-C, then shuts down gracefully.
use clap::Parser;
use greeter::{cli::ServerCli, config::ServerSettings, telemetry};
use greeter_core::{Server, observer::TracingObserver};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = ServerCli::parse();
    telemetry::init();

    let settings = ServerSettings::from_env()?;

    let server = Server::new(Arc::new(TracingObserver))
        .reflection(settings.reflection)
        .bind(&settings.address)
        .await?;

    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
