//! # greeter-client
//!
//! Sends one `SayHello` call and prints the reply message on stdout.
//! Exits with code 1 if the server cannot be reached or the call fails.
use clap::Parser;
use greeter::{
    cli::ClientCli,
    config::{ClientSettings, ConfigError},
    telemetry,
};
use greeter_core::{
    GreeterClient,
    greet_service::HelloRequest,
    observer::{Observer, TracingObserver},
};
use std::{process, sync::Arc};
use tracing::error;

#[tokio::main]
async fn main() {
    let args = ClientCli::parse();
    telemetry::init();

    let settings = settings_or_exit();
    let observer: Arc<dyn Observer> = Arc::new(TracingObserver);

    let mut client = match GreeterClient::connect(&settings.address, observer).await {
        Ok(client) => client,
        Err(err) => {
            error!(%err, "connection failed");
            process::exit(1);
        }
    };

    // The observer has already logged the failure reason.
    match client
        .greet(HelloRequest::new(args.name), settings.timeout)
        .await
    {
        Ok(reply) => println!("{}", reply.message),
        Err(_) => process::exit(1),
    }
}

fn settings_or_exit() -> ClientSettings {
    ClientSettings::from_env().unwrap_or_else(|err: ConfigError| {
        error!(%err, "invalid configuration");
        process::exit(1)
    })
}
