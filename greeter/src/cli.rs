//! # CLI
//!
//! Command-line interfaces of both binaries. They are deliberately flag free:
//! the client takes one optional positional name, the server takes nothing.
//! Addresses and timeouts come from the environment (see [`crate::config`]).
use clap::Parser;

/// Name greeted when none is given.
pub const DEFAULT_NAME: &str = "world";

#[derive(Parser, Debug)]
#[command(
    name = "greeter-client",
    version,
    about = "Call greet.Greeter/SayHello and print the reply",
    after_help = "Environment: GREETER_ADDRESS, GREETER_TIMEOUT_MS, RUST_LOG"
)]
pub struct ClientCli {
    /// The name to greet (any text, including text starting with '-')
    #[arg(default_value = DEFAULT_NAME, allow_hyphen_values = true)]
    pub name: String,
}

#[derive(Parser, Debug)]
#[command(
    name = "greeter-server",
    version,
    about = "Serve the greet.Greeter gRPC service",
    after_help = "Environment: GREETER_ADDRESS, GREETER_REFLECTION, RUST_LOG"
)]
pub struct ServerCli {}
