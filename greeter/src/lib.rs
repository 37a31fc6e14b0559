//! # Greeter CLI
//!
//! Shared pieces of the `greeter-server` and `greeter-client` binaries:
//!
//! * [`cli`]: argument parsing with `clap`.
//! * [`config`]: settings read from the environment.
//! * [`telemetry`]: the `tracing` subscriber both binaries install.
pub mod cli;
pub mod config;
pub mod telemetry;
