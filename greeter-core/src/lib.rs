//! # Greeter Core
//!
//! `greeter-core` is the library behind the `greeter-server` and `greeter-client`
//! binaries. It serves and calls the `greet.Greeter` gRPC service defined in
//! the `greet-service` crate.
//!
//! ## Key Components
//!
//! * **[`Server`] & [`BoundServer`](server::BoundServer):** Bind a TCP listener, then serve
//!   the registered routes on it until shutdown.
//! * **[`ServiceRouter`](router::ServiceRouter):** The dispatch table mapping gRPC paths to
//!   handlers. Unknown paths answer `Unimplemented`.
//! * **[`GreeterService`](service::GreeterService):** The default handler.
//! * **[`GreeterClient`]:** Connects to a server and calls `SayHello` under a deadline.
//! * **[`Observer`](observer::Observer):** The observability collaborator injected into
//!   both sides. [`TracingObserver`](observer::TracingObserver) forwards everything to `tracing`.
//!
//! ## Re-exports
//!
//! This crate re-exports `greet-service` and `tonic` so consumers use the same
//! message types and transport version.
pub mod client;
pub mod observer;
pub mod router;
pub mod server;
pub mod service;

pub use client::GreeterClient;
pub use server::Server;

// Re-exports
pub use greet_service;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
