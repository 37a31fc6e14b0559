//! # Observability
//!
//! The server and the client never log directly. They report what happens to
//! an [`Observer`] handed to them at construction; the binaries pass a
//! [`TracingObserver`], tests pass whatever they want to inspect.
use crate::client::CallError;
use greet_service::HelloReply;
use std::net::SocketAddr;

/// Receives the notable events of the server and the client.
///
/// Every method has an empty default so implementors only pick what they need.
pub trait Observer: Send + Sync + 'static {
    /// The server listener is bound and about to accept connections.
    fn listening(&self, _addr: SocketAddr) {}

    /// The server received a call for `method` carrying `name`.
    fn call_received(&self, _method: &str, _name: &str) {}

    /// The client established its connection.
    fn connected(&self, _addr: &str) {}

    /// The client received a reply.
    fn reply_received(&self, _reply: &HelloReply) {}

    /// A client call ended in an error.
    fn call_failed(&self, _error: &CallError) {}
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn listening(&self, addr: SocketAddr) {
        tracing::info!(%addr, "server listening");
    }

    fn call_received(&self, method: &str, name: &str) {
        tracing::info!(method, name, "received call");
    }

    fn connected(&self, addr: &str) {
        tracing::debug!(addr, "connected");
    }

    fn reply_received(&self, reply: &HelloReply) {
        tracing::info!(message = %reply.message, "received reply");
    }

    fn call_failed(&self, error: &CallError) {
        tracing::warn!(%error, "call failed");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
