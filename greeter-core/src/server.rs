//! # Greeter Server
//!
//! Serving happens in two steps so that an unavailable address is reported
//! before anything starts:
//!
//! 1. [`Server::bind`] acquires the TCP listener and yields a [`BoundServer`].
//! 2. [`BoundServer::serve`] (or [`BoundServer::serve_with_shutdown`]) runs the
//!    gRPC transport on that listener.
//!
//! The transport may run several calls at the same time. Handlers share no
//! mutable state, so nothing is locked.
//!
//! ## Example
//!
//! ```rust,no_run
//! use greeter_core::{Server, observer::TracingObserver};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Server::new(Arc::new(TracingObserver)).bind("0.0.0.0:50051").await?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```
use crate::{
    observer::Observer,
    router::{ServiceRouter, greeter_router},
    service::GreeterService,
};
use greet_service::{Greeter, file_descriptor_set};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server as TransportServer;

/// Errors that can occur while binding or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Failed to bind '{addr}': {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("Failed to build the reflection service: '{0}'")]
    Reflection(#[from] tonic_reflection::server::Error),
    #[error("Server transport failure: '{0}'")]
    Transport(#[from] tonic::transport::Error),
}

/// A not yet bound server.
pub struct Server {
    router: ServiceRouter,
    observer: Arc<dyn Observer>,
    reflection: bool,
}

impl Server {
    /// Creates a server answering with the default [`GreeterService`].
    pub fn new(observer: Arc<dyn Observer>) -> Self {
        let greeter = GreeterService::new(Arc::clone(&observer));
        Self::with_greeter(Arc::new(greeter), observer)
    }

    /// Creates a server answering with a custom [`Greeter`] implementation.
    pub fn with_greeter<G>(greeter: Arc<G>, observer: Arc<dyn Observer>) -> Self
    where
        G: Greeter + ?Sized,
    {
        Self::with_router(greeter_router(greeter), observer)
    }

    /// Creates a server dispatching on an arbitrary route table.
    pub fn with_router(router: ServiceRouter, observer: Arc<dyn Observer>) -> Self {
        Self {
            router,
            observer,
            reflection: true,
        }
    }

    /// Enables or disables the gRPC server reflection service (enabled by default).
    pub fn reflection(mut self, enabled: bool) -> Self {
        self.reflection = enabled;
        self
    }

    /// Binds the listener on `addr` (e.g. `0.0.0.0:50051`, or port `0` for an ephemeral one).
    ///
    /// Fails with [`ServeError::Bind`] if the address is in use or unavailable.
    pub async fn bind(self, addr: &str) -> Result<BoundServer, ServeError> {
        let bind_error = |source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        };

        let listener = TcpListener::bind(addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        Ok(BoundServer {
            listener,
            local_addr,
            router: self.router,
            observer: self.observer,
            reflection: self.reflection,
        })
    }
}

/// A server holding its listener, ready to serve.
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: ServiceRouter,
    observer: Arc<dyn Observer>,
    reflection: bool,
}

impl BoundServer {
    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves until the process terminates or the transport fails.
    pub async fn serve(self) -> Result<(), ServeError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serves until `signal` resolves, then stops accepting connections and
    /// lets the open ones finish.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()>,
    {
        let reflection = if self.reflection {
            Some(
                tonic_reflection::server::Builder::configure()
                    .register_file_descriptor_set(file_descriptor_set())
                    .build_v1()?,
            )
        } else {
            None
        };

        self.observer.listening(self.local_addr);

        TransportServer::builder()
            .add_service(self.router)
            .add_optional_service(reflection)
            .serve_with_incoming_shutdown(TcpListenerStream::new(self.listener), signal)
            .await?;

        Ok(())
    }
}
