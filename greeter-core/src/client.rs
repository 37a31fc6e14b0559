//! # Greeter Client
//!
//! [`GreeterClient`] calls `greet.Greeter/SayHello` on a server.
//!
//! The client is generic over the underlying tonic service so it can talk to a
//! real [`Channel`] as well as to an in-process service (as the tests do).
//!
//! ## Deadlines
//!
//! Every call runs under a deadline enforced on the client side. When it elapses
//! the call resolves with [`CallError::DeadlineExceeded`]; the deadline is not sent
//! to the server, so a handler that is already running completes on its own.
//! Nothing is retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use greeter_core::{GreeterClient, client::DEFAULT_DEADLINE, observer::TracingObserver};
//! use greeter_core::greet_service::HelloRequest;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = GreeterClient::connect("localhost:50051", Arc::new(TracingObserver)).await?;
//! let reply = client.greet(HelloRequest::new("world"), DEFAULT_DEADLINE).await?;
//! println!("{}", reply.message);
//! # Ok(())
//! # }
//! ```
use crate::{BoxError, observer::Observer};
use greet_service::{HelloReply, HelloRequest, SAY_HELLO_PATH};
use http_body::Body as HttpBody;
use std::{sync::Arc, time::Duration};
use tonic::{
    Code, Status,
    client::GrpcService,
    transport::{Channel, Endpoint},
};
use tonic_prost::ProstCodec;

/// Deadline applied to a call when the caller has no better idea.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur when connecting to a server.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// Errors that can occur during a call.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error("Method not implemented by the server: '{}'", .0.message())]
    Unimplemented(Status),
    #[error("Transport failure: {:?} ('{}')", .0.code(), .0.message())]
    Transport(Status),
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
}

impl From<Status> for CallError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::Unimplemented => CallError::Unimplemented(status),
            _ => CallError::Transport(status),
        }
    }
}

/// Client of the `greet.Greeter` service.
///
/// Cloning is cheap when `S` is a [`Channel`]: clones share the connection.
#[derive(Clone)]
pub struct GreeterClient<S = Channel> {
    client: tonic::client::Grpc<S>,
    observer: Arc<dyn Observer>,
}

impl GreeterClient<Channel> {
    /// Connects to a server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Either `host:port` or a full URI (e.g. `http://localhost:50051`).
    /// * `observer` - Receives the client events.
    pub async fn connect(
        addr: &str,
        observer: Arc<dyn Observer>,
    ) -> Result<Self, ClientConnectError> {
        let uri = normalize_uri(addr);

        let endpoint = Endpoint::new(uri.clone())
            .map_err(|e| ClientConnectError::InvalidUrl(uri.clone(), e))?
            .connect_timeout(CONNECT_TIMEOUT);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ClientConnectError::ConnectionFailed(uri.clone(), e))?;

        observer.connected(&uri);

        Ok(Self::from_service(channel, observer))
    }
}

impl<S> GreeterClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client from an existing tonic service or channel.
    pub fn from_service(service: S, observer: Arc<dyn Observer>) -> Self {
        Self {
            client: tonic::client::Grpc::new(service),
            observer,
        }
    }

    /// Calls `SayHello`, waiting at most `deadline` for the reply.
    ///
    /// # Returns
    ///
    /// * `Ok(HelloReply)` - The server answered in time.
    /// * `Err(CallError)` - The deadline elapsed, or the transport or server failed.
    pub async fn greet(
        &mut self,
        request: HelloRequest,
        deadline: Duration,
    ) -> Result<HelloReply, CallError> {
        let client = &mut self.client;

        let call = async move {
            client
                .ready()
                .await
                .map_err(|e| CallError::ClientNotReady(e.into()))?;

            let path = http::uri::PathAndQuery::from_static(SAY_HELLO_PATH);
            let codec = ProstCodec::<HelloRequest, HelloReply>::default();

            let response = client
                .unary(tonic::Request::new(request), path, codec)
                .await?;

            Ok::<_, CallError>(response.into_inner())
        };

        let result = match tokio::time::timeout(deadline, call).await {
            Ok(Err(CallError::Transport(status))) if status.code() == Code::DeadlineExceeded => {
                Err(CallError::DeadlineExceeded(deadline))
            }
            Ok(result) => result,
            Err(_) => Err(CallError::DeadlineExceeded(deadline)),
        };

        match &result {
            Ok(reply) => self.observer.reply_received(reply),
            Err(error) => self.observer.call_failed(error),
        }

        result
    }
}

/// Prepends `http://` to bare `host:port` addresses.
fn normalize_uri(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}
