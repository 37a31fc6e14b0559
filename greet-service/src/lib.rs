//! # Greet Service
//!
//! The contract of the `greet.Greeter` gRPC service: its two protobuf messages,
//! the wire identifiers used for dispatch, and the [`Greeter`] trait a server
//! implements to answer calls.
//!
//! The messages are plain `prost` structs rather than `protoc` output, so the
//! crate builds without any code generation step. [`file_descriptor_set`]
//! describes the same schema for tooling that needs it (server reflection).
pub mod descriptor;
pub mod pb;

pub use descriptor::file_descriptor_set;
pub use pb::{HelloReply, HelloRequest};

use tonic::{Request, Response, Status};

/// Protobuf package of the service.
pub const PACKAGE: &str = "greet";

/// Fully qualified service name, as advertised to the transport.
pub const SERVICE_NAME: &str = "greet.Greeter";

/// Name of the single remote operation.
pub const SAY_HELLO: &str = "SayHello";

/// HTTP/2 path the `SayHello` operation is dispatched on.
pub const SAY_HELLO_PATH: &str = "/greet.Greeter/SayHello";

/// Server side of the `greet.Greeter` service.
///
/// Any new operation added to the service needs a method here and an explicit
/// route registered on the server.
#[tonic::async_trait]
pub trait Greeter: Send + Sync + 'static {
    /// Answers a greeting request with exactly one reply or one status.
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status>;
}
