//! # Greeting handler
//!
//! [`handle`] is the whole business logic of the service. [`GreeterService`]
//! wraps it into the [`Greeter`] contract and reports every call to its
//! [`Observer`].
use crate::observer::Observer;
use greet_service::{Greeter, HelloReply, HelloRequest, SAY_HELLO};
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// Composes the reply for a request.
///
/// Any name is accepted, including the empty string.
pub fn handle(request: HelloRequest) -> HelloReply {
    HelloReply {
        message: format!("Hello, {}!", request.name),
    }
}

/// Default implementation of the `greet.Greeter` service.
#[derive(Clone)]
pub struct GreeterService {
    observer: Arc<dyn Observer>,
}

impl GreeterService {
    pub fn new(observer: Arc<dyn Observer>) -> Self {
        Self { observer }
    }
}

#[tonic::async_trait]
impl Greeter for GreeterService {
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        let request = request.into_inner();
        self.observer.call_received(SAY_HELLO, &request.name);

        Ok(Response::new(handle(request)))
    }
}
