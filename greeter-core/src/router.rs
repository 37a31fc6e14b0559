//! # Dispatch table
//!
//! [`ServiceRouter`] maps the HTTP/2 path of a gRPC call (e.g. `/greet.Greeter/SayHello`)
//! to the handler answering it. It does the job a `protoc` generated server stub
//! would do, but as an explicit table: an operation is only reachable once a
//! route has been registered for it, and any other path answers `Unimplemented`.
//!
//! Each route owns the protobuf codec for its request and reply types, so the
//! table itself is agnostic to the messages being exchanged.
use greet_service::{Greeter, HelloRequest, SAY_HELLO_PATH, SERVICE_NAME};
use std::{
    collections::HashMap,
    convert::Infallible,
    future::Future,
    sync::Arc,
    task::{Context, Poll},
};
use tonic::{
    Request, Response, Status,
    body::Body,
    codegen::{BoxFuture, Service},
    server::{Grpc, NamedService, UnaryService},
};
use tonic_prost::ProstCodec;

type Route =
    Arc<dyn Fn(http::Request<Body>) -> BoxFuture<http::Response<Body>, Infallible> + Send + Sync>;

/// A table of gRPC routes served under [`SERVICE_NAME`].
#[derive(Clone, Default)]
pub struct ServiceRouter {
    routes: HashMap<&'static str, Route>,
}

impl ServiceRouter {
    /// Creates an empty router. Every call answers `Unimplemented` until a route is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unary handler on `path`, replacing any previous route for it.
    pub fn unary<Req, Res, F, Fut>(mut self, path: &'static str, handler: F) -> Self
    where
        Req: prost::Message + Default + Send + 'static,
        Res: prost::Message + Send + 'static,
        F: Fn(Request<Req>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Res>, Status>> + Send + 'static,
    {
        let handler = Arc::new(handler);

        let route: Route = Arc::new(
            move |req: http::Request<Body>| -> BoxFuture<http::Response<Body>, Infallible> {
                let handler = Arc::clone(&handler);
                Box::pin(async move {
                    let mut grpc = Grpc::new(ProstCodec::<Res, Req>::default());
                    Ok(grpc.unary(UnaryFn(handler), req).await)
                })
            },
        );

        self.routes.insert(path, route);
        self
    }

    #[cfg(test)]
    fn has_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }
}

/// Builds the router of the `greet.Greeter` service around `greeter`.
pub fn greeter_router<G>(greeter: Arc<G>) -> ServiceRouter
where
    G: Greeter + ?Sized,
{
    ServiceRouter::new().unary(SAY_HELLO_PATH, move |request: Request<HelloRequest>| {
        let greeter = Arc::clone(&greeter);
        async move { greeter.say_hello(request).await }
    })
}

impl Service<http::Request<Body>> for ServiceRouter {
    type Response = http::Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<Body>) -> Self::Future {
        match self.routes.get(req.uri().path()).cloned() {
            Some(route) => route(req),
            None => {
                let status = Status::unimplemented(format!(
                    "Method '{}' is not implemented",
                    req.uri().path()
                ));
                Box::pin(async move { Ok(status.into_http()) })
            }
        }
    }
}

impl NamedService for ServiceRouter {
    const NAME: &'static str = SERVICE_NAME;
}

/// Adapts a handler closure to tonic's [`UnaryService`].
///
/// The handler runs on its own task: if the caller goes away (deadline, reset
/// stream) the transport drops this future, but the handler still completes.
struct UnaryFn<F>(Arc<F>);

impl<Req, Res, F, Fut> UnaryService<Req> for UnaryFn<F>
where
    Res: Send + 'static,
    F: Fn(Request<Req>) -> Fut,
    Fut: Future<Output = Result<Response<Res>, Status>> + Send + 'static,
{
    type Response = Res;
    type Future = BoxFuture<Response<Res>, Status>;

    fn call(&mut self, request: Request<Req>) -> Self::Future {
        let handler = tokio::spawn((self.0)(request));
        Box::pin(async move {
            handler
                .await
                .map_err(|e| Status::internal(format!("Handler task failed: {e}")))?
        })
    }
}
