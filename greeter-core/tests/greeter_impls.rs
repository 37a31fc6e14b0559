use greeter_core::client::CallError;
use greeter_core::greet_service::{Greeter, HelloReply, HelloRequest};
use greeter_core::observer::Observer;
use greeter_core::service::handle;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tonic::{Request, Response, Status};

/// Answers like the default service, but only after `delay`.
///
/// `finished` is notified once the handler has run to the end.
pub struct SlowGreeter {
    delay: Duration,
    pub finished: Arc<Notify>,
}

impl SlowGreeter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: Arc::new(Notify::new()),
        }
    }
}

#[tonic::async_trait]
impl Greeter for SlowGreeter {
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        tokio::time::sleep(self.delay).await;
        let reply = handle(request.into_inner());
        self.finished.notify_one();
        Ok(Response::new(reply))
    }
}

/// Keeps one line per event, in order.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Observer for RecordingObserver {
    fn listening(&self, _addr: SocketAddr) {
        self.push("listening".to_string());
    }

    fn call_received(&self, method: &str, name: &str) {
        self.push(format!("call {method} {name}"));
    }

    fn reply_received(&self, reply: &HelloReply) {
        self.push(format!("reply {}", reply.message));
    }

    fn call_failed(&self, error: &CallError) {
        self.push(format!("failed {error}"));
    }
}
