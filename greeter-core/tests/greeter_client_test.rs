use greeter_core::client::{CallError, DEFAULT_DEADLINE, GreeterClient};
use greeter_core::greet_service::HelloRequest;
use greeter_core::observer::NoopObserver;
use greeter_core::router::{ServiceRouter, greeter_router};
use greeter_core::service::GreeterService;
use greeter_impls::{RecordingObserver, SlowGreeter};
use std::sync::Arc;
use std::time::Duration;

mod greeter_impls;

fn in_process_client(observer: Arc<RecordingObserver>) -> GreeterClient<ServiceRouter> {
    let greeter = Arc::new(GreeterService::new(observer.clone()));
    GreeterClient::from_service(greeter_router(greeter), observer)
}

#[tokio::test]
async fn test_greet() {
    let mut client = in_process_client(Arc::new(RecordingObserver::default()));

    let reply = client
        .greet(HelloRequest::new("world"), DEFAULT_DEADLINE)
        .await
        .unwrap();

    assert_eq!(reply.message, "Hello, world!");
}

#[tokio::test]
async fn test_greet_accepts_unvalidated_names() {
    let mut client = in_process_client(Arc::new(RecordingObserver::default()));

    let long = "long".repeat(10_000);

    for name in ["", "世界", "bell\u{7}\r\n", long.as_str()] {
        let reply = client
            .greet(HelloRequest::new(name), DEFAULT_DEADLINE)
            .await
            .unwrap();

        assert_eq!(reply.message, format!("Hello, {name}!"));
    }
}

#[tokio::test]
async fn test_greet_is_idempotent() {
    let mut client = in_process_client(Arc::new(RecordingObserver::default()));

    let first = client
        .greet(HelloRequest::new("again"), DEFAULT_DEADLINE)
        .await
        .unwrap();
    let second = client
        .greet(HelloRequest::new("again"), DEFAULT_DEADLINE)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_observer_sees_one_event_per_call() {
    let observer = Arc::new(RecordingObserver::default());
    let mut client = in_process_client(observer.clone());

    client
        .greet(HelloRequest::new("Ada"), DEFAULT_DEADLINE)
        .await
        .unwrap();
    client
        .greet(HelloRequest::new("Grace"), DEFAULT_DEADLINE)
        .await
        .unwrap();

    assert_eq!(
        observer.events(),
        vec![
            "call SayHello Ada",
            "reply Hello, Ada!",
            "call SayHello Grace",
            "reply Hello, Grace!",
        ]
    );
}

#[tokio::test]
async fn test_deadline_shorter_than_handler_fails() {
    let observer = Arc::new(RecordingObserver::default());
    let greeter = Arc::new(SlowGreeter::new(Duration::from_millis(200)));
    let finished = greeter.finished.clone();
    let mut client = GreeterClient::from_service(greeter_router(greeter), observer.clone());

    let deadline = Duration::from_millis(20);
    let err = client
        .greet(HelloRequest::new("late"), deadline)
        .await
        .unwrap_err();

    match err {
        CallError::DeadlineExceeded(d) => assert_eq!(d, deadline),
        other => panic!("Expected DeadlineExceeded, got {other:?}"),
    }

    assert_eq!(observer.events().len(), 1);
    assert!(observer.events()[0].starts_with("failed Deadline"));

    // The abandoned handler keeps running until it is done.
    tokio::time::timeout(Duration::from_secs(5), finished.notified())
        .await
        .expect("Stale handler never completed");
}

#[tokio::test]
async fn test_deadline_longer_than_handler_succeeds() {
    let router = greeter_router(Arc::new(SlowGreeter::new(Duration::from_millis(10))));
    let mut client = GreeterClient::from_service(router, Arc::new(NoopObserver));

    let reply = client
        .greet(HelloRequest::new("patient"), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(reply.message, "Hello, patient!");
}

#[tokio::test]
async fn test_unregistered_method_is_unimplemented() {
    let mut client = GreeterClient::from_service(ServiceRouter::new(), Arc::new(NoopObserver));

    let err = client
        .greet(HelloRequest::new("nobody"), DEFAULT_DEADLINE)
        .await
        .unwrap_err();

    match err {
        CallError::Unimplemented(status) => {
            assert_eq!(status.code(), tonic::Code::Unimplemented);
            assert!(status.message().contains("/greet.Greeter/SayHello"));
        }
        other => panic!("Expected Unimplemented, got {other:?}"),
    }
}
