use std::sync::{Arc, Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use nimbus_bridge::{
    cancel_handle, pending, sequence, subscription, BatchSink, BridgeConfig, BridgeError, Consumer,
    ItemStream, SubscriptionCallbacks, SubscriptionOperation,
};

#[derive(Clone, Debug, PartialEq)]
enum Failure {
    Remote(String),
    Bridge(BridgeError),
}

impl From<BridgeError> for Failure {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

/// Keeps every record so tests can assert on levels.
struct Capture {
    entries: Mutex<Vec<(Level, String)>>,
}

static CAPTURE: Capture = Capture {
    entries: Mutex::new(Vec::new()),
};

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let entry = (record.level(), record.args().to_string());
        self.entries.lock().expect("log entries").push(entry);
    }

    fn flush(&self) {}
}

fn capture_logs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Messages for `operation` at exactly `level`. Operation names are unique
/// per test, so parallel tests do not see each other's records.
fn logged(operation: &str, level: Level) -> Vec<String> {
    let prefix = format!("{operation}:");
    CAPTURE
        .entries
        .lock()
        .expect("log entries")
        .iter()
        .filter(|(at, message)| *at == level && message.starts_with(&prefix))
        .map(|(_, message)| message.clone())
        .collect()
}

type ParkedCall = Arc<Mutex<Option<(Consumer<u32>, Consumer<Failure>)>>>;

#[tokio::test]
async fn answer_after_cancel_is_logged_at_debug() {
    capture_logs();
    let parked: ParkedCall = Arc::new(Mutex::new(None));
    let call = {
        let parked = parked.clone();
        pending::single::<u32, Failure, _>(
            "late.single_canceled",
            &BridgeConfig::default(),
            move |on_success, on_failure| {
                *parked.lock().expect("parked") = Some((on_success, on_failure));
                Some(cancel_handle(|| {}))
            },
        )
    };
    call.cancel();
    let canceled = BridgeError::canceled("late.single_canceled");
    assert_eq!(call.await, Err(Failure::Bridge(canceled)));

    let (on_success, _on_failure) = parked.lock().expect("parked").take().expect("callbacks");
    std::thread::spawn(move || on_success(9))
        .join()
        .expect("collaborator thread");

    assert!(logged("late.single_canceled", Level::Warn).is_empty());
    assert_eq!(
        logged("late.single_canceled", Level::Debug)
            .iter()
            .filter(|message| message.contains("delivered after cancel"))
            .count(),
        1
    );
}

#[tokio::test]
async fn second_answer_to_settled_call_warns() {
    capture_logs();
    let call = pending::single::<u32, Failure, _>(
        "late.single_twice",
        &BridgeConfig::default(),
        |on_success, on_failure| {
            on_success(1);
            on_failure(Failure::Remote("also failed".to_owned()));
            None
        },
    );
    assert_eq!(call.await, Ok(1));
    assert_eq!(logged("late.single_twice", Level::Warn).len(), 1);
}

fn parked_sink(operation: &'static str) -> (ItemStream<u32, Failure>, BatchSink<u32, Failure>) {
    let parked = Arc::new(Mutex::new(None));
    let inner = parked.clone();
    let stream = sequence::batches(operation, move |sink| {
        *inner.lock().expect("parked") = Some(sink);
    });
    let sink = parked.lock().expect("parked").take().expect("sink");
    (stream, sink)
}

#[tokio::test]
async fn batches_after_consumer_left_are_logged_at_debug() {
    capture_logs();
    let (stream, sink) = parked_sink("late.batches_dropped");
    drop(stream);

    sink.push(vec![1, 2]);
    sink.fail(Failure::Remote("gone".to_owned()));

    assert!(logged("late.batches_dropped", Level::Warn).is_empty());
    assert_eq!(
        logged("late.batches_dropped", Level::Debug)
            .iter()
            .filter(|message| message.ends_with("discarded"))
            .count(),
        2
    );
}

#[tokio::test]
async fn batches_after_finish_warn() {
    capture_logs();
    let (_stream, sink) = parked_sink("late.batches_finished");
    sink.finish();

    sink.push(vec![3]);
    sink.fail(Failure::Remote("after finish".to_owned()));

    assert_eq!(logged("late.batches_finished", Level::Warn).len(), 2);
}

type ParkedSubscription = Arc<Mutex<Option<SubscriptionCallbacks<u32, Failure>>>>;

fn parked_subscription(
    operation: &'static str,
) -> (SubscriptionOperation<u32, Failure>, SubscriptionCallbacks<u32, Failure>) {
    let parked: ParkedSubscription = Arc::new(Mutex::new(None));
    let inner = parked.clone();
    let op = subscription::subscribe(operation, &BridgeConfig::default(), move |callbacks| {
        *inner.lock().expect("parked") = Some(callbacks);
        cancel_handle(|| {})
    });
    let callbacks = parked.lock().expect("parked").take().expect("callbacks");
    (op, callbacks)
}

#[tokio::test]
async fn events_after_cancel_are_logged_at_debug() {
    capture_logs();
    let (op, callbacks) = parked_subscription("late.subscription_canceled");
    (callbacks.on_connected)(());
    op.cancel();

    (callbacks.on_event)(1);
    (callbacks.on_event)(2);
    (callbacks.on_complete)();

    assert!(logged("late.subscription_canceled", Level::Warn).is_empty());
}

#[tokio::test]
async fn events_after_completion_warn() {
    capture_logs();
    let (_op, callbacks) = parked_subscription("late.subscription_completed");
    let on_event = callbacks.on_event;
    (callbacks.on_complete)();

    on_event(1);

    assert_eq!(logged("late.subscription_completed", Level::Warn).len(), 1);
}
