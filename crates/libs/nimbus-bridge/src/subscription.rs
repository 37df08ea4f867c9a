use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::callback::{Action, CancelHandle, Cancelable, Consumer, Listener};
use crate::cancel::CancelSlot;
use crate::config::{BridgeConfig, ReplayPolicy};
use crate::error::BridgeError;
use crate::hub::{Hub, HubStream};
use crate::phase::{Phase, PhaseCell};
use crate::shape::Shape;

/// Connectivity of a live subscription, independent of its data events.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// The four callbacks a subscribing collaborator receives.
pub struct SubscriptionCallbacks<T, E> {
    pub on_connected: Listener<()>,
    pub on_event: Listener<T>,
    pub on_failure: Consumer<E>,
    pub on_complete: Action,
}

struct Core<T, E> {
    operation: &'static str,
    events: Hub<T, E>,
    states: Hub<ConnectionState, E>,
    phase: PhaseCell,
    slot: CancelSlot,
}

impl<T, E> Core<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn connected(&self) {
        self.phase.while_open(|| {
            log::trace!("{}: connected", self.operation);
            self.states.publish(ConnectionState::Connected);
        });
    }

    fn event(&self, event: T) {
        self.phase.while_open(|| self.events.publish(event));
    }

    /// Publishes `Disconnected`, then closes both streams with `error`.
    fn terminate(&self, phase: Phase, error: Option<E>) {
        if !self.phase.finish(phase) {
            return;
        }
        log::debug!("{}: subscription {}", self.operation, phase.as_str());
        self.states.publish(ConnectionState::Disconnected);
        self.events.close(error.clone());
        self.states.close(error);
        self.slot.release();
    }

    fn cancel(&self) {
        if self.phase.finish(Phase::Canceled) {
            log::debug!("{}: subscription canceled", self.operation);
            self.events.close(None);
            self.states.close(None);
        }
        self.slot.cancel();
    }
}

/// Fires when the collaborator has released every callback.
struct ReleaseGuard<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    core: Arc<Core<T, E>>,
}

impl<T, E> Drop for ReleaseGuard<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.core.phase.get().is_terminal() {
            log::warn!(
                "{}: collaborator released subscription callbacks",
                self.core.operation
            );
            let error = E::from(BridgeError::abandoned(
                self.core.operation,
                Shape::Subscription,
            ));
            self.core.terminate(Phase::Failed, Some(error));
        }
    }
}

/// A live subscription: a data event stream plus a connection-state stream,
/// canceled as a unit.
///
/// Dropping the operation does not cancel it; streams obtained from it keep
/// receiving until the collaborator terminates or `cancel` is called.
pub struct SubscriptionOperation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    core: Arc<Core<T, E>>,
}

impl<T, E> SubscriptionOperation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn operation(&self) -> &'static str {
        self.core.operation
    }

    pub fn shape(&self) -> Shape {
        Shape::Subscription
    }

    /// Data events, ending with the terminal error if the subscription failed.
    pub fn events(&self) -> HubStream<T, E> {
        self.core.events.subscribe()
    }

    /// Connection transitions from `Connecting` onwards.
    pub fn connection_state(&self) -> HubStream<ConnectionState, E> {
        self.core.states.subscribe()
    }

    pub fn current_state(&self) -> ConnectionState {
        self.core
            .states
            .latest()
            .unwrap_or(ConnectionState::Connecting)
    }

    pub fn phase(&self) -> Phase {
        self.core.phase.get()
    }

    /// Cancels the collaborator's handle once and closes both streams
    /// without a further state transition.
    pub fn cancel(&self) {
        self.core.cancel();
    }
}

impl<T, E> Cancelable for SubscriptionOperation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn cancel(&self) {
        self.core.cancel();
    }
}

impl<T, E> fmt::Debug for SubscriptionOperation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionOperation")
            .field("operation", &self.core.operation)
            .field("phase", &self.core.phase.get())
            .finish()
    }
}

/// Bridges a `(on_connected, on_event, on_failure, on_complete) -> CancelHandle`
/// operation. `op` runs once, synchronously.
pub fn subscribe<T, E, F>(
    operation: &'static str,
    config: &BridgeConfig,
    op: F,
) -> SubscriptionOperation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
    F: FnOnce(SubscriptionCallbacks<T, E>) -> CancelHandle,
{
    let core = Arc::new(Core {
        operation,
        events: Hub::new(operation, config.event_replay),
        states: Hub::new(operation, ReplayPolicy::Full),
        phase: PhaseCell::new(operation),
        slot: CancelSlot::new(operation, config.cancel_policy),
    });
    core.states.publish(ConnectionState::Connecting);
    core.phase.activate();

    let guard = Arc::new(ReleaseGuard { core: core.clone() });
    let callbacks = SubscriptionCallbacks {
        on_connected: {
            let guard = guard.clone();
            Box::new(move |()| guard.core.connected())
        },
        on_event: {
            let guard = guard.clone();
            Box::new(move |event| guard.core.event(event))
        },
        on_failure: {
            let guard = guard.clone();
            Box::new(move |error| {
                guard.core.terminate(Phase::Failed, Some(error))
            })
        },
        on_complete: Box::new(move || guard.core.terminate(Phase::Completed, None)),
    };

    log::debug!("{operation}: dispatching ({})", Shape::Subscription);
    let handle = op(callbacks);
    core.slot.install(handle);
    SubscriptionOperation { core }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::cancel_handle;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    enum TestError {
        Closed(String),
        Bridge(BridgeError),
    }

    impl From<BridgeError> for TestError {
        fn from(err: BridgeError) -> Self {
            Self::Bridge(err)
        }
    }

    type Parked = Arc<Mutex<Option<SubscriptionCallbacks<u32, TestError>>>>;

    fn parked_subscription(
        cancels: &Arc<AtomicUsize>,
    ) -> (SubscriptionOperation<u32, TestError>, Parked) {
        let parked: Parked = Arc::new(Mutex::new(None));
        let inner = parked.clone();
        let counter = cancels.clone();
        let op = subscribe(
            "test.subscribe",
            &BridgeConfig::default().with_event_replay(ReplayPolicy::Full),
            move |callbacks| {
                *inner.lock().expect("parked") = Some(callbacks);
                cancel_handle(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            },
        );
        (op, parked)
    }

    #[tokio::test]
    async fn completion_orders_states_and_events() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let (op, parked) = parked_subscription(&cancels);
        assert_eq!(op.current_state(), ConnectionState::Connecting);
        assert_eq!(op.phase(), Phase::Active);

        let callbacks = parked.lock().expect("parked").take().expect("callbacks");
        std::thread::spawn(move || {
            (callbacks.on_connected)(());
            (callbacks.on_event)(1);
            (callbacks.on_event)(2);
            (callbacks.on_complete)();
        })
        .join()
        .expect("collaborator thread");

        let states: Vec<_> = op.connection_state().collect().await;
        assert_eq!(
            states,
            vec![
                Ok(ConnectionState::Connecting),
                Ok(ConnectionState::Connected),
                Ok(ConnectionState::Disconnected),
            ]
        );
        let events: Vec<_> = op.events().collect().await;
        assert_eq!(events, vec![Ok(1), Ok(2)]);
        assert_eq!(op.phase(), Phase::Completed);
        assert_eq!(cancels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_closes_both_streams_with_error() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let (op, parked) = parked_subscription(&cancels);
        let callbacks = parked.lock().expect("parked").take().expect("callbacks");

        (callbacks.on_connected)(());
        (callbacks.on_event)(5);
        (callbacks.on_failure)(TestError::Closed("socket reset".to_owned()));
        (callbacks.on_event)(6);

        let error = TestError::Closed("socket reset".to_owned());
        let states: Vec<_> = op.connection_state().collect().await;
        assert_eq!(
            states,
            vec![
                Ok(ConnectionState::Connecting),
                Ok(ConnectionState::Connected),
                Ok(ConnectionState::Disconnected),
                Err(error.clone()),
            ]
        );
        let events: Vec<_> = op.events().collect().await;
        assert_eq!(events, vec![Ok(5), Err(error)]);
        assert_eq!(op.phase(), Phase::Failed);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_adds_no_transition() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let (op, parked) = parked_subscription(&cancels);
        let callbacks = parked.lock().expect("parked").take().expect("callbacks");
        (callbacks.on_connected)(());

        op.cancel();
        op.cancel();
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
        assert_eq!(op.phase(), Phase::Canceled);

        (callbacks.on_event)(9);
        (callbacks.on_complete)();

        let states: Vec<_> = op.connection_state().collect().await;
        assert_eq!(
            states,
            vec![
                Ok(ConnectionState::Connecting),
                Ok(ConnectionState::Connected),
            ]
        );
        let events: Vec<_> = op.events().collect().await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn live_subscriber_sees_events_as_they_arrive() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let (op, parked) = parked_subscription(&cancels);
        let mut events = op.events();
        let callbacks = parked.lock().expect("parked").take().expect("callbacks");

        let worker = std::thread::spawn(move || {
            (callbacks.on_connected)(());
            (callbacks.on_event)(1);
            callbacks
        });
        assert_eq!(events.next().await, Some(Ok(1)));
        let callbacks = worker.join().expect("collaborator thread");
        (callbacks.on_complete)();
        assert_eq!(events.next().await, None);
    }

    #[tokio::test]
    async fn released_callbacks_fail_as_abandoned() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let (op, parked) = parked_subscription(&cancels);
        drop(parked.lock().expect("parked").take());

        let expected = TestError::Bridge(BridgeError::abandoned(
            "test.subscribe",
            Shape::Subscription,
        ));
        let events: Vec<_> = op.events().collect().await;
        assert_eq!(events, vec![Err(expected)]);
        assert_eq!(op.current_state(), ConnectionState::Disconnected);
        assert_eq!(op.phase(), Phase::Failed);
    }
}
