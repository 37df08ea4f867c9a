use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::callback::{CancelHandle, Cancelable, Consumer};
use crate::cancel::CancelSlot;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::shape::Shape;

/// Shared sending half; the first resolution wins.
struct Resolver<T, E> {
    operation: &'static str,
    tx: Mutex<Option<oneshot::Sender<Result<T, E>>>>,
}

impl<T, E> Resolver<T, E> {
    fn resolve(&self, outcome: Result<T, E>) -> bool {
        let tx = self.tx.lock().expect("resolver mutex poisoned").take();
        match tx {
            Some(tx) => {
                // A dropped receiver means the caller lost interest; nothing to report.
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}

/// Cancels a [`PendingCall`] from outside the task awaiting it.
#[derive(Clone)]
pub struct Canceler {
    slot: Arc<CancelSlot>,
    settle: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Canceler {
    pub fn cancel(&self) {
        if (self.settle)() {
            self.slot.cancel();
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.slot.is_cancel_requested()
    }
}

impl Cancelable for Canceler {
    fn cancel(&self) {
        Canceler::cancel(self)
    }
}

impl fmt::Debug for Canceler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canceler")
            .field("operation", &self.slot.operation())
            .finish()
    }
}

enum CallState<T, E> {
    Waiting(oneshot::Receiver<Result<T, E>>),
    Ready(Result<T, E>),
    Done,
}

/// A single in-flight request bridged from a success/failure callback pair.
///
/// Resolves with the collaborator's value or its error, unchanged. Dropping
/// an unresolved call cancels it.
pub struct PendingCall<T, E> {
    operation: &'static str,
    state: CallState<T, E>,
    canceler: Canceler,
}

// Never pin-projected: the output is moved out by value.
impl<T, E> Unpin for PendingCall<T, E> {}

impl<T, E> PendingCall<T, E>
where
    T: Send + 'static,
    E: From<BridgeError> + Send + 'static,
{
    /// A call that has already settled.
    pub fn ready(operation: &'static str, outcome: Result<T, E>) -> Self {
        let slot = Arc::new(CancelSlot::new(operation, Default::default()));
        slot.release();
        Self {
            operation,
            state: CallState::Ready(outcome),
            canceler: Canceler {
                slot,
                settle: Arc::new(|| false),
            },
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn shape(&self) -> Shape {
        Shape::Single
    }

    pub fn canceler(&self) -> Canceler {
        self.canceler.clone()
    }

    /// Cancels the call. The awaited result becomes
    /// [`BridgeError::Canceled`] unless the collaborator already answered.
    pub fn cancel(&self) {
        self.canceler.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.canceler.is_canceled()
    }
}

impl<T, E> Future for PendingCall<T, E>
where
    T: Send + 'static,
    E: From<BridgeError> + Send + 'static,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        if let CallState::Waiting(rx) = &mut this.state {
            let outcome = match Pin::new(rx).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(outcome)) => outcome,
                Poll::Ready(Err(_)) => {
                    log::warn!(
                        "{}: collaborator dropped its callbacks unanswered",
                        this.operation
                    );
                    Err(E::from(BridgeError::abandoned(
                        this.operation,
                        Shape::Single,
                    )))
                }
            };
            this.state = CallState::Done;
            return Poll::Ready(outcome);
        }
        match std::mem::replace(&mut this.state, CallState::Done) {
            CallState::Ready(outcome) => Poll::Ready(outcome),
            CallState::Waiting(_) | CallState::Done => {
                panic!("PendingCall polled after completion")
            }
        }
    }
}

impl<T, E> Drop for PendingCall<T, E> {
    fn drop(&mut self) {
        if matches!(self.state, CallState::Waiting(_)) {
            self.canceler.cancel();
        }
    }
}

impl<T, E> fmt::Debug for PendingCall<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            CallState::Waiting(_) => "waiting",
            CallState::Ready(_) => "ready",
            CallState::Done => "done",
        };
        f.debug_struct("PendingCall")
            .field("operation", &self.operation)
            .field("state", &state)
            .finish()
    }
}

/// An answer arriving after the caller canceled is expected; a second answer
/// to a settled call is a collaborator bug.
fn report_late(operation: &'static str, slot: &CancelSlot, outcome: &str) {
    if slot.is_cancel_requested() {
        log::debug!("{operation}: {outcome} delivered after cancel, discarded");
    } else {
        log::warn!("{operation}: {outcome} delivered after call settled");
    }
}

/// Bridges a `(on_success, on_failure) -> Option<CancelHandle>` operation.
///
/// `op` runs exactly once, synchronously, before this returns. A `None`
/// handle means the operation cannot be interrupted (or already finished).
pub fn single<T, E, F>(operation: &'static str, config: &BridgeConfig, op: F) -> PendingCall<T, E>
where
    T: Send + 'static,
    E: From<BridgeError> + Send + 'static,
    F: FnOnce(Consumer<T>, Consumer<E>) -> Option<CancelHandle>,
{
    let (tx, rx) = oneshot::channel();
    let resolver = Arc::new(Resolver {
        operation,
        tx: Mutex::new(Some(tx)),
    });
    let slot = Arc::new(CancelSlot::new(operation, config.cancel_policy));

    let on_success: Consumer<T> = {
        let resolver = resolver.clone();
        let slot = slot.clone();
        Box::new(move |value| {
            log::trace!("{}: success delivered", resolver.operation);
            if !resolver.resolve(Ok(value)) {
                report_late(resolver.operation, &slot, "success");
            }
            slot.release();
        })
    };
    let on_failure: Consumer<E> = {
        let resolver = resolver.clone();
        let slot = slot.clone();
        Box::new(move |error| {
            log::trace!("{}: failure delivered", resolver.operation);
            if !resolver.resolve(Err(error)) {
                report_late(resolver.operation, &slot, "failure");
            }
            slot.release();
        })
    };

    let weak: Weak<Resolver<T, E>> = Arc::downgrade(&resolver);
    drop(resolver);
    let settle = Arc::new(move || match weak.upgrade() {
        Some(resolver) => resolver.resolve(Err(E::from(BridgeError::canceled(operation)))),
        None => false,
    });

    log::debug!("{operation}: dispatching ({})", Shape::Single);
    if let Some(handle) = op(on_success, on_failure) {
        slot.install(handle);
    }

    PendingCall {
        operation,
        state: CallState::Waiting(rx),
        canceler: Canceler { slot, settle },
    }
}
