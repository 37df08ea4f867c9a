use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::callback::{CancelHandle, Cancelable, Consumer, Listener};
use crate::cancel::CancelSlot;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::hub::{Hub, HubStream};
use crate::phase::{Phase, PhaseCell};
use crate::shape::Shape;

/// Callbacks a transferring collaborator receives.
pub struct TransferCallbacks<T, P, E> {
    pub on_progress: Listener<P>,
    pub on_result: Consumer<T>,
    pub on_failure: Consumer<E>,
}

struct Core<T, P, E> {
    operation: &'static str,
    progress: Hub<P, E>,
    outcome: watch::Sender<Option<Result<T, E>>>,
    phase: PhaseCell,
    slot: CancelSlot,
}

impl<T, P, E> Core<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn progress(&self, update: P) {
        self.phase.while_open(|| self.progress.publish(update));
    }

    /// Records the outcome on both surfaces. Returns `false` if another
    /// outcome got there first.
    fn settle(&self, phase: Phase, outcome: Result<T, E>) -> bool {
        if !self.phase.finish(phase) {
            return false;
        }
        log::debug!("{}: transfer {}", self.operation, phase.as_str());
        self.progress.close(outcome.as_ref().err().cloned());
        self.outcome.send_replace(Some(outcome));
        true
    }

    fn succeed(&self, value: T) {
        if self.settle(Phase::Completed, Ok(value)) {
            self.slot.release();
        }
    }

    fn fail(&self, error: E) {
        if self.settle(Phase::Failed, Err(error)) {
            self.slot.release();
        }
    }
}

impl<T, P, E> Core<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    fn cancel(&self) {
        self.settle(
            Phase::Canceled,
            Err(E::from(BridgeError::canceled(self.operation))),
        );
        self.slot.cancel();
    }
}

struct ReleaseGuard<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    core: Arc<Core<T, P, E>>,
}

impl<T, P, E> Drop for ReleaseGuard<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.core.phase.get().is_terminal() {
            log::warn!(
                "{}: collaborator released transfer callbacks",
                self.core.operation
            );
            self.core.fail(E::from(BridgeError::abandoned(
                self.core.operation,
                Shape::Transfer,
            )));
        }
    }
}

/// A long-running transfer with a progress stream and a single final
/// result. Both surfaces always report the same outcome.
///
/// Dropping the operation does not cancel the transfer.
pub struct TransferOperation<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    core: Arc<Core<T, P, E>>,
}

impl<T, P, E> TransferOperation<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    pub fn operation(&self) -> &'static str {
        self.core.operation
    }

    pub fn shape(&self) -> Shape {
        Shape::Transfer
    }

    /// Progress updates, ending with the failure if the transfer failed.
    pub fn progress(&self) -> HubStream<P, E> {
        self.core.progress.subscribe()
    }

    /// Waits for the final outcome. May be called any number of times.
    pub async fn result(&self) -> Result<T, E> {
        let mut rx = self.core.outcome.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(outcome) = current {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(E::from(BridgeError::abandoned(
                    self.core.operation,
                    Shape::Transfer,
                )));
            }
        }
    }

    /// The outcome if it is already known.
    pub fn try_result(&self) -> Option<Result<T, E>> {
        self.core.outcome.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.core.phase.get()
    }

    /// Cancels the collaborator's handle once. Both surfaces then report
    /// [`BridgeError::Canceled`].
    pub fn cancel(&self) {
        self.core.cancel();
    }
}

impl<T, P, E> Cancelable for TransferOperation<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    fn cancel(&self) {
        self.core.cancel();
    }
}

impl<T, P, E> fmt::Debug for TransferOperation<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferOperation")
            .field("operation", &self.core.operation)
            .field("phase", &self.core.phase.get())
            .finish()
    }
}

/// Bridges a `(on_progress, on_result, on_failure) -> CancelHandle`
/// operation. `op` runs once, synchronously.
pub fn transfer<T, P, E, F>(
    operation: &'static str,
    config: &BridgeConfig,
    op: F,
) -> TransferOperation<T, P, E>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    E: Clone + From<BridgeError> + Send + Sync + 'static,
    F: FnOnce(TransferCallbacks<T, P, E>) -> CancelHandle,
{
    let (outcome, _rx) = watch::channel(None);
    let core = Arc::new(Core {
        operation,
        progress: Hub::new(operation, config.progress_replay),
        outcome,
        phase: PhaseCell::new(operation),
        slot: CancelSlot::new(operation, config.cancel_policy),
    });
    core.phase.activate();

    let guard = Arc::new(ReleaseGuard { core: core.clone() });
    let callbacks = TransferCallbacks {
        on_progress: {
            let guard = guard.clone();
            Box::new(move |update| guard.core.progress(update))
        },
        on_result: {
            let guard = guard.clone();
            Box::new(move |value| guard.core.succeed(value))
        },
        on_failure: Box::new(move |error| guard.core.fail(error)),
    };

    log::debug!("{operation}: dispatching ({})", Shape::Transfer);
    let handle = op(callbacks);
    core.slot.install(handle);
    TransferOperation { core }
}
