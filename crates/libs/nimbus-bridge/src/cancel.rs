use std::sync::Mutex;

use crate::callback::CancelHandle;
use crate::config::CancelPolicy;

enum SlotState {
    /// No handle yet, no cancel requested.
    Empty,
    Armed(CancelHandle),
    /// Cancel requested before the handle arrived (deferred policy only).
    Requested,
    Canceled,
    /// The operation reached a terminal result; cancellation no longer applies.
    Released,
}

/// Holds the collaborator's cancellation handle for one bridged call.
///
/// The handle may arrive after the caller has already asked to cancel. The
/// slot resolves that race according to its [`CancelPolicy`]. `cancel` is
/// idempotent: the handle is invoked at most once. Handles are always invoked
/// outside the slot lock, so a collaborator may deliver callbacks from inside
/// its own `cancel`.
pub struct CancelSlot {
    operation: &'static str,
    policy: CancelPolicy,
    state: Mutex<SlotState>,
}

impl CancelSlot {
    pub fn new(operation: &'static str, policy: CancelPolicy) -> Self {
        Self {
            operation,
            policy,
            state: Mutex::new(SlotState::Empty),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Stores the handle produced by the collaborator.
    pub fn install(&self, handle: CancelHandle) {
        let mut state = self.state.lock().expect("cancel slot mutex poisoned");
        match *state {
            SlotState::Empty => {
                *state = SlotState::Armed(handle);
            }
            SlotState::Requested => {
                *state = SlotState::Canceled;
                drop(state);
                log::debug!(
                    "{}: applying deferred cancel to late handle",
                    self.operation
                );
                handle.cancel();
            }
            SlotState::Canceled => {
                log::debug!(
                    "{}: handle arrived after an early cancel was dropped; leaving it running",
                    self.operation
                );
            }
            SlotState::Armed(_) => {
                log::warn!(
                    "{}: collaborator installed a second cancel handle",
                    self.operation
                );
                *state = SlotState::Armed(handle);
            }
            SlotState::Released => {}
        }
    }

    /// Requests cancellation. Returns `true` only for the first effective
    /// request.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock().expect("cancel slot mutex poisoned");
        match std::mem::replace(&mut *state, SlotState::Canceled) {
            SlotState::Armed(handle) => {
                drop(state);
                log::debug!("{}: canceling", self.operation);
                handle.cancel();
                true
            }
            SlotState::Empty => match self.policy {
                CancelPolicy::Deferred => {
                    *state = SlotState::Requested;
                    log::debug!(
                        "{}: cancel requested before handle; deferring",
                        self.operation
                    );
                    true
                }
                CancelPolicy::DropEarly => {
                    log::debug!(
                        "{}: cancel requested before handle; dropping",
                        self.operation
                    );
                    true
                }
            },
            previous @ (SlotState::Requested | SlotState::Canceled | SlotState::Released) => {
                *state = previous;
                false
            }
        }
    }

    /// Marks the operation terminal and drops any stored handle.
    pub fn release(&self) {
        let mut state = self.state.lock().expect("cancel slot mutex poisoned");
        if !matches!(*state, SlotState::Canceled) {
            *state = SlotState::Released;
        }
    }

    pub fn is_cancel_requested(&self) -> bool {
        matches!(
            *self.state.lock().expect("cancel slot mutex poisoned"),
            SlotState::Requested | SlotState::Canceled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::cancel_handle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_handle() -> (Arc<AtomicUsize>, CancelHandle) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let handle = cancel_handle(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, handle)
    }

    #[test]
    fn cancel_invokes_handle_once() {
        let slot = CancelSlot::new("test.op", CancelPolicy::Deferred);
        let (count, handle) = counting_handle();
        slot.install(handle);

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(slot.is_cancel_requested());
    }

    #[test]
    fn deferred_cancel_applies_to_late_handle() {
        let slot = CancelSlot::new("test.op", CancelPolicy::Deferred);
        assert!(slot.cancel());
        assert!(slot.is_cancel_requested());

        let (count, handle) = counting_handle();
        slot.install(handle);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(!slot.cancel());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_early_loses_request() {
        let slot = CancelSlot::new("test.op", CancelPolicy::DropEarly);
        assert!(slot.cancel());

        let (count, handle) = counting_handle();
        slot.install(handle);
        assert!(!slot.cancel());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_after_release_is_noop() {
        let slot = CancelSlot::new("test.op", CancelPolicy::Deferred);
        let (count, handle) = counting_handle();
        slot.install(handle);
        slot.release();

        assert!(!slot.cancel());
        assert!(!slot.is_cancel_requested());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handle_installed_after_release_is_dropped() {
        let slot = CancelSlot::new("test.op", CancelPolicy::Deferred);
        slot.release();
        let (count, handle) = counting_handle();
        slot.install(handle);
        assert!(!slot.cancel());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handle_may_reenter_slot_from_cancel() {
        let slot = Arc::new(CancelSlot::new("test.op", CancelPolicy::Deferred));
        let reentrant = slot.clone();
        slot.install(cancel_handle(move || reentrant.release()));
        assert!(slot.cancel());
        assert!(slot.is_cancel_requested());
    }
}
