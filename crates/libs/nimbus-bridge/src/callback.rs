//! Callback vocabulary shared by collaborators and the bridge.

/// One-shot callback. Collaborators invoke it at most once.
pub type Consumer<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Repeatable callback, invoked once per delivered value.
pub type Listener<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

/// One-shot signal without a payload.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// Handle returned by a collaborator to request early termination of an
/// in-flight operation.
pub trait Cancelable: Send + Sync {
    fn cancel(&self);
}

impl<F> Cancelable for F
where
    F: Fn() + Send + Sync,
{
    fn cancel(&self) {
        self()
    }
}

pub type CancelHandle = Box<dyn Cancelable>;

/// Wraps a closure as a [`CancelHandle`].
pub fn cancel_handle<F>(f: F) -> CancelHandle
where
    F: Fn() + Send + Sync + 'static,
{
    Box::new(f)
}

/// A handle whose `cancel` does nothing, for operations that cannot be
/// interrupted once dispatched.
pub fn noop_handle() -> CancelHandle {
    Box::new(|| {})
}
