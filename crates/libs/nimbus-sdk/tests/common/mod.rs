#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use nimbus_sdk::bridge::{cancel_handle, CancelHandle};

pub mod query;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts how often the handles it hands out are canceled.
#[derive(Clone, Default)]
pub struct CancelCounter(Arc<AtomicUsize>);

impl CancelCounter {
    pub fn handle(&self) -> CancelHandle {
        let count = self.0.clone();
        cancel_handle(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs collaborator work on its own thread, the way the real SDK delivers
/// callbacks. Threads are joined on `join_all`.
#[derive(Clone, Default)]
pub struct Workers(Arc<Mutex<Vec<JoinHandle<()>>>>);

impl Workers {
    pub fn spawn<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = std::thread::spawn(work);
        self.0.lock().expect("workers").push(handle);
    }

    pub fn join_all(&self) {
        let handles: Vec<_> = self.0.lock().expect("workers").drain(..).collect();
        for handle in handles {
            handle.join().expect("collaborator thread panicked");
        }
    }
}

/// Holds callbacks a test wants to fire by hand later.
pub struct Parked<T>(Mutex<Option<T>>);

impl<T> Default for Parked<T> {
    fn default() -> Self {
        Self(Mutex::new(None))
    }
}

impl<T> Parked<T> {
    pub fn park(&self, value: T) {
        *self.0.lock().expect("parked") = Some(value);
    }

    pub fn take(&self) -> T {
        self.0
            .lock()
            .expect("parked")
            .take()
            .expect("nothing parked")
    }
}
