use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::watch;

use crate::config::ReplayPolicy;

struct HubState<T, E> {
    /// Retained values tagged with their publish sequence number.
    values: VecDeque<(u64, T)>,
    next_seq: u64,
    /// `None` while open, `Some(None)` after a clean close.
    terminal: Option<Option<E>>,
}

/// Multi-subscriber hot stream with a replay cache.
///
/// Producers publish from any thread without a runtime. Each subscriber
/// first sees the retained values, then live values, then the terminal
/// error if the hub was closed with one. A subscriber that falls behind the
/// retention window resumes at the oldest retained value.
pub struct Hub<T, E> {
    name: &'static str,
    replay: ReplayPolicy,
    tx: watch::Sender<HubState<T, E>>,
}

impl<T, E> Hub<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, replay: ReplayPolicy) -> Self {
        let (tx, _rx) = watch::channel(HubState {
            values: VecDeque::new(),
            next_seq: 0,
            terminal: None,
        });
        Self { name, replay, tx }
    }

    /// Appends a value. Returns `false` if the hub is already closed.
    pub fn publish(&self, value: T) -> bool {
        let capacity = self.replay.capacity();
        let accepted = self.tx.send_if_modified(|state| {
            if state.terminal.is_some() {
                return false;
            }
            state.values.push_back((state.next_seq, value));
            state.next_seq += 1;
            if let Some(capacity) = capacity {
                while state.values.len() > capacity.max(1) {
                    state.values.pop_front();
                }
            }
            true
        });
        if !accepted {
            log::warn!("{}: value published after close was dropped", self.name);
        }
        accepted
    }

    /// Closes the hub, with an error or cleanly. Only the first close counts.
    pub fn close(&self, error: Option<E>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.terminal.is_some() {
                return false;
            }
            state.terminal = Some(error);
            true
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.borrow().terminal.is_some()
    }

    /// Newest retained value.
    pub fn latest(&self) -> Option<T> {
        self.tx
            .borrow()
            .values
            .back()
            .map(|(_, value)| value.clone())
    }

    pub fn subscribe(&self) -> HubStream<T, E> {
        let cursor = Cursor {
            name: self.name,
            rx: self.tx.subscribe(),
            next_seq: 0,
            done: false,
        };
        HubStream {
            inner: stream::unfold(cursor, Cursor::next).boxed(),
        }
    }
}

enum Step<T, E> {
    Value(T),
    Failed(E),
    Closed,
    Wait,
}

struct Cursor<T, E> {
    name: &'static str,
    rx: watch::Receiver<HubState<T, E>>,
    next_seq: u64,
    done: bool,
}

impl<T, E> Cursor<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn step(&mut self) -> Step<T, E> {
        let state = self.rx.borrow_and_update();
        // Retained sequence numbers are contiguous from the front.
        if let Some((front, _)) = state.values.front() {
            if self.next_seq < *front {
                log::trace!(
                    "{}: subscriber skipped {} values",
                    self.name,
                    front - self.next_seq
                );
                self.next_seq = *front;
            }
            let index = (self.next_seq - front) as usize;
            if let Some((seq, value)) = state.values.get(index) {
                self.next_seq = seq + 1;
                return Step::Value(value.clone());
            }
        }
        match &state.terminal {
            Some(Some(error)) => Step::Failed(error.clone()),
            Some(None) => Step::Closed,
            None => Step::Wait,
        }
    }

    async fn next(mut self) -> Option<(Result<T, E>, Self)> {
        if self.done {
            return None;
        }
        loop {
            match self.step() {
                Step::Value(value) => return Some((Ok(value), self)),
                Step::Failed(error) => {
                    self.done = true;
                    return Some((Err(error), self));
                }
                Step::Closed => return None,
                Step::Wait => {
                    if self.rx.changed().await.is_err() {
                        // Producer side gone without a close; drain what is left.
                        return match self.step() {
                            Step::Value(value) => Some((Ok(value), self)),
                            Step::Failed(error) => {
                                self.done = true;
                                Some((Err(error), self))
                            }
                            Step::Closed | Step::Wait => None,
                        };
                    }
                }
            }
        }
    }
}

/// One subscriber's view of a [`Hub`]. Yields `Err` at most once, as its
/// final item.
pub struct HubStream<T, E> {
    inner: BoxStream<'static, Result<T, E>>,
}

impl<T, E> Stream for HubStream<T, E> {
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl<T, E> fmt::Debug for HubStream<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubStream").finish_non_exhaustive()
    }
}
