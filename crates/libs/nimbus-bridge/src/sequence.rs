use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::Stream;
use tokio::sync::mpsc;

use crate::callback::{CancelHandle, Consumer};
use crate::cancel::CancelSlot;
use crate::config::BridgeConfig;
use crate::shape::Shape;

enum Delivery<T, E> {
    Item(T),
    Failed(E),
    Finished,
}

/// Producer half of an [`ItemStream`], handed to collaborator callbacks.
///
/// Clones share one stream. Values pushed after `finish` or `fail` are
/// dropped. When every sink is gone the stream ends normally.
pub struct BatchSink<T, E> {
    operation: &'static str,
    tx: mpsc::UnboundedSender<Delivery<T, E>>,
    /// Set by either side once no more items are accepted.
    closed: Arc<AtomicBool>,
    /// Set only by the producer's own `finish` or `fail`.
    settled: Arc<AtomicBool>,
}

impl<T, E> Clone for BatchSink<T, E> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation,
            tx: self.tx.clone(),
            closed: self.closed.clone(),
            settled: self.settled.clone(),
        }
    }
}

impl<T, E> BatchSink<T, E> {
    /// Drains `batch` into the stream in iteration order.
    pub fn push<I>(&self, batch: I)
    where
        I: IntoIterator<Item = T>,
    {
        if self.is_closed() {
            self.report_late("batch");
            return;
        }
        let mut count = 0usize;
        for item in batch {
            if self.tx.send(Delivery::Item(item)).is_err() {
                log::trace!(
                    "{}: consumer gone, discarding batch remainder",
                    self.operation
                );
                return;
            }
            count += 1;
        }
        log::trace!("{}: buffered batch of {count}", self.operation);
    }

    pub fn send(&self, item: T) {
        self.push(std::iter::once(item));
    }

    /// Ends the stream normally.
    pub fn finish(&self) {
        if !self.settled.swap(true, Ordering::SeqCst) && !self.closed.swap(true, Ordering::SeqCst) {
            let _ = self.tx.send(Delivery::Finished);
        }
    }

    /// Ends the stream with `error`. Items already buffered stay readable.
    pub fn fail(&self, error: E) {
        if self.settled.swap(true, Ordering::SeqCst) {
            log::warn!(
                "{}: failure delivered after the sequence settled",
                self.operation
            );
            return;
        }
        if self.closed.swap(true, Ordering::SeqCst) {
            log::debug!(
                "{}: failure delivered after the consumer left, discarded",
                self.operation
            );
            return;
        }
        let _ = self.tx.send(Delivery::Failed(error));
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The consumer leaving first makes late deliveries expected; the
    /// producer delivering after its own close is a collaborator bug.
    fn report_late(&self, what: &str) {
        if self.settled.load(Ordering::SeqCst) {
            log::warn!(
                "{}: {what} delivered after the sequence settled",
                self.operation
            );
        } else {
            log::debug!(
                "{}: {what} delivered after the consumer left, discarded",
                self.operation
            );
        }
    }
}

/// Lazy, non-restartable sequence fed by collaborator callbacks.
///
/// Yields `Err` at most once, as its final item. Buffering is unbounded:
/// delivery is not paced to consumption.
pub struct ItemStream<T, E> {
    operation: &'static str,
    rx: mpsc::UnboundedReceiver<Delivery<T, E>>,
    closed: Arc<AtomicBool>,
    cancel: Option<Arc<CancelSlot>>,
    done: bool,
}

impl<T, E> ItemStream<T, E> {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn shape(&self) -> Shape {
        Shape::Sequence
    }

    /// Stops the stream. For observed streams this also cancels the
    /// collaborator's handle.
    pub fn cancel(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        self.closed.store(true, Ordering::SeqCst);
        self.rx.close();
        if let Some(slot) = &self.cancel {
            slot.cancel();
        }
    }

    fn settle(&mut self) {
        self.done = true;
        if let Some(slot) = &self.cancel {
            slot.release();
        }
    }
}

impl<T, E> Stream for ItemStream<T, E> {
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.done {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Delivery::Item(item))) => Poll::Ready(Some(Ok(item))),
            Poll::Ready(Some(Delivery::Failed(error))) => {
                this.settle();
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(Some(Delivery::Finished)) | Poll::Ready(None) => {
                this.settle();
                Poll::Ready(None)
            }
        }
    }
}

impl<T, E> Drop for ItemStream<T, E> {
    fn drop(&mut self) {
        if !self.done {
            self.closed.store(true, Ordering::SeqCst);
            if let Some(slot) = &self.cancel {
                slot.cancel();
            }
        }
    }
}

impl<T, E> fmt::Debug for ItemStream<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStream")
            .field("operation", &self.operation)
            .field("done", &self.done)
            .finish()
    }
}

fn channel<T, E>(operation: &'static str) -> (BatchSink<T, E>, ItemStream<T, E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let closed = Arc::new(AtomicBool::new(false));
    let sink = BatchSink {
        operation,
        tx,
        closed: closed.clone(),
        settled: Arc::new(AtomicBool::new(false)),
    };
    let stream = ItemStream {
        operation,
        rx,
        closed,
        cancel: None,
        done: false,
    };
    (sink, stream)
}

/// Bridges a batch-delivering query. `op` runs once, synchronously.
pub fn batches<T, E, F>(operation: &'static str, op: F) -> ItemStream<T, E>
where
    F: FnOnce(BatchSink<T, E>),
{
    let (sink, stream) = channel(operation);
    log::debug!("{operation}: dispatching ({})", Shape::Sequence);
    op(sink);
    stream
}

/// Bridges an open-ended observation whose cancellation handle arrives
/// through a start callback. Dropping or canceling the stream cancels the
/// handle, whenever it arrives.
pub fn observe<T, E, F>(operation: &'static str, config: &BridgeConfig, op: F) -> ItemStream<T, E>
where
    F: FnOnce(Consumer<CancelHandle>, BatchSink<T, E>),
{
    let (sink, mut stream) = channel(operation);
    let slot = Arc::new(CancelSlot::new(operation, config.cancel_policy));
    stream.cancel = Some(slot.clone());

    let on_start: Consumer<CancelHandle> = Box::new(move |handle| {
        log::trace!("{}: observation started", slot.operation());
        slot.install(handle);
    });
    log::debug!("{operation}: dispatching ({}, observed)", Shape::Sequence);
    op(on_start, sink);
    stream
}
