use nimbus_bridge::{BatchSink, CancelHandle, Consumer};

use super::Collaborator;
use crate::error::DataStoreError;
use crate::types::*;

/// Local model persistence with background sync.
pub trait DataStoreCategory: Collaborator {
    /// Saves `item` if the stored version satisfies `predicate`.
    fn dispatch_save(
        &self,
        item: ModelRecord,
        predicate: QueryPredicate,
        on_success: Consumer<()>,
        on_failure: Consumer<DataStoreError>,
    );

    fn dispatch_delete(
        &self,
        item: ModelRecord,
        predicate: QueryPredicate,
        on_success: Consumer<()>,
        on_failure: Consumer<DataStoreError>,
    );

    /// Delivers matching records through `sink` in one or more batches, then
    /// finishes or fails it.
    fn dispatch_query(
        &self,
        model: &str,
        options: QueryOptions,
        sink: BatchSink<ModelRecord, DataStoreError>,
    );

    /// Starts an open-ended observation. The cancellation handle is handed to
    /// `on_start` once the observation is live; changes flow into `sink`.
    fn dispatch_observe(
        &self,
        selector: ObserveSelector,
        on_start: Consumer<CancelHandle>,
        sink: BatchSink<ItemChange, DataStoreError>,
    );

    fn dispatch_start(&self, on_success: Consumer<()>, on_failure: Consumer<DataStoreError>);

    fn dispatch_stop(&self, on_success: Consumer<()>, on_failure: Consumer<DataStoreError>);

    /// Stops sync and deletes all local data.
    fn dispatch_clear(&self, on_success: Consumer<()>, on_failure: Consumer<DataStoreError>);
}
