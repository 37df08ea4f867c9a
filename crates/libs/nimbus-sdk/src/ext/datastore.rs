use nimbus_bridge::{pending, sequence, ItemStream, PendingCall};

use crate::error::DataStoreError;
use crate::traits::DataStoreCategory;
use crate::types::{ItemChange, ModelRecord, ObserveSelector, QueryOptions, QueryPredicate};

/// Awaitable writes, lazy queries and change observation.
///
/// Observation streams never finish on their own; dropping one cancels the
/// observation.
pub trait DataStoreCategoryExt: DataStoreCategory {
    fn save_record(&self, item: ModelRecord) -> PendingCall<(), DataStoreError> {
        self.save_record_if(item, QueryPredicate::All)
    }

    /// Saves `item` only if the stored version satisfies `predicate`.
    fn save_record_if(
        &self,
        item: ModelRecord,
        predicate: QueryPredicate,
    ) -> PendingCall<(), DataStoreError> {
        pending::single("datastore.save", &self.bridge_config(), |ok, err| {
            self.dispatch_save(item, predicate, ok, err);
            None
        })
    }

    fn delete_record(&self, item: ModelRecord) -> PendingCall<(), DataStoreError> {
        self.delete_record_if(item, QueryPredicate::All)
    }

    fn delete_record_if(
        &self,
        item: ModelRecord,
        predicate: QueryPredicate,
    ) -> PendingCall<(), DataStoreError> {
        pending::single("datastore.delete", &self.bridge_config(), |ok, err| {
            self.dispatch_delete(item, predicate, ok, err);
            None
        })
    }

    fn query_records(
        &self,
        model: &str,
        predicate: QueryPredicate,
    ) -> ItemStream<ModelRecord, DataStoreError> {
        self.query_records_with_options(model, QueryOptions::matching(predicate))
    }

    fn query_records_with_options(
        &self,
        model: &str,
        options: QueryOptions,
    ) -> ItemStream<ModelRecord, DataStoreError> {
        sequence::batches("datastore.query", |sink| {
            self.dispatch_query(model, options, sink)
        })
    }

    /// Every change to every model.
    fn observe(&self) -> ItemStream<ItemChange, DataStoreError> {
        self.observe_selected(ObserveSelector::All)
    }

    fn observe_model(&self, model: &str) -> ItemStream<ItemChange, DataStoreError> {
        self.observe_selected(ObserveSelector::Model {
            model: model.to_owned(),
        })
    }

    fn observe_item(&self, model: &str, id: &str) -> ItemStream<ItemChange, DataStoreError> {
        self.observe_selected(ObserveSelector::Item {
            model: model.to_owned(),
            id: id.to_owned(),
        })
    }

    fn observe_matching(
        &self,
        model: &str,
        predicate: QueryPredicate,
    ) -> ItemStream<ItemChange, DataStoreError> {
        self.observe_selected(ObserveSelector::Matching {
            model: model.to_owned(),
            predicate,
        })
    }

    fn observe_selected(
        &self,
        selector: ObserveSelector,
    ) -> ItemStream<ItemChange, DataStoreError> {
        sequence::observe("datastore.observe", &self.bridge_config(), |on_start, sink| {
            self.dispatch_observe(selector, on_start, sink)
        })
    }

    fn start(&self) -> PendingCall<(), DataStoreError> {
        pending::single("datastore.start", &self.bridge_config(), |ok, err| {
            self.dispatch_start(ok, err);
            None
        })
    }

    fn stop(&self) -> PendingCall<(), DataStoreError> {
        pending::single("datastore.stop", &self.bridge_config(), |ok, err| {
            self.dispatch_stop(ok, err);
            None
        })
    }

    fn clear(&self) -> PendingCall<(), DataStoreError> {
        pending::single("datastore.clear", &self.bridge_config(), |ok, err| {
            self.dispatch_clear(ok, err);
            None
        })
    }
}

impl<C: DataStoreCategory + ?Sized> DataStoreCategoryExt for C {}
