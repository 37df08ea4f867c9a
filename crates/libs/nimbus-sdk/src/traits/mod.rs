mod api;
mod auth;
mod datastore;
mod predictions;
mod storage;

use nimbus_bridge::BridgeConfig;

pub use api::ApiCategory;
pub use auth::AuthCategory;
pub use datastore::DataStoreCategory;
pub use predictions::PredictionsCategory;
pub use storage::{
    DownloadCallbacks, StorageCategory, UploadFileCallbacks, UploadInputStreamCallbacks,
};

/// Common supertrait of every category collaborator.
///
/// Collaborators own their worker threads and invoke the callbacks they are
/// handed from there. Each callback is invoked at most once unless its type
/// is a `Listener`, and deliveries for one operation arrive sequentially.
pub trait Collaborator: Send + Sync {
    /// Bridge settings applied to calls made through this collaborator.
    fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::default()
    }
}

/// Composite trait encompassing all five categories.
///
/// Automatically implemented for any type that implements all of them. Use
/// `Arc<dyn Sdk>` as the shared handle type.
pub trait Sdk:
    ApiCategory + AuthCategory + DataStoreCategory + PredictionsCategory + StorageCategory
{
}

impl<T> Sdk for T where
    T: ApiCategory + AuthCategory + DataStoreCategory + PredictionsCategory + StorageCategory
{
}
