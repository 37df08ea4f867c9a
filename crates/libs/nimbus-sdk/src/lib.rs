//! Async adapters over the callback-style nimbus client SDK.
//!
//! The SDK's five categories are modelled as collaborator traits whose
//! operations take success and failure callbacks. This crate provides:
//!
//! - **Collaborator traits** per category, plus the composite [`Sdk`]
//! - **Extension traits** turning every operation into a future or stream
//! - **Category value types** and one error enum per category
//! - **`StubSdk`** failing every operation with `NotImplemented`
//!
//! # Category traits
//!
//! - [`ApiCategory`]: GraphQL queries, mutations, subscriptions and REST
//! - [`AuthCategory`]: sign-up, sign-in, devices, passwords, attributes
//! - [`DataStoreCategory`]: local models, queries, change observation
//! - [`PredictionsCategory`]: speech, translation, identification
//! - [`StorageCategory`]: URLs, listings, uploads and downloads
//!
//! The bridge shapes themselves live in `nimbus-bridge`, re-exported here as
//! [`bridge`].

pub mod error;
pub mod ext;
pub mod traits;
pub mod types;

pub use nimbus_bridge as bridge;

pub use error::{ApiError, AuthError, DataStoreError, PredictionsError, StorageError};
pub use ext::{
    ApiCategoryExt, AuthCategoryExt, DataStoreCategoryExt, GraphQlSubscription,
    PredictionsCategoryExt, StorageCategoryExt, StorageTransfer,
};
pub use traits::{
    ApiCategory, AuthCategory, Collaborator, DataStoreCategory, DownloadCallbacks,
    PredictionsCategory, Sdk, StorageCategory, UploadFileCallbacks, UploadInputStreamCallbacks,
};
pub use types::*;

mod stub;
pub use stub::StubSdk;
