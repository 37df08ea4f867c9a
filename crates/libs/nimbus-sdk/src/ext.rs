//! Async and stream forms of the collaborator operations.
//!
//! Each extension trait is implemented for every collaborator of its
//! category, so importing the trait is all that is needed:
//!
//! ```ignore
//! use nimbus_sdk::AuthCategoryExt;
//!
//! let result = sdk.sign_in(Some("ada"), Some("hunter2")).await?;
//! ```

mod api;
mod auth;
mod datastore;
mod predictions;
mod storage;

pub use api::{ApiCategoryExt, GraphQlSubscription};
pub use auth::AuthCategoryExt;
pub use datastore::DataStoreCategoryExt;
pub use predictions::PredictionsCategoryExt;
pub use storage::{StorageCategoryExt, StorageTransfer};
