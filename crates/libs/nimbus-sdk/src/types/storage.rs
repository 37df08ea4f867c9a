use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StorageAccessLevel {
    #[default]
    Guest,
    Protected,
    Private,
}

/// Bytes moved so far in a transfer.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferProgress {
    pub current_bytes: u64,
    pub total_bytes: u64,
}

impl TransferProgress {
    pub fn new(current_bytes: u64, total_bytes: u64) -> Self {
        Self {
            current_bytes,
            total_bytes,
        }
    }

    /// Fraction in `0.0..=1.0`. An unknown (zero) total reports `0.0`.
    pub fn fraction_completed(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.current_bytes as f64 / self.total_bytes as f64).min(1.0)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageGetUrlOptions {
    pub access_level: StorageAccessLevel,
    pub target_identity_id: Option<String>,
    pub expires_in_secs: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageGetUrlResult {
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageDownloadFileOptions {
    pub access_level: StorageAccessLevel,
    pub target_identity_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageDownloadFileResult {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageUploadFileOptions {
    pub access_level: StorageAccessLevel,
    pub content_type: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageUploadFileResult {
    pub key: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageUploadInputStreamOptions {
    pub access_level: StorageAccessLevel,
    pub content_type: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageUploadInputStreamResult {
    pub key: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageRemoveOptions {
    pub access_level: StorageAccessLevel,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageRemoveResult {
    pub key: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageListOptions {
    pub access_level: StorageAccessLevel,
    pub target_identity_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageItem {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<i64>,
    pub etag: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageListResult {
    pub items: Vec<StorageItem>,
}

/// Source of bytes for [`upload_input_stream`](crate::StorageCategoryExt::upload_input_stream).
pub type InputStream = Box<dyn std::io::Read + Send>;
