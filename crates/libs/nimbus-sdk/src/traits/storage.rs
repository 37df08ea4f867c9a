use std::path::Path;

use nimbus_bridge::{CancelHandle, Consumer, TransferCallbacks};

use super::Collaborator;
use crate::error::StorageError;
use crate::types::*;

pub type DownloadCallbacks =
    TransferCallbacks<StorageDownloadFileResult, TransferProgress, StorageError>;
pub type UploadFileCallbacks =
    TransferCallbacks<StorageUploadFileResult, TransferProgress, StorageError>;
pub type UploadInputStreamCallbacks =
    TransferCallbacks<StorageUploadInputStreamResult, TransferProgress, StorageError>;

/// Object storage keyed by path-like strings.
pub trait StorageCategory: Collaborator {
    fn dispatch_get_url(
        &self,
        key: &str,
        options: StorageGetUrlOptions,
        on_success: Consumer<StorageGetUrlResult>,
        on_failure: Consumer<StorageError>,
    );

    fn dispatch_download_file(
        &self,
        key: &str,
        local: &Path,
        options: StorageDownloadFileOptions,
        callbacks: DownloadCallbacks,
    ) -> CancelHandle;

    fn dispatch_upload_file(
        &self,
        key: &str,
        local: &Path,
        options: StorageUploadFileOptions,
        callbacks: UploadFileCallbacks,
    ) -> CancelHandle;

    fn dispatch_upload_input_stream(
        &self,
        key: &str,
        local: InputStream,
        options: StorageUploadInputStreamOptions,
        callbacks: UploadInputStreamCallbacks,
    ) -> CancelHandle;

    fn dispatch_remove(
        &self,
        key: &str,
        options: StorageRemoveOptions,
        on_success: Consumer<StorageRemoveResult>,
        on_failure: Consumer<StorageError>,
    );

    fn dispatch_list(
        &self,
        path: &str,
        options: StorageListOptions,
        on_success: Consumer<StorageListResult>,
        on_failure: Consumer<StorageError>,
    );
}
