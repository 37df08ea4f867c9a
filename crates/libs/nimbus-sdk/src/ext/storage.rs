use std::path::Path;

use nimbus_bridge::{pending, transfer, PendingCall, TransferOperation};

use crate::error::StorageError;
use crate::traits::StorageCategory;
use crate::types::*;

/// An in-flight upload or download.
pub type StorageTransfer<T> = TransferOperation<T, TransferProgress, StorageError>;

/// Awaitable storage calls and observable transfers.
///
/// Dropping a [`StorageTransfer`] leaves it running; call `cancel` to stop it.
pub trait StorageCategoryExt: StorageCategory {
    fn get_url(
        &self,
        key: &str,
        options: StorageGetUrlOptions,
    ) -> PendingCall<StorageGetUrlResult, StorageError> {
        pending::single("storage.get_url", &self.bridge_config(), |ok, err| {
            self.dispatch_get_url(key, options, ok, err);
            None
        })
    }

    fn download_file(
        &self,
        key: &str,
        local: &Path,
        options: StorageDownloadFileOptions,
    ) -> StorageTransfer<StorageDownloadFileResult> {
        transfer::transfer("storage.download_file", &self.bridge_config(), |callbacks| {
            self.dispatch_download_file(key, local, options, callbacks)
        })
    }

    fn upload_file(
        &self,
        key: &str,
        local: &Path,
        options: StorageUploadFileOptions,
    ) -> StorageTransfer<StorageUploadFileResult> {
        transfer::transfer("storage.upload_file", &self.bridge_config(), |callbacks| {
            self.dispatch_upload_file(key, local, options, callbacks)
        })
    }

    fn upload_input_stream(
        &self,
        key: &str,
        local: InputStream,
        options: StorageUploadInputStreamOptions,
    ) -> StorageTransfer<StorageUploadInputStreamResult> {
        transfer::transfer("storage.upload_input_stream", &self.bridge_config(), |callbacks| {
            self.dispatch_upload_input_stream(key, local, options, callbacks)
        })
    }

    fn remove(
        &self,
        key: &str,
        options: StorageRemoveOptions,
    ) -> PendingCall<StorageRemoveResult, StorageError> {
        pending::single("storage.remove", &self.bridge_config(), |ok, err| {
            self.dispatch_remove(key, options, ok, err);
            None
        })
    }

    fn list(
        &self,
        path: &str,
        options: StorageListOptions,
    ) -> PendingCall<StorageListResult, StorageError> {
        pending::single("storage.list", &self.bridge_config(), |ok, err| {
            self.dispatch_list(path, options, ok, err);
            None
        })
    }
}

impl<C: StorageCategory + ?Sized> StorageCategoryExt for C {}
