mod common;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use common::{init_logging, CancelCounter, Parked, Workers};
use futures::StreamExt;
use nimbus_sdk::bridge::{BridgeConfig, BridgeError, CancelHandle, Consumer, Phase, ReplayPolicy};
use nimbus_sdk::{
    Collaborator, DownloadCallbacks, InputStream, StorageCategory, StorageCategoryExt,
    StorageDownloadFileOptions, StorageDownloadFileResult, StorageError, StorageGetUrlOptions,
    StorageGetUrlResult, StorageItem, StorageListOptions, StorageListResult, StorageRemoveOptions,
    StorageRemoveResult, StorageUploadFileOptions, StorageUploadFileResult,
    StorageUploadInputStreamOptions, StorageUploadInputStreamResult, TransferProgress,
    UploadFileCallbacks, UploadInputStreamCallbacks,
};
use tempfile::TempDir;

const CHUNK: usize = 4;

/// Object store backed by a temporary directory. Keys under `flaky/` fail
/// halfway; keys under `slow/` never finish until canceled.
struct FakeBucket {
    root: TempDir,
    config: BridgeConfig,
    workers: Workers,
    cancels: CancelCounter,
    stalled: Parked<DownloadCallbacks>,
}

impl FakeBucket {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("tempdir"),
            config: BridgeConfig::default().with_progress_replay(ReplayPolicy::Full),
            workers: Workers::default(),
            cancels: CancelCounter::default(),
            stalled: Parked::default(),
        }
    }

    fn object(&self, key: &str) -> PathBuf {
        self.root.path().join(key)
    }

    fn put_object(&self, key: &str, bytes: &[u8]) {
        let path = self.object(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("object dir");
        }
        fs::write(path, bytes).expect("object write");
    }
}

/// Copies `bytes` to `target` in fixed chunks, reporting progress per chunk.
fn copy_with_progress(
    bytes: &[u8],
    target: &Path,
    on_progress: &(dyn Fn(TransferProgress) + Send + Sync),
) -> Result<(), StorageError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let total = bytes.len() as u64;
    let mut written = Vec::with_capacity(bytes.len());
    for chunk in bytes.chunks(CHUNK) {
        written.extend_from_slice(chunk);
        on_progress(TransferProgress::new(written.len() as u64, total));
    }
    fs::write(target, written)?;
    Ok(())
}

impl Collaborator for FakeBucket {
    fn bridge_config(&self) -> BridgeConfig {
        self.config
    }
}

impl StorageCategory for FakeBucket {
    fn dispatch_get_url(
        &self,
        key: &str,
        _options: StorageGetUrlOptions,
        on_success: Consumer<StorageGetUrlResult>,
        _on_failure: Consumer<StorageError>,
    ) {
        let url = format!("file://{}", self.object(key).display());
        on_success(StorageGetUrlResult { url });
    }

    fn dispatch_download_file(
        &self,
        key: &str,
        local: &Path,
        _options: StorageDownloadFileOptions,
        callbacks: DownloadCallbacks,
    ) -> CancelHandle {
        if key.starts_with("slow/") {
            self.stalled.park(callbacks);
            return self.cancels.handle();
        }
        let source = self.object(key);
        let local = local.to_path_buf();
        let flaky = key.starts_with("flaky/");
        let key = key.to_owned();
        self.workers.spawn(move || {
            if flaky {
                (callbacks.on_progress)(TransferProgress::new(10, 100));
                (callbacks.on_progress)(TransferProgress::new(50, 100));
                (callbacks.on_failure)(StorageError::Network {
                    message: "connection reset".into(),
                });
                return;
            }
            let bytes = match fs::read(&source) {
                Ok(bytes) => bytes,
                Err(_) => return (callbacks.on_failure)(StorageError::NotFound { key }),
            };
            match copy_with_progress(&bytes, &local, &*callbacks.on_progress) {
                Ok(()) => (callbacks.on_result)(StorageDownloadFileResult { file: local }),
                Err(err) => (callbacks.on_failure)(err),
            }
        });
        self.cancels.handle()
    }

    fn dispatch_upload_file(
        &self,
        key: &str,
        local: &Path,
        _options: StorageUploadFileOptions,
        callbacks: UploadFileCallbacks,
    ) -> CancelHandle {
        let target = self.object(key);
        let local = local.to_path_buf();
        let key = key.to_owned();
        self.workers.spawn(move || {
            let outcome = fs::read(&local)
                .map_err(StorageError::from)
                .and_then(|bytes| {
                    copy_with_progress(&bytes, &target, &*callbacks.on_progress)
                });
            match outcome {
                Ok(()) => (callbacks.on_result)(StorageUploadFileResult { key }),
                Err(err) => (callbacks.on_failure)(err),
            }
        });
        self.cancels.handle()
    }

    fn dispatch_upload_input_stream(
        &self,
        key: &str,
        mut local: InputStream,
        _options: StorageUploadInputStreamOptions,
        callbacks: UploadInputStreamCallbacks,
    ) -> CancelHandle {
        let target = self.object(key);
        let key = key.to_owned();
        self.workers.spawn(move || {
            let mut bytes = Vec::new();
            let outcome = local
                .read_to_end(&mut bytes)
                .map_err(StorageError::from)
                .and_then(|_| {
                    copy_with_progress(&bytes, &target, &*callbacks.on_progress)
                });
            match outcome {
                Ok(()) => (callbacks.on_result)(StorageUploadInputStreamResult { key }),
                Err(err) => (callbacks.on_failure)(err),
            }
        });
        self.cancels.handle()
    }

    fn dispatch_remove(
        &self,
        key: &str,
        _options: StorageRemoveOptions,
        on_success: Consumer<StorageRemoveResult>,
        on_failure: Consumer<StorageError>,
    ) {
        match fs::remove_file(self.object(key)) {
            Ok(()) => on_success(StorageRemoveResult {
                key: key.to_owned(),
            }),
            Err(_) => on_failure(StorageError::NotFound {
                key: key.to_owned(),
            }),
        }
    }

    fn dispatch_list(
        &self,
        path: &str,
        _options: StorageListOptions,
        on_success: Consumer<StorageListResult>,
        on_failure: Consumer<StorageError>,
    ) {
        let entries = match fs::read_dir(self.object(path)) {
            Ok(entries) => entries,
            Err(err) => return on_failure(err.into()),
        };
        let mut items: Vec<StorageItem> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let size = entry.metadata().ok()?.len();
                let name = entry.file_name().into_string().ok()?;
                Some(StorageItem {
                    key: format!("{path}/{name}"),
                    size,
                    last_modified: None,
                    etag: None,
                })
            })
            .collect();
        items.sort_by(|a, b| a.key.cmp(&b.key));
        on_success(StorageListResult { items });
    }
}

#[tokio::test]
async fn failed_download_reports_error_on_both_surfaces() {
    init_logging();
    let bucket = FakeBucket::new();
    let local = bucket.root.path().join("downloads/report.pdf");
    let download = bucket.download_file("flaky/report.pdf", &local, Default::default());

    let err = download.result().await.expect_err("download fails");
    let expected = StorageError::Network {
        message: "connection reset".into(),
    };
    assert_eq!(err, expected);

    let progress: Vec<_> = download.progress().collect().await;
    assert_eq!(
        progress,
        vec![
            Ok(TransferProgress::new(10, 100)),
            Ok(TransferProgress::new(50, 100)),
            Err(expected),
        ]
    );
    assert_eq!(download.phase(), Phase::Failed);
    bucket.workers.join_all();
    assert_eq!(bucket.cancels.count(), 0);
}

#[tokio::test]
async fn download_writes_local_file() {
    let bucket = FakeBucket::new();
    bucket.put_object("photos/cat.jpg", b"0123456789");
    let local = bucket.root.path().join("downloads/cat.jpg");

    let download = bucket.download_file("photos/cat.jpg", &local, Default::default());
    let fractions: Vec<f64> = download
        .progress()
        .filter_map(|p| async move { p.ok() })
        .map(|p| p.fraction_completed())
        .collect()
        .await;
    assert_eq!(fractions, [0.4, 0.8, 1.0]);

    let result = download.result().await.expect("download succeeds");
    assert_eq!(
        result,
        StorageDownloadFileResult {
            file: local.clone()
        }
    );
    assert_eq!(fs::read(&local).expect("local file"), b"0123456789");
    // Both callers see the same result.
    assert_eq!(download.try_result(), Some(Ok(result)));
    bucket.workers.join_all();
}

#[tokio::test]
async fn missing_object_fails_download() {
    let bucket = FakeBucket::new();
    let local = bucket.root.path().join("nothing");
    let download = bucket.download_file("missing.bin", &local, Default::default());
    let err = download.result().await.expect_err("missing");
    assert_eq!(
        err,
        StorageError::NotFound {
            key: "missing.bin".into()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn uploads_land_in_bucket() {
    let bucket = FakeBucket::new();
    let staged = tempfile::NamedTempFile::new().expect("staged file");
    fs::write(staged.path(), b"hello world").expect("stage");

    let upload = bucket.upload_file("docs/hello.txt", staged.path(), Default::default());
    let uploaded = StorageUploadFileResult {
        key: "docs/hello.txt".into(),
    };
    assert_eq!(upload.result().await, Ok(uploaded));

    let stream: InputStream = Box::new(std::io::Cursor::new(b"streamed".to_vec()));
    let upload = bucket.upload_input_stream("docs/streamed.txt", stream, Default::default());
    let result = upload.result().await.expect("stream upload");
    assert_eq!(result.key, "docs/streamed.txt");
    bucket.workers.join_all();

    let uploaded = fs::read(bucket.object("docs/hello.txt")).expect("uploaded");
    assert_eq!(uploaded, b"hello world");
    let listing = bucket.list("docs", Default::default()).await.expect("list");
    let keys: Vec<_> = listing
        .items
        .iter()
        .map(|item| item.key.as_str())
        .collect();
    assert_eq!(keys, ["docs/hello.txt", "docs/streamed.txt"]);
}

#[tokio::test]
async fn remove_and_get_url() {
    let bucket = FakeBucket::new();
    bucket.put_object("tmp/a.txt", b"a");

    let url = bucket.get_url("tmp/a.txt", Default::default()).await.expect("url");
    assert!(url.url.starts_with("file://"));
    assert!(url.url.ends_with("a.txt"));

    let removed = bucket.remove("tmp/a.txt", Default::default()).await.expect("remove");
    assert_eq!(removed.key, "tmp/a.txt");
    let err = bucket
        .remove("tmp/a.txt", Default::default())
        .await
        .expect_err("already gone");
    assert_eq!(
        err,
        StorageError::NotFound {
            key: "tmp/a.txt".into()
        }
    );
}

#[tokio::test]
async fn cancel_terminates_transfer_once() {
    let bucket = FakeBucket::new();
    let local = bucket.root.path().join("big.iso");
    let download = bucket.download_file("slow/big.iso", &local, Default::default());
    let callbacks = bucket.stalled.take();
    (callbacks.on_progress)(TransferProgress::new(1, 1000));

    download.cancel();
    download.cancel();
    assert_eq!(bucket.cancels.count(), 1);

    // Late deliveries from the collaborator are ignored.
    (callbacks.on_progress)(TransferProgress::new(2, 1000));
    (callbacks.on_result)(StorageDownloadFileResult { file: local });

    let canceled = StorageError::Bridge(BridgeError::canceled("storage.download_file"));
    assert_eq!(download.result().await, Err(canceled.clone()));
    let progress: Vec<_> = download.progress().collect().await;
    assert_eq!(
        progress,
        vec![Ok(TransferProgress::new(1, 1000)), Err(canceled)]
    );
    assert_eq!(download.phase(), Phase::Canceled);
}
