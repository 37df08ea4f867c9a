use nimbus_bridge::BridgeError;
use serde::{Deserialize, Serialize};

/// Errors reported by the API category (GraphQL and REST).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    #[error("not authorized: {message}")]
    NotAuthorized { message: String },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("decode error: {message}")]
    Decode { message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl ApiError {
    /// Returns `true` for transient errors that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Bridge(err) if err.is_canceled())
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }
}

/// Errors reported by the auth category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("not authorized: {message}")]
    NotAuthorized { message: String },

    #[error("user not found: {username}")]
    UserNotFound { username: String },

    #[error("confirmation code mismatch")]
    CodeMismatch,

    #[error("confirmation code expired")]
    CodeExpired,

    #[error("session expired")]
    SessionExpired,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("service error: {message}")]
    Service { message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl AuthError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Service { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Bridge(err) if err.is_canceled())
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }
}

/// Errors reported by the local data store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DataStoreError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("conflict on {model}/{id}")]
    Conflict { model: String, id: String },

    #[error("condition not met for {model}/{id}")]
    ConditionFailed { model: String, id: String },

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("sync error: {message}")]
    Sync { message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl DataStoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Sync { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Bridge(err) if err.is_canceled())
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }
}

/// Errors reported by the predictions category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PredictionsError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("unsupported: {message}")]
    Unsupported { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("service error: {message}")]
    Service { message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl PredictionsError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Service { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Bridge(err) if err.is_canceled())
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }
}

/// Errors reported by the storage category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("not found: {key}")]
    NotFound { key: String },

    #[error("access denied: {key}")]
    AccessDenied { key: String },

    #[error("local i/o error: {message}")]
    Io { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("service error: {message}")]
    Service { message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl StorageError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Service { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Bridge(err) if err.is_canceled())
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_bridge::Shape;

    #[test]
    fn http_retry_classification() {
        let http = |status| ApiError::Http {
            status,
            message: "upstream".into(),
        };
        assert!(http(429).is_retryable());
        assert!(!http(404).is_retryable());
        assert!(http(503).is_retryable());
    }

    #[test]
    fn bridge_errors_convert_and_display_transparently() {
        let err: StorageError = BridgeError::canceled("storage.download_file").into();
        assert!(err.is_canceled());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "canceled: storage.download_file");

        let err: AuthError = BridgeError::abandoned("auth.sign_in", Shape::Single).into();
        assert!(!err.is_canceled());
        assert!(matches!(
            err,
            AuthError::Bridge(BridgeError::Abandoned { .. })
        ));
    }

    #[test]
    fn not_implemented_names_the_method() {
        let err = DataStoreError::not_implemented("datastore.save");
        assert_eq!(err.to_string(), "not implemented: datastore.save");
        let err = PredictionsError::not_implemented("predictions.identify");
        assert_eq!(err.to_string(), "not implemented: predictions.identify");
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = StorageError::from(io);
        assert_eq!(
            err,
            StorageError::Io {
                message: "read-only volume".into()
            }
        );
    }
}
