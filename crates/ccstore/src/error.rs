use std::io;
use std::path::{Path, PathBuf};

/// Opaque error raised by a remote object-store client.
///
/// The facade never inspects or reclassifies it.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from data store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A store description parameter is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The description names a store type no backend handles.
    #[error("unsupported store type: {0}")]
    UnsupportedStoreType(String),

    /// The local file does not exist.
    #[error("not found: {}: {source}", path.display())]
    NotFound { path: PathBuf, source: io::Error },

    /// The local file exists but may not be accessed.
    #[error("access denied: {}: {source}", path.display())]
    AccessDenied { path: PathBuf, source: io::Error },

    /// Any other local I/O failure. Displays the underlying message as is.
    #[error("{source}")]
    Io { path: PathBuf, source: io::Error },

    /// Error propagated unchanged from a remote backend client.
    #[error(transparent)]
    Backend(BackendError),
}

impl StoreError {
    /// Classify a local I/O failure on `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Returns `true` for errors raised while connecting a store.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnsupportedStoreType(_))
    }

    /// Returns `true` if the local object was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
