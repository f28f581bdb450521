//! Storage backends behind a [`UnifiedStore`](crate::UnifiedStore).
//!
//! [`Backend`] is a closed set: direct local file I/O, or a remote object
//! store reached through an [`ObjectClient`]. Each variant composes its own
//! form of the root-relative path before touching the medium.

use std::any::Any;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::sync::Arc;

use ccstore_types::StoreType;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::path::{local_path, remote_key};
use crate::remote::ObjectClient;

/// Opaque backend-native session, exposed for collaborators that need
/// access beyond Get/Put/Delete.
#[derive(Clone, Default)]
pub enum SessionHandle {
    /// The backend has no session object (local access is direct).
    #[default]
    None,
    /// The remote backend's native client.
    Client(Arc<dyn Any + Send + Sync>),
}

impl SessionHandle {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Borrow the native client as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::None => None,
            Self::Client(client) => client.downcast_ref::<T>(),
        }
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("SessionHandle::None"),
            Self::Client(_) => f.write_str("SessionHandle::Client(..)"),
        }
    }
}

/// Direct local or mounted filesystem access. Carries no state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalBackend;

impl LocalBackend {
    fn get(&self, root: &str, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        let fp = local_path(root, path);
        let file = File::open(&fp).map_err(|e| StoreError::from_io(&fp, e))?;
        debug!(path = %fp.display(), "local get");
        Ok(Box::new(file))
    }

    fn put(&self, reader: &mut dyn Read, root: &str, path: &str) -> StoreResult<u64> {
        let dest = local_path(root, path);
        let io_err = |e: io::Error| StoreError::Io {
            path: dest.clone(),
            source: e,
        };
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        // `out` is dropped, and the descriptor released, on every return.
        let mut out = File::create(&dest).map_err(io_err)?;
        let n = io::copy(reader, &mut out).map_err(io_err)?;
        debug!(path = %dest.display(), bytes = n, "local put");
        Ok(n)
    }

    fn delete(&self, root: &str, path: &str) -> StoreResult<()> {
        let fp = local_path(root, path);
        fs::remove_file(&fp).map_err(|e| StoreError::from_io(&fp, e))?;
        debug!(path = %fp.display(), "local delete");
        Ok(())
    }
}

/// A remote object store reached through a collaborator's client.
pub struct RemoteBackend {
    client: Box<dyn ObjectClient>,
}

impl RemoteBackend {
    pub fn new(client: Box<dyn ObjectClient>) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &dyn ObjectClient {
        self.client.as_ref()
    }

    fn get(&self, root: &str, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        let key = remote_key(root, path);
        debug!(key = %key, "remote get");
        self.client.get_object(&key).map_err(StoreError::Backend)
    }

    fn put(&self, reader: &mut dyn Read, root: &str, path: &str) -> StoreResult<u64> {
        let key = remote_key(root, path);
        let n = self
            .client
            .put_object(&key, reader)
            .map_err(StoreError::Backend)?;
        debug!(key = %key, bytes = n, "remote put");
        Ok(n)
    }

    fn delete(&self, root: &str, path: &str) -> StoreResult<()> {
        let key = remote_key(root, path);
        debug!(key = %key, "remote delete");
        self.client.delete_object(&key).map_err(StoreError::Backend)
    }
}

impl fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBackend").finish_non_exhaustive()
    }
}

/// The medium a store reads and writes.
#[derive(Debug)]
pub enum Backend {
    Local(LocalBackend),
    Remote(RemoteBackend),
}

impl Backend {
    /// The store type this backend serves.
    pub fn store_type(&self) -> StoreType {
        match self {
            Self::Local(_) => StoreType::BlockFilesystem,
            Self::Remote(_) => StoreType::RemoteObjectStore,
        }
    }

    pub(crate) fn get(&self, root: &str, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        match self {
            Self::Local(b) => b.get(root, path),
            Self::Remote(b) => b.get(root, path),
        }
    }

    pub(crate) fn put(&self, reader: &mut dyn Read, root: &str, path: &str) -> StoreResult<u64> {
        match self {
            Self::Local(b) => b.put(reader, root, path),
            Self::Remote(b) => b.put(reader, root, path),
        }
    }

    pub(crate) fn delete(&self, root: &str, path: &str) -> StoreResult<()> {
        match self {
            Self::Local(b) => b.delete(root, path),
            Self::Remote(b) => b.delete(root, path),
        }
    }

    pub(crate) fn session_handle(&self) -> SessionHandle {
        match self {
            Self::Local(_) => SessionHandle::None,
            Self::Remote(b) => SessionHandle::Client(b.client.native_client()),
        }
    }
}

impl From<LocalBackend> for Backend {
    fn from(b: LocalBackend) -> Self {
        Self::Local(b)
    }
}

impl From<RemoteBackend> for Backend {
    fn from(b: RemoteBackend) -> Self {
        Self::Remote(b)
    }
}
