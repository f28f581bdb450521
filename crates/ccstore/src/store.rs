use std::io::Read;

use crate::backend::{Backend, SessionHandle};
use crate::error::StoreResult;
use crate::path::remote_key;

/// A data store: one backend plus the root every path is composed against.
///
/// Built only by [`Connector::connect`](crate::Connector::connect) and
/// immutable afterwards. Operations are synchronous and take `&self`; the
/// store adds no locking, so concurrent writers to one path race exactly as
/// the medium allows.
#[derive(Debug)]
pub struct UnifiedStore {
    backend: Backend,
    root: String,
}

impl UnifiedStore {
    pub(crate) fn new(backend: Backend, root: String) -> Self {
        Self { backend, root }
    }

    /// Open the object at `path` for reading.
    ///
    /// Local failures are classified as `NotFound`, `AccessDenied`, or
    /// `Io`; remote failures come back as `Backend` unchanged.
    pub fn get(&self, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        self.backend.get(&self.root, path)
    }

    /// Write everything `reader` yields to `path`, creating intermediate
    /// directories for local stores. Returns the number of bytes written.
    pub fn put(&self, reader: &mut dyn Read, path: &str) -> StoreResult<u64> {
        self.backend.put(reader, &self.root, path)
    }

    /// Remove the object at `path`.
    pub fn delete(&self, path: &str) -> StoreResult<()> {
        self.backend.delete(&self.root, path)
    }

    /// The backend's native session, or [`SessionHandle::None`] for local
    /// stores. Not cached.
    pub fn session_handle(&self) -> SessionHandle {
        self.backend.session_handle()
    }

    /// `root + "/" + path`, for display and logging.
    pub fn absolute_path(&self, path: &str) -> String {
        remote_key(&self.root, path)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}
