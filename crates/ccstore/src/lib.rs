//! Uniform data-store facade over local filesystems and remote object stores.
//!
//! Callers read and write named byte streams through a [`UnifiedStore`]
//! without knowing which medium sits underneath. A [`Connector`] turns a
//! [`StoreDescription`] into a ready store, picking the backend from the
//! description's store type.
//!
//! # Backends
//!
//! - [`LocalBackend`] -- direct file I/O under the store root (`FS`)
//! - [`RemoteBackend`] -- keyed calls to an [`ObjectClient`] (`S3`)
//!
//! The object-store protocol itself lives outside this crate: supply a
//! [`ClientFactory`] that builds clients from a [`RemoteConfig`].
//! [`InMemoryObjectClient`] is a HashMap-backed client for tests and
//! embedding.
//!
//! # Paths
//!
//! Every operation composes its path against the store root. Remote keys
//! are `root + "/" + path`, untouched. Local paths are lexically cleaned and
//! cannot climb above the root.
//!
//! ```no_run
//! use ccstore::{Connector, StoreDescription, StoreType};
//!
//! let desc = StoreDescription::new("scratch", StoreType::BlockFilesystem)
//!     .with_parameter("root", "/tmp/ccstore");
//! let store = Connector::local().connect(&desc)?;
//! store.put(&mut &b"hello"[..], "a/b.txt")?;
//! # Ok::<(), ccstore::StoreError>(())
//! ```

pub mod backend;
pub mod connect;
pub mod error;
pub mod memory;
pub mod path;
pub mod remote;
pub mod store;

// Re-export primary types at crate root for ergonomic imports.
pub use backend::{Backend, LocalBackend, RemoteBackend, SessionHandle};
pub use ccstore_types::{Parameters, ProfileRef, StoreDescription, StoreType};
pub use connect::{Connector, DEFAULT_FS_ROOT, ROOT_PARAM};
pub use error::{BackendError, StoreError, StoreResult};
pub use memory::{InMemoryClientFactory, InMemoryObjectClient};
pub use remote::{ClientFactory, ObjectClient, RemoteConfig};
pub use store::UnifiedStore;
