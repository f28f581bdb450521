use std::sync::Arc;

use ccstore_types::{ProfileRef, StoreDescription, StoreType};
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::{Backend, LocalBackend, RemoteBackend};
use crate::error::{StoreError, StoreResult};
use crate::remote::{ClientFactory, RemoteConfig};
use crate::store::UnifiedStore;

/// Parameter naming the root every store path is composed against.
pub const ROOT_PARAM: &str = "root";

/// Root used by filesystem stores that do not name one.
pub const DEFAULT_FS_ROOT: &str = "/";

/// Resolves remote backend configuration for a profile.
type ConfigResolver = dyn Fn(&ProfileRef) -> RemoteConfig + Send + Sync;

/// Builds [`UnifiedStore`]s from store descriptions.
///
/// Remote clients come from the [`ClientFactory`] supplied by the
/// collaborator that speaks the object-store protocol. A connector without
/// one can still open filesystem stores.
#[derive(Clone)]
pub struct Connector {
    clients: Option<Arc<dyn ClientFactory>>,
    resolve_config: Arc<ConfigResolver>,
}

impl Connector {
    /// A connector for filesystem stores only.
    pub fn local() -> Self {
        Self {
            clients: None,
            resolve_config: Arc::new(RemoteConfig::from_env),
        }
    }

    /// A connector that builds remote clients with `clients`, configuring
    /// them from the process environment.
    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            clients: Some(clients),
            ..Self::local()
        }
    }

    /// Replace how remote configuration is resolved from a profile.
    pub fn with_config_resolver<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&ProfileRef) -> RemoteConfig + Send + Sync + 'static,
    {
        self.resolve_config = Arc::new(resolve);
        self
    }

    /// Connect the store `desc` describes.
    ///
    /// Either a fully built store or an error is returned; every
    /// configuration problem is reported here, never by later operations.
    pub fn connect(&self, desc: &StoreDescription) -> StoreResult<UnifiedStore> {
        let store = match &desc.store_type {
            StoreType::RemoteObjectStore => self.connect_remote(desc)?,
            StoreType::BlockFilesystem => connect_filesystem(desc)?,
            StoreType::Unrecognized(tag) => {
                warn!(store = %desc.name, store_type = %tag, "unsupported store type");
                return Err(StoreError::UnsupportedStoreType(tag.clone()));
            }
        };
        info!(
            store = %desc.name,
            store_type = %desc.store_type,
            root = %store.root(),
            "connected data store"
        );
        Ok(store)
    }

    fn connect_remote(&self, desc: &StoreDescription) -> StoreResult<UnifiedStore> {
        let clients = self.clients.as_ref().ok_or_else(|| {
            configuration_error(desc, "no remote client factory configured".to_string())
        })?;
        let profile = desc.profile.clone().unwrap_or_default();
        let config = (self.resolve_config)(&profile);
        let client = clients.build(&config).map_err(|e| {
            configuration_error(desc, format!("cannot build remote client for profile {profile:?}: {e}"))
        })?;

        let root = match desc.parameter(ROOT_PARAM) {
            Some(Value::String(root)) => root.clone(),
            Some(_) => {
                return Err(configuration_error(
                    desc,
                    "invalid s3 root parameter. parameter must be a string".to_string(),
                ))
            }
            None => {
                return Err(configuration_error(
                    desc,
                    "missing s3 root parameter. cannot create the store".to_string(),
                ))
            }
        };

        Ok(UnifiedStore::new(
            Backend::Remote(RemoteBackend::new(client)),
            root,
        ))
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::local()
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("remote_enabled", &self.clients.is_some())
            .finish()
    }
}

fn connect_filesystem(desc: &StoreDescription) -> StoreResult<UnifiedStore> {
    let root = match desc.parameter(ROOT_PARAM) {
        Some(Value::String(root)) => root.clone(),
        Some(_) => {
            return Err(configuration_error(
                desc,
                "invalid fs root parameter. parameter must be a string".to_string(),
            ))
        }
        None => DEFAULT_FS_ROOT.to_string(),
    };
    Ok(UnifiedStore::new(Backend::Local(LocalBackend), root))
}

fn configuration_error(desc: &StoreDescription, message: String) -> StoreError {
    warn!(store = %desc.name, store_type = %desc.store_type, "{message}");
    StoreError::Configuration(message)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::memory::{InMemoryClientFactory, InMemoryObjectClient};

    fn remote_desc() -> StoreDescription {
        StoreDescription::new("remote", StoreType::RemoteObjectStore).with_profile("CC")
    }

    fn memory_connector() -> (Connector, InMemoryObjectClient) {
        let factory = InMemoryClientFactory::default();
        let client = factory.client().clone();
        let connector = Connector::new(Arc::new(factory))
            .with_config_resolver(|p| RemoteConfig::from_profile(p, |_| None));
        (connector, client)
    }

    #[test]
    fn remote_with_root() {
        let (connector, client) = memory_connector();
        let store = connector
            .connect(&remote_desc().with_parameter(ROOT_PARAM, "bucket/prefix"))
            .unwrap();
        assert_eq!(store.root(), "bucket/prefix");
        assert_eq!(store.backend().store_type(), StoreType::RemoteObjectStore);

        store.put(&mut &b"x"[..], "k").unwrap();
        assert!(client.contains("bucket/prefix/k"));
    }

    #[test]
    fn remote_missing_root() {
        let (connector, _) = memory_connector();
        let err = connector.connect(&remote_desc()).unwrap_err();
        assert!(matches!(&err, StoreError::Configuration(m) if m.contains("missing")));
    }

    #[test]
    fn remote_root_not_a_string() {
        let (connector, _) = memory_connector();
        let err = connector
            .connect(&remote_desc().with_parameter(ROOT_PARAM, 42))
            .unwrap_err();
        assert!(matches!(&err, StoreError::Configuration(m) if m.contains("must be a string")));
    }

    #[test]
    fn remote_client_build_failure() {
        let connector = Connector::new(Arc::new(InMemoryClientFactory::failing("bad profile")))
            .with_config_resolver(|p| RemoteConfig::from_profile(p, |_| None));
        let err = connector
            .connect(&remote_desc().with_parameter(ROOT_PARAM, "bucket"))
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("bad profile"));
    }

    #[test]
    fn remote_without_factory() {
        let err = Connector::local()
            .connect(&remote_desc().with_parameter(ROOT_PARAM, "bucket"))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn resolver_receives_profile() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in = seen.clone();
        let connector = Connector::new(Arc::new(InMemoryClientFactory::default()))
            .with_config_resolver(move |p| {
                *seen_in.lock().unwrap() = Some(p.clone());
                RemoteConfig::default()
            });
        connector
            .connect(&remote_desc().with_parameter(ROOT_PARAM, "bucket"))
            .unwrap();
        assert_eq!(seen.lock().unwrap().as_ref().unwrap().as_str(), "CC");
    }

    #[test]
    fn filesystem_default_root() {
        let store = Connector::local()
            .connect(&StoreDescription::new("fs", StoreType::BlockFilesystem))
            .unwrap();
        assert_eq!(store.root(), DEFAULT_FS_ROOT);
        assert_eq!(store.absolute_path("x"), "/x");
        assert!(store.session_handle().is_none());
    }

    #[test]
    fn filesystem_root_not_a_string() {
        let desc = StoreDescription::new("fs", StoreType::BlockFilesystem)
            .with_parameter(ROOT_PARAM, true);
        let err = Connector::local().connect(&desc).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn unsupported_type() {
        let desc = StoreDescription::new("x", StoreType::from("GCS"));
        let err = Connector::local().connect(&desc).unwrap_err();
        assert!(matches!(&err, StoreError::UnsupportedStoreType(t) if t == "GCS"));
        assert!(err.is_configuration());
    }
}
