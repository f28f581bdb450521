use std::any::Any;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::{Arc, RwLock};

use bytes::Bytes;

use crate::error::BackendError;
use crate::remote::{ClientFactory, ObjectClient, RemoteConfig};

/// In-memory, HashMap-based object client.
///
/// Intended for tests and embedding. Clones share the same contents, so a
/// test can keep one clone to inspect what a store wrote through another.
#[derive(Clone, Default)]
pub struct InMemoryObjectClient {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryObjectClient {
    /// Create a new empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(key)
    }

    /// Return a sorted list of all stored keys.
    pub fn keys(&self) -> Vec<String> {
        let map = self.objects.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw contents stored under `key`, if any.
    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.read().expect("lock poisoned").get(key).cloned()
    }
}

impl ObjectClient for InMemoryObjectClient {
    fn get_object(&self, key: &str) -> Result<Box<dyn Read + Send>, BackendError> {
        let data = self
            .object(key)
            .ok_or_else(|| format!("no such key: {key}"))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn put_object(&self, key: &str, reader: &mut dyn Read) -> Result<u64, BackendError> {
        let mut buf = Vec::new();
        let n = reader.read_to_end(&mut buf)?;
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), Bytes::from(buf));
        Ok(n as u64)
    }

    fn delete_object(&self, key: &str) -> Result<(), BackendError> {
        self.objects.write().expect("lock poisoned").remove(key);
        Ok(())
    }

    fn native_client(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::new(self.clone())
    }
}

impl std::fmt::Debug for InMemoryObjectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectClient")
            .field("object_count", &self.len())
            .finish()
    }
}

/// Factory handing out clones of one shared [`InMemoryObjectClient`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryClientFactory {
    client: InMemoryObjectClient,
    failure: Option<String>,
}

impl InMemoryClientFactory {
    pub fn new(client: InMemoryObjectClient) -> Self {
        Self {
            client,
            failure: None,
        }
    }

    /// A factory whose every `build` fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            client: InMemoryObjectClient::new(),
            failure: Some(message.into()),
        }
    }

    /// The client shared by every store this factory builds.
    pub fn client(&self) -> &InMemoryObjectClient {
        &self.client
    }
}

impl ClientFactory for InMemoryClientFactory {
    fn build(&self, _config: &RemoteConfig) -> Result<Box<dyn ObjectClient>, BackendError> {
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(Box::new(self.client.clone())),
        }
    }
}
