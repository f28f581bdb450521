use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form backend parameters, keyed by name.
pub type Parameters = BTreeMap<String, Value>;

/// The kind of storage medium a description asks for.
///
/// Unknown tags are kept as [`StoreType::Unrecognized`] rather than rejected
/// during parsing, so the connection factory can report them with the
/// offending tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoreType {
    /// A remote object store (S3-compatible), tag `S3`.
    RemoteObjectStore,
    /// A local or mounted block filesystem, tag `FS`.
    BlockFilesystem,
    /// Any other tag.
    Unrecognized(String),
}

impl StoreType {
    pub const REMOTE_OBJECT_STORE_TAG: &'static str = "S3";
    pub const BLOCK_FILESYSTEM_TAG: &'static str = "FS";

    /// The tag this store type is written as.
    pub fn tag(&self) -> &str {
        match self {
            Self::RemoteObjectStore => Self::REMOTE_OBJECT_STORE_TAG,
            Self::BlockFilesystem => Self::BLOCK_FILESYSTEM_TAG,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Returns `true` for either of the recognized tags.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for StoreType {
    fn from(tag: &str) -> Self {
        match tag {
            Self::REMOTE_OBJECT_STORE_TAG => Self::RemoteObjectStore,
            Self::BLOCK_FILESYSTEM_TAG => Self::BlockFilesystem,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for StoreType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<StoreType> for String {
    fn from(store_type: StoreType) -> Self {
        store_type.tag().to_string()
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Name of the credential profile a backend authenticates with.
///
/// The facade never interprets it beyond handing it to the backend
/// configuration builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRef(String);

impl ProfileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative description of a data store to connect to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreDescription {
    /// Human-readable store name, used in logs.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileRef>,
    #[serde(default)]
    pub parameters: Parameters,
}

impl StoreDescription {
    /// Create a description with no profile and no parameters.
    pub fn new(name: impl Into<String>, store_type: StoreType) -> Self {
        Self {
            name: name.into(),
            store_type,
            profile: None,
            parameters: Parameters::new(),
        }
    }

    /// Set the credential profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(ProfileRef::new(profile));
        self
    }

    /// Add or replace a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter by key.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}
