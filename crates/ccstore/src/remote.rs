//! The seam between the facade and a remote object-store client.
//!
//! The facade does not speak any object-store protocol itself. A
//! collaborator supplies a [`ClientFactory`] that turns a [`RemoteConfig`]
//! into an [`ObjectClient`]; the facade then only issues keyed fetch, store,
//! and delete calls against it.

use std::any::Any;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

use ccstore_types::ProfileRef;

use crate::error::BackendError;

/// Operations a remote object-store client must provide.
///
/// Keys arrive fully composed (`root/path`). Implementations own
/// authentication, retries, and wire details.
pub trait ObjectClient: Send + Sync {
    /// Open the object stored under `key` for reading.
    fn get_object(&self, key: &str) -> Result<Box<dyn Read + Send>, BackendError>;

    /// Store everything `reader` yields under `key`. Returns the number of
    /// bytes transferred.
    fn put_object(&self, key: &str, reader: &mut dyn Read) -> Result<u64, BackendError>;

    /// Remove the object stored under `key`.
    fn delete_object(&self, key: &str) -> Result<(), BackendError>;

    /// The client's native handle, for collaborators that need direct access.
    fn native_client(&self) -> Arc<dyn Any + Send + Sync>;
}

/// Builds remote clients from backend configuration.
pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &RemoteConfig) -> Result<Box<dyn ObjectClient>, BackendError>;
}

const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
const DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
const S3_BUCKET: &str = "AWS_S3_BUCKET";
const S3_ENDPOINT: &str = "S3_ENDPOINT";
const S3_MOCK: &str = "S3_MOCK";
const S3_DISABLE_SSL: &str = "S3_DISABLE_SSL";
const S3_FORCE_PATH_STYLE: &str = "S3_FORCE_PATH_STYLE";

/// Remote backend configuration derived from a credential profile.
///
/// Every setting is read from a variable named `<PROFILE>_<SETTING>`, e.g.
/// `CC_AWS_DEFAULT_REGION` for profile `CC`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub profile: ProfileRef,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    /// Talk to a local mock (minio, localstack) instead of the real service.
    pub mock: bool,
    pub disable_ssl: bool,
    pub force_path_style: bool,
}

impl RemoteConfig {
    /// Build the configuration for `profile`, resolving variables through
    /// `lookup`.
    pub fn from_profile<F>(profile: &ProfileRef, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |setting: &str| {
            let name = if profile.as_str().is_empty() {
                setting.to_string()
            } else {
                format!("{}_{}", profile.as_str(), setting)
            };
            lookup(&name).filter(|v| !v.is_empty())
        };
        let flag = |setting: &str| {
            var(setting)
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false)
        };

        Self {
            profile: profile.clone(),
            access_key_id: var(ACCESS_KEY_ID),
            secret_access_key: var(SECRET_ACCESS_KEY),
            region: var(DEFAULT_REGION),
            bucket: var(S3_BUCKET),
            endpoint: var(S3_ENDPOINT),
            mock: flag(S3_MOCK),
            disable_ssl: flag(S3_DISABLE_SSL),
            force_path_style: flag(S3_FORCE_PATH_STYLE),
        }
    }

    /// Build the configuration for `profile` from the process environment.
    pub fn from_env(profile: &ProfileRef) -> Self {
        Self::from_profile(profile, |name| std::env::var(name).ok())
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("profile", &self.profile)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("mock", &self.mock)
            .field("disable_ssl", &self.disable_ssl)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_profile_prefixed_variables() {
        let lookup = lookup_from(&[
            ("CC_AWS_ACCESS_KEY_ID", "AKIA"),
            ("CC_AWS_SECRET_ACCESS_KEY", "shh"),
            ("CC_AWS_DEFAULT_REGION", "us-east-1"),
            ("CC_AWS_S3_BUCKET", "bucket"),
            ("CC_S3_ENDPOINT", "http://localhost:9000"),
            ("CC_S3_MOCK", "TRUE"),
            ("CC_S3_DISABLE_SSL", "1"),
            ("OTHER_AWS_DEFAULT_REGION", "eu-west-1"),
        ]);
        let config = RemoteConfig::from_profile(&ProfileRef::new("CC"), lookup);
        assert_eq!(config.access_key_id.as_deref(), Some("AKIA"));
        assert_eq!(config.secret_access_key.as_deref(), Some("shh"));
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.bucket.as_deref(), Some("bucket"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.mock);
        assert!(config.disable_ssl);
        assert!(!config.force_path_style);
    }

    #[test]
    fn missing_variables_stay_unset() {
        let config = RemoteConfig::from_profile(&ProfileRef::new("CC"), lookup_from(&[]));
        assert_eq!(
            config,
            RemoteConfig {
                profile: ProfileRef::new("CC"),
                ..RemoteConfig::default()
            }
        );
    }

    #[test]
    fn empty_values_are_unset() {
        let config = RemoteConfig::from_profile(
            &ProfileRef::new("CC"),
            lookup_from(&[("CC_AWS_DEFAULT_REGION", "")]),
        );
        assert!(config.region.is_none());
    }

    #[test]
    fn empty_profile_reads_bare_names() {
        let config = RemoteConfig::from_profile(
            &ProfileRef::default(),
            lookup_from(&[("AWS_DEFAULT_REGION", "us-west-2")]),
        );
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = RemoteConfig::from_profile(
            &ProfileRef::new("CC"),
            lookup_from(&[("CC_AWS_SECRET_ACCESS_KEY", "hunter2")]),
        );
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
