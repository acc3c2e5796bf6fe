//! Resolution of storage credentials and bucket name.
//!
//! Explicit settings win over environment variables, and empty strings count
//! as unset. Nothing here mutates process state: the resolved key-file path
//! and any credential JSON travel inside [`StorageConfig`] to the client
//! factory.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Bucket used when neither settings nor environment name one.
pub const DEFAULT_BUCKET_NAME: &str = "example-bucket123";

pub const ENV_PROJECT_ID: &str = "GCS_PROJECT_ID";
pub const ENV_KEY_FILENAME: &str = "GCS_KEY_FILENAME";
pub const ENV_BUCKET_NAME: &str = "GCS_BUCKET_NAME";

/// The `googleCloudStorage` section of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsSettings {
    pub project_id: Option<String>,
    pub key_filename: Option<String>,
    pub bucket_name: Option<String>,
    /// Service-account JSON embedded directly in the settings.
    pub credentials: Option<Value>,
}

/// Everything needed to build a storage client.
///
/// Having neither a key file nor inline credentials is allowed; the client
/// then relies on ambient discovery and calls fail if none is available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    pub project_id: Option<String>,
    pub key_file_path: Option<PathBuf>,
    pub inline_credentials: Option<Value>,
    pub bucket_name: String,
}

impl StorageConfig {
    pub fn has_credentials(&self) -> bool {
        self.key_file_path.is_some() || self.inline_credentials.is_some()
    }

    /// `project_id` from the configuration, falling back to the one embedded
    /// in the credential JSON.
    pub fn effective_project_id(&self) -> Option<String> {
        self.project_id.clone().or_else(|| {
            self.inline_credentials
                .as_ref()
                .and_then(|c| c.get("project_id"))
                .and_then(Value::as_str)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
        })
    }
}

/// Produces a [`StorageConfig`] from settings plus an environment lookup.
pub struct CredentialResolver<F> {
    env: F,
}

impl CredentialResolver<fn(&str) -> Option<String>> {
    /// Resolver backed by the real process environment.
    pub fn from_process_env() -> Self {
        fn lookup(key: &str) -> Option<String> {
            std::env::var(key).ok()
        }
        Self { env: lookup }
    }
}

impl<F> CredentialResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(env: F) -> Self {
        Self { env }
    }

    /// Resolves the storage configuration.
    ///
    /// Never fails: an unreadable or malformed key file is logged and the
    /// configuration is returned with whatever could be salvaged.
    pub fn resolve(&self, settings: &GcsSettings) -> StorageConfig {
        let project_id = self.pick(settings.project_id.as_deref(), ENV_PROJECT_ID);
        let key_file_path = self
            .pick(settings.key_filename.as_deref(), ENV_KEY_FILENAME)
            .map(PathBuf::from);
        let bucket_name = self
            .pick(settings.bucket_name.as_deref(), ENV_BUCKET_NAME)
            .unwrap_or_else(|| DEFAULT_BUCKET_NAME.to_string());

        let inline_credentials = match settings.credentials.as_ref() {
            Some(Value::Object(map)) if !map.is_empty() => {
                info!("Using inline credentials from settings");
                settings.credentials.clone()
            }
            Some(_) => {
                warn!("Ignoring inline credentials in settings: not a JSON object");
                None
            }
            None => None,
        }
        .or_else(|| key_file_path.as_deref().and_then(load_key_file));

        if key_file_path.is_none() && inline_credentials.is_none() {
            warn!("No storage credentials configured; relying on ambient discovery");
        }

        StorageConfig {
            project_id,
            key_file_path,
            inline_credentials,
            bucket_name,
        }
    }

    fn pick(&self, explicit: Option<&str>, env_key: &str) -> Option<String> {
        non_empty(explicit.map(str::to_string)).or_else(|| non_empty((self.env)(env_key)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads and parses a key file when it exists. Failures are logged only.
fn load_key_file(path: &Path) -> Option<Value> {
    if !path.exists() {
        warn!("Credentials file {} not found", path.display());
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Error loading credentials from file: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(value @ Value::Object(_)) => {
            info!("Credentials loaded directly from {}", path.display());
            Some(value)
        }
        Ok(_) => {
            error!("Error loading credentials from file: not a JSON object");
            None
        }
        Err(e) => {
            error!("Error loading credentials from file: {}", e);
            None
        }
    }
}
