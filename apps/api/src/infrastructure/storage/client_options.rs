use serde_json::Value;
use std::path::PathBuf;

use crate::infrastructure::credentials::StorageConfig;

/// How a client authenticates, in order of preference.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    /// Parsed service-account JSON.
    Inline(Value),
    /// Path to a service-account key file, read when the client is built.
    KeyFile(PathBuf),
    /// Whatever the environment offers (metadata server, gcloud defaults).
    Ambient,
}

/// Client construction arguments. Absent fields are omitted rather than set
/// to empty values. The project falls back to the one named in the
/// credential JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub project_id: Option<String>,
    pub key_file_path: Option<PathBuf>,
    pub credentials: Option<Value>,
}

impl ClientOptions {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            project_id: config.effective_project_id().filter(|p| !p.is_empty()),
            key_file_path: config
                .key_file_path
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty())
                .cloned(),
            credentials: config
                .inline_credentials
                .as_ref()
                .filter(|c| !c.is_null())
                .cloned(),
        }
    }

    pub fn credential_source(&self) -> CredentialSource {
        match (&self.credentials, &self.key_file_path) {
            (Some(json), _) => CredentialSource::Inline(json.clone()),
            (None, Some(path)) => CredentialSource::KeyFile(path.clone()),
            (None, None) => CredentialSource::Ambient,
        }
    }
}
