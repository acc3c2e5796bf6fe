//! Application configuration loading from environment variables.
//!
//! Server options come straight from the environment. Storage options are
//! resolved from an optional JSON settings file first and the environment
//! second (see [`CredentialResolver`]).
//!
//! # Environment Variables
//!
//! ## Server
//! - `RUST_LOG`: Logging level (default: "info,upload_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `MAX_BODY_BYTES`: Largest accepted request body (default: 20 MiB)
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: any origin)
//! - `STRICT_STARTUP`: Refuse to start when the bucket or credentials are unusable (default: false)
//! - `SETTINGS_FILE`: JSON settings file with a `googleCloudStorage` section
//!
//! ## Storage (used when the settings file leaves them unset)
//! - `GCS_PROJECT_ID`: Google Cloud project id
//! - `GCS_KEY_FILENAME`: Path to a service-account key file
//! - `GCS_BUCKET_NAME`: Bucket receiving uploads (default: "example-bucket123")

use crate::infrastructure::credentials::{CredentialResolver, GcsSettings, StorageConfig};
use anyhow::Context;
use serde::Deserialize;

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum request body size in bytes. Base64 payloads are about a third
    /// larger than the file they carry.
    pub max_body_bytes: usize,

    /// Origins allowed by CORS; empty allows any origin
    pub cors_allowed_origins: Vec<String>,

    /// Await startup checks and abort when they report problems
    pub strict_startup: bool,

    /// Resolved storage credentials and bucket
    pub storage: StorageConfig,
}

/// Shape of the JSON settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub google_cloud_storage: GcsSettings,
}

impl Settings {
    /// Reads a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid settings file {}", path))
    }
}

impl Config {
    /// Load configuration from environment variables and the optional
    /// settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if
    /// `SETTINGS_FILE` names a file that cannot be loaded.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = match std::env::var("SETTINGS_FILE") {
            Ok(path) if !path.trim().is_empty() => Settings::load(&path)?,
            _ => Settings::default(),
        };

        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            max_body_bytes: env_or("MAX_BODY_BYTES", 20 * 1024 * 1024)?,
            cors_allowed_origins: parse_list(&env_or("CORS_ALLOWED_ORIGINS", String::new())?),
            strict_startup: env_or("STRICT_STARTUP", false)?,
            storage: CredentialResolver::from_process_env()
                .resolve(&settings.google_cloud_storage),
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
