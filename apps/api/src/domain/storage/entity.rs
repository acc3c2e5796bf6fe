use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a successful upload, returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub file_name: String,
    /// Conventional public address of the object. Only reachable when the
    /// bucket itself has been made public.
    pub public_url: String,
    pub signed_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResult {
    pub success: bool,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Host serving path-style object URLs.
pub const PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

/// Builds the path-style public URL for an object. The key is used
/// verbatim, without escaping.
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", PUBLIC_URL_BASE, bucket, key)
}
