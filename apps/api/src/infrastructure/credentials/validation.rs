//! Startup diagnostics for the configured credentials.
//!
//! A configured key file is re-read independently of the resolver. Inline
//! credentials from the settings file are checked for the same fields, and
//! a setup with neither relies on ambient discovery, which only the bucket
//! check can confirm. The checks only report; they never stop the server on
//! their own.

use super::StorageConfig;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Fields a service-account key must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "type",
    "project_id",
    "private_key_id",
    "private_key",
    "client_email",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialFinding {
    NotConfigured,
    Inline,
    FileMissing,
    Permissions { mode: String, owner_readable: bool },
    Unreadable(String),
    InvalidJson(String),
    MissingFields(Vec<&'static str>),
    Valid {
        account_type: String,
        project_id: String,
        client_email: String,
    },
}

impl CredentialFinding {
    fn is_problem(&self) -> bool {
        match self {
            Self::Permissions { owner_readable, .. } => !owner_readable,
            Self::NotConfigured | Self::Inline | Self::Valid { .. } => false,
            _ => true,
        }
    }
}

impl fmt::Display for CredentialFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(
                f,
                "no key file or inline credentials configured, relying on ambient credentials"
            ),
            Self::Inline => write!(f, "using inline credentials from settings"),
            Self::FileMissing => write!(f, "credentials file not found"),
            Self::Permissions {
                mode,
                owner_readable,
            } => write!(
                f,
                "file permissions {} (readable by owner: {})",
                mode,
                if *owner_readable { "yes" } else { "no" }
            ),
            Self::Unreadable(e) => write!(f, "credentials file could not be read: {}", e),
            Self::InvalidJson(e) => write!(f, "credentials file is not valid JSON: {}", e),
            Self::MissingFields(fields) => write!(
                f,
                "credentials file is missing required fields: {}",
                fields.join(", ")
            ),
            Self::Valid {
                account_type,
                project_id,
                client_email,
            } => write!(
                f,
                "credentials valid (type: {}, project_id: {}, client_email: {})",
                account_type, project_id, client_email
            ),
        }
    }
}

/// Result of inspecting the configured credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialReport {
    pub key_file: Option<PathBuf>,
    pub findings: Vec<CredentialFinding>,
}

impl CredentialReport {
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(CredentialFinding::is_problem)
    }

    pub fn log(&self) {
        let path = self
            .key_file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string());
        for finding in &self.findings {
            if finding.is_problem() {
                error!(key_file = %path, "Credential check: {}", finding);
            } else if *finding == CredentialFinding::NotConfigured {
                warn!(key_file = %path, "Credential check: {}", finding);
            } else {
                info!(key_file = %path, "Credential check: {}", finding);
            }
        }
    }
}

/// Inspects whichever credentials `config` will hand to the client.
///
/// A configured key file is always validated, even when inline settings
/// credentials take precedence over it.
pub fn inspect(config: &StorageConfig) -> CredentialReport {
    if !config.has_credentials() {
        return validate_key_file(None);
    }
    match (&config.key_file_path, &config.inline_credentials) {
        (None, Some(credentials)) => CredentialReport {
            key_file: None,
            findings: vec![CredentialFinding::Inline, check_fields(credentials)],
        },
        (path, _) => validate_key_file(path.as_deref()),
    }
}

/// Inspects the key file at `path`.
pub fn validate_key_file(path: Option<&Path>) -> CredentialReport {
    let Some(path) = path else {
        return CredentialReport {
            key_file: None,
            findings: vec![CredentialFinding::NotConfigured],
        };
    };

    let mut findings = Vec::new();
    let report = |findings| CredentialReport {
        key_file: Some(path.to_path_buf()),
        findings,
    };

    if !path.exists() {
        findings.push(CredentialFinding::FileMissing);
        return report(findings);
    }

    match std::fs::metadata(path) {
        Ok(meta) => {
            if let Some(finding) = permission_finding(&meta) {
                if let CredentialFinding::Permissions {
                    owner_readable: false,
                    ..
                } = finding
                {
                    warn!("Try running: chmod 600 {}", path.display());
                }
                findings.push(finding);
            }
        }
        Err(e) => warn!("Could not stat credentials file: {}", e),
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            findings.push(CredentialFinding::Unreadable(e.to_string()));
            return report(findings);
        }
    };

    let credentials: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            findings.push(CredentialFinding::InvalidJson(e.to_string()));
            return report(findings);
        }
    };

    findings.push(check_fields(&credentials));
    report(findings)
}

fn check_fields(credentials: &Value) -> CredentialFinding {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !is_present(credentials.get(*field)))
        .collect();

    if !missing.is_empty() {
        return CredentialFinding::MissingFields(missing);
    }

    let text = |field: &str| {
        credentials
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    CredentialFinding::Valid {
        account_type: text("type"),
        project_id: text("project_id"),
        client_email: text("client_email"),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}

#[cfg(unix)]
fn permission_finding(meta: &std::fs::Metadata) -> Option<CredentialFinding> {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    Some(CredentialFinding::Permissions {
        mode: format!("{:03o}", mode & 0o777),
        owner_readable: mode & 0o400 != 0,
    })
}

#[cfg(not(unix))]
fn permission_finding(_meta: &std::fs::Metadata) -> Option<CredentialFinding> {
    None
}
