use thiserror::Error;

/// Failures surfaced to callers of the upload and signing operations.
///
/// Every backend failure is collapsed into one of these variants at the
/// service boundary; only the human-readable message travels with it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0}")]
    InvalidData(String),
    #[error("Bucket {0} does not exist")]
    BucketNotFound(String),
    #[error("{0}")]
    UploadFailed(String),
    #[error("{0}")]
    SigningFailed(String),
}

impl StorageError {
    /// Stable error code reported alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidData(_) => "invalid-data",
            Self::BucketNotFound(_) => "bucket-not-found",
            Self::UploadFailed(_) => "upload-error",
            Self::SigningFailed(_) => "google-storage-error",
        }
    }
}
