use crate::{
    application::{SIGNED_URL_TTL, sign_file::dto::SignFileRequest, signed_url_expiry},
    domain::storage::{entity::SignResult, errors::StorageError},
    infrastructure::storage::traits::StorageClientFactory,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Issues a v4 signed read URL for an object in the configured bucket.
/// Whether the object exists is not checked.
pub struct SignFileUseCase {
    storage: Arc<dyn StorageClientFactory>,
    bucket: String,
}

impl SignFileUseCase {
    pub fn new(storage: Arc<dyn StorageClientFactory>, bucket: String) -> Self {
        Self { storage, bucket }
    }

    #[instrument(skip(self, request), fields(bucket = %self.bucket, file = %request.file_reference))]
    pub async fn execute(&self, request: SignFileRequest) -> Result<SignResult, StorageError> {
        info!(
            "Trying to get signed URL for file {} in bucket {}",
            request.file_reference, self.bucket
        );

        let store = self.storage.create().await.map_err(|e| {
            error!("Error signing file: {}", e);
            StorageError::SigningFailed(e.to_string())
        })?;

        let expires_at = signed_url_expiry();
        let url = store
            .signed_read_url(&self.bucket, &request.file_reference, SIGNED_URL_TTL)
            .await
            .map_err(|e| {
                error!("Error signing file: {}", e);
                StorageError::SigningFailed(e.to_string())
            })?;

        Ok(SignResult {
            success: true,
            url,
            expires_at,
        })
    }
}
