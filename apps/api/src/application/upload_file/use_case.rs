use crate::{
    application::{SIGNED_URL_TTL, signed_url_expiry, upload_file::dto::UploadFileRequest},
    domain::storage::{
        entity::{UploadResult, public_url},
        errors::StorageError,
        value_objects::effective_content_type,
    },
    infrastructure::storage::traits::StorageClientFactory,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Stores a decoded file in the bucket and hands back links to it.
///
/// Steps, each failing fast:
/// 1. Build a fresh storage client
/// 2. Confirm the bucket exists (no write otherwise)
/// 3. Decode the payload and write it under the caller's file name
/// 4. Request a signed read URL valid for [`SIGNED_URL_TTL`]
///
/// The data-URL MIME type is not applied to the stored object; only the
/// caller's `content_type` is.
pub struct UploadFileUseCase {
    storage: Arc<dyn StorageClientFactory>,
    bucket: String,
}

impl UploadFileUseCase {
    pub fn new(storage: Arc<dyn StorageClientFactory>, bucket: String) -> Self {
        Self { storage, bucket }
    }

    #[instrument(skip(self, request), fields(
        bucket = %self.bucket,
        file_name = %request.file_name,
        payload_len = request.payload.base64().len()
    ))]
    pub async fn execute(&self, request: UploadFileRequest) -> Result<UploadResult, StorageError> {
        info!("Starting upload of file {} to bucket {}", request.file_name, self.bucket);

        let store = self.storage.create().await.map_err(|e| {
            error!("Error creating storage client: {}", e);
            StorageError::UploadFailed(e.to_string())
        })?;

        let exists = store.bucket_exists(&self.bucket).await.map_err(|e| {
            error!("Error checking bucket {}: {}", self.bucket, e);
            StorageError::UploadFailed(e.to_string())
        })?;
        if !exists {
            error!("Bucket {} does not exist", self.bucket);
            return Err(StorageError::BucketNotFound(self.bucket.clone()));
        }

        let data = request.payload.decode()?;
        let content_type = effective_content_type(request.content_type.as_deref());
        if let Some(mime) = request.payload.mime() {
            debug!(embedded_mime = mime, content_type, "Ignoring data URL MIME type");
        }

        store
            .put_object(&self.bucket, &request.file_name, data, content_type)
            .await
            .map_err(|e| {
                error!("Error uploading file: {}", e);
                StorageError::UploadFailed(e.to_string())
            })?;

        info!(
            "File {} uploaded successfully to bucket {}",
            request.file_name, self.bucket
        );

        let expires_at = signed_url_expiry();
        let signed_url = store
            .signed_read_url(&self.bucket, &request.file_name, SIGNED_URL_TTL)
            .await
            .map_err(|e| {
                error!("Error signing uploaded file: {}", e);
                StorageError::UploadFailed(e.to_string())
            })?;

        Ok(UploadResult {
            success: true,
            public_url: public_url(&self.bucket, &request.file_name),
            file_name: request.file_name,
            signed_url,
            expires_at,
        })
    }
}
