use super::client_options::{ClientOptions, CredentialSource};
use super::traits::{BucketSpec, ObjectStore, StorageClientFactory};
use crate::infrastructure::credentials::StorageConfig;
use async_trait::async_trait;
use google_cloud_storage::{
    client::{Client, ClientConfig, google_cloud_auth::credentials::CredentialsFile},
    http::{
        Error as GcsError,
        buckets::{
            get::GetBucketRequest,
            insert::{BucketCreationConfig, InsertBucketParam, InsertBucketRequest},
        },
        objects::upload::{Media, UploadObjectRequest, UploadType},
    },
    sign::{SignedURLMethod, SignedURLOptions},
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// [`ObjectStore`] backed by Google Cloud Storage.
pub struct GcsStorageService {
    client: Client,
    project_id: Option<String>,
}

impl GcsStorageService {
    pub async fn new(options: ClientOptions) -> anyhow::Result<Self> {
        let config = match options.credential_source() {
            CredentialSource::Inline(json) => {
                let credentials = CredentialsFile::new_from_str(&json.to_string()).await?;
                ClientConfig::default().with_credentials(credentials).await?
            }
            CredentialSource::KeyFile(path) => {
                let credentials =
                    CredentialsFile::new_from_file(path.to_string_lossy().into_owned()).await?;
                ClientConfig::default().with_credentials(credentials).await?
            }
            CredentialSource::Ambient => or_anonymous(ClientConfig::default().with_auth()).await,
        };

        Ok(Self::from_config(with_project(config, options.project_id)))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let project_id = config.project_id.clone();
        Self {
            client: Client::new(config),
            project_id,
        }
    }
}

/// Falls back to an unauthenticated client when ambient discovery fails.
/// Calls made with it are rejected by the backend, not at construction.
async fn or_anonymous<E: fmt::Display>(
    auth: impl Future<Output = Result<ClientConfig, E>>,
) -> ClientConfig {
    match auth.await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("No ambient credentials ({}); using anonymous client", e);
            ClientConfig::default().anonymous()
        }
    }
}

/// A configured project replaces the one taken from the credentials.
fn with_project(mut config: ClientConfig, project_id: Option<String>) -> ClientConfig {
    if project_id.is_some() {
        config.project_id = project_id;
    }
    config
}

#[async_trait]
impl ObjectStore for GcsStorageService {
    async fn bucket_exists(&self, bucket: &str) -> anyhow::Result<bool> {
        let request = GetBucketRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };
        match self.client.get_bucket(&request).await {
            Ok(_) => Ok(true),
            Err(GcsError::Response(resp)) if resp.code == 404 => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> anyhow::Result<()> {
        let project = self
            .project_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No project id available to create bucket {}", bucket))?;
        let request = InsertBucketRequest {
            name: bucket.to_string(),
            param: InsertBucketParam {
                project,
                ..Default::default()
            },
            bucket: BucketCreationConfig {
                location: spec.location.clone(),
                storage_class: Some(spec.storage_class.clone()),
                ..Default::default()
            },
        };
        self.client.insert_bucket(&request).await?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        let mut media = Media::new(key.to_string());
        media.content_type = content_type.to_string().into();
        media.content_length = Some(data.len() as u64);

        let request = UploadObjectRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };
        self.client
            .upload_object(&request, data, &UploadType::Simple(media))
            .await?;
        Ok(())
    }

    async fn signed_read_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String> {
        let options = SignedURLOptions {
            method: SignedURLMethod::GET,
            expires: expires_in,
            ..Default::default()
        };
        let url = self
            .client
            .signed_url(bucket, key, None, None, options)
            .await?;
        Ok(url)
    }
}

/// Builds a new [`GcsStorageService`] for every call.
pub struct GcsClientFactory {
    config: StorageConfig,
}

impl GcsClientFactory {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StorageClientFactory for GcsClientFactory {
    async fn create(&self) -> anyhow::Result<Arc<dyn ObjectStore>> {
        let options = ClientOptions::from_config(&self.config);
        Ok(Arc::new(GcsStorageService::new(options).await?))
    }
}
