use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Placement requested when a bucket is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub location: String,
    pub storage_class: String,
}

/// Operations the service needs from an object-storage backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> anyhow::Result<bool>;
    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> anyhow::Result<()>;
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()>;
    /// Returns a signed URL granting read access to `key` for `expires_in`.
    async fn signed_read_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String>;
}

/// Builds a fresh storage client. Called once per request; implementations
/// must not cache clients between calls.
#[async_trait]
pub trait StorageClientFactory: Send + Sync {
    async fn create(&self) -> anyhow::Result<Arc<dyn ObjectStore>>;
}
