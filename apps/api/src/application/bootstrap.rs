//! One-shot startup step: make sure the bucket exists and inspect the
//! credentials. Nothing in here fails; the returned [`StartupReport`] lets
//! the caller decide whether an unhealthy start is acceptable.

use crate::infrastructure::{
    credentials::{
        StorageConfig,
        validation::{self, CredentialReport},
    },
    storage::traits::{BucketSpec, StorageClientFactory},
};
use tracing::{error, info, instrument};

pub const BUCKET_LOCATION: &str = "us-central1";
pub const BUCKET_STORAGE_CLASS: &str = "STANDARD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketStatus {
    AlreadyExists,
    Created,
    CreateFailed(String),
    CheckFailed(String),
}

impl BucketStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::AlreadyExists | Self::Created)
    }
}

#[derive(Debug, Clone)]
pub struct StartupReport {
    pub bucket_name: String,
    pub bucket: BucketStatus,
    pub credentials: CredentialReport,
}

impl StartupReport {
    /// Bucket usable and the configured credentials clean.
    pub fn is_healthy(&self) -> bool {
        self.bucket.is_ready() && self.credentials.is_valid()
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        match &self.bucket {
            BucketStatus::CreateFailed(e) => {
                problems.push(format!("bucket {} could not be created: {}", self.bucket_name, e))
            }
            BucketStatus::CheckFailed(e) => {
                problems.push(format!("bucket {} could not be checked: {}", self.bucket_name, e))
            }
            _ => {}
        }
        if !self.credentials.is_valid() {
            problems.push("credentials failed validation".to_string());
        }
        problems
    }
}

#[instrument(skip_all, fields(bucket = %config.bucket_name))]
pub async fn initialize(factory: &dyn StorageClientFactory, config: &StorageConfig) -> StartupReport {
    let credentials = validation::inspect(config);
    credentials.log();

    let bucket = ensure_bucket(factory, &config.bucket_name).await;

    StartupReport {
        bucket_name: config.bucket_name.clone(),
        bucket,
        credentials,
    }
}

async fn ensure_bucket(factory: &dyn StorageClientFactory, bucket: &str) -> BucketStatus {
    info!("Checking if bucket {} exists...", bucket);

    let store = match factory.create().await {
        Ok(store) => store,
        Err(e) => {
            error!("Error checking/creating bucket: {}", e);
            return BucketStatus::CheckFailed(e.to_string());
        }
    };

    match store.bucket_exists(bucket).await {
        Ok(true) => {
            info!("Bucket {} already exists.", bucket);
            BucketStatus::AlreadyExists
        }
        Ok(false) => {
            info!("Bucket {} does not exist. Trying to create...", bucket);
            let spec = BucketSpec {
                location: BUCKET_LOCATION.to_string(),
                storage_class: BUCKET_STORAGE_CLASS.to_string(),
            };
            match store.create_bucket(bucket, &spec).await {
                Ok(()) => {
                    info!("Bucket {} created successfully!", bucket);
                    BucketStatus::Created
                }
                Err(e) => {
                    error!("Error creating bucket {}: {}", bucket, e);
                    BucketStatus::CreateFailed(e.to_string())
                }
            }
        }
        Err(e) => {
            error!("Error checking/creating bucket: {}", e);
            BucketStatus::CheckFailed(e.to_string())
        }
    }
}
