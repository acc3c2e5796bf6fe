pub mod resolver;
pub mod validation;

pub use resolver::{CredentialResolver, DEFAULT_BUCKET_NAME, GcsSettings, StorageConfig};
