use crate::{config::Config, infrastructure::storage::traits::StorageClientFactory};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageClientFactory>,
    pub config: Config,
}

impl AppState {
    pub fn bucket_name(&self) -> &str {
        &self.config.storage.bucket_name
    }
}
