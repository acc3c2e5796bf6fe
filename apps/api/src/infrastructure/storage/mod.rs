pub mod client_options;
pub mod gcs_storage_service;
pub mod traits;
