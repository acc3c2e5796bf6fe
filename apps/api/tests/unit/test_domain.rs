use upload_api::{
    application::{SIGNED_URL_TTL, bootstrap::BucketStatus},
    domain::storage::{
        entity::public_url,
        errors::StorageError,
        value_objects::{DEFAULT_CONTENT_TYPE, FilePayload, effective_content_type},
    },
    infrastructure::{
        credentials::{CredentialResolver, DEFAULT_BUCKET_NAME, GcsSettings},
        storage::client_options::{ClientOptions, CredentialSource},
    },
};

#[test]
fn hello_data_url_decodes_to_hello() {
    let payload = FilePayload::parse("data:text/plain;base64,SGVsbG8=").unwrap();
    assert_eq!(payload.decode().unwrap(), b"Hello");
    assert_eq!(payload.mime(), Some("text/plain"));
    // The embedded MIME type never becomes the stored content type
    assert_eq!(effective_content_type(None), DEFAULT_CONTENT_TYPE);
}

#[test]
fn data_prefix_without_base64_marker_is_rejected() {
    let err = FilePayload::parse("data:image/png;SGVsbG8=").unwrap_err();
    assert_eq!(err, StorageError::InvalidData("Invalid data format".into()));
}

#[test]
fn public_url_uses_file_name_verbatim() {
    assert_eq!(
        public_url("bucket", "dir/my file.txt"),
        "https://storage.googleapis.com/bucket/dir/my file.txt"
    );
}

#[test]
fn signed_urls_last_three_hours() {
    assert_eq!(SIGNED_URL_TTL.as_secs(), 10_800);
}

#[test]
fn resolver_uses_environment_when_settings_are_empty() {
    let config = CredentialResolver::new(|key: &str| match key {
        "GCS_PROJECT_ID" => Some("env-project".to_string()),
        "GCS_BUCKET_NAME" => Some("env-bucket".to_string()),
        _ => None,
    })
    .resolve(&GcsSettings::default());

    assert_eq!(config.project_id.as_deref(), Some("env-project"));
    assert_eq!(config.bucket_name, "env-bucket");
    assert_eq!(
        ClientOptions::from_config(&config).credential_source(),
        CredentialSource::Ambient
    );
}

#[test]
fn resolver_default_bucket_is_stable() {
    let config = CredentialResolver::new(|_: &str| None::<String>).resolve(&GcsSettings::default());
    assert_eq!(config.bucket_name, DEFAULT_BUCKET_NAME);
    assert_eq!(DEFAULT_BUCKET_NAME, "example-bucket123");
}

#[test]
fn only_existing_or_created_buckets_are_ready() {
    assert!(BucketStatus::AlreadyExists.is_ready());
    assert!(BucketStatus::Created.is_ready());
    assert!(!BucketStatus::CreateFailed("denied".into()).is_ready());
    assert!(!BucketStatus::CheckFailed("offline".into()).is_ready());
}
