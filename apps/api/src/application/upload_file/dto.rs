use crate::domain::storage::value_objects::FilePayload;

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub payload: FilePayload,
    /// Used verbatim as the object key; an existing object is overwritten.
    pub file_name: String,
    pub content_type: Option<String>,
}
