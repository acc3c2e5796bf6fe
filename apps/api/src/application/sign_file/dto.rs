#[derive(Debug, Clone)]
pub struct SignFileRequest {
    pub file_reference: String,
}
