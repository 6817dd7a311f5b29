use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    /// Reference persisted on records, e.g. `/uploads/1718000000000-aadhar.pdf`.
    pub reference: String,
    pub size: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("Images (jpeg, jpg, png) and PDFs only")]
    UnsupportedType,
    #[error("failed to store upload")]
    Storage(#[source] anyhow::Error),
}

#[async_trait]
pub trait UploadStoragePort: Send + Sync {
    async fn store(
        &self,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError>;
}
