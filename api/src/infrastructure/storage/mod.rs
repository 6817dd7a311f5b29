use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::upload_storage_port::{StoredUpload, UploadError, UploadStoragePort};

const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "pdf"];
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

pub fn sanitize_filename(name: &str) -> String {
    let mut s = name.trim().to_string();
    let invalid = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid {
        s = s.replace(ch, "-");
    }
    s = s.replace(' ', "_");
    if s.len() > 100 {
        let mut cut = 100;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    if s.is_empty() || s.chars().all(|c| c == '.') {
        s = "upload".into();
    }
    s
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Both the extension and the declared MIME type must be on the allow-list.
/// A missing content type is guessed from the extension.
pub fn is_accepted_type(filename: &str, content_type: Option<&str>) -> bool {
    let Some(ext) = extension_of(filename) else {
        return false;
    };
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return false;
    }
    let mime = match content_type {
        Some(ct) => ct
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
        None => mime_guess::from_ext(&ext)
            .first_raw()
            .unwrap_or_default()
            .to_string(),
    };
    ALLOWED_MIME_TYPES.contains(&mime.as_str())
}

/// Writes uploads flat into one directory served under `/uploads`.
pub struct FsUploadStorage {
    root: PathBuf,
    max_file_bytes: usize,
}

impl FsUploadStorage {
    pub fn new(root: PathBuf, max_file_bytes: usize) -> Self {
        Self {
            root,
            max_file_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl UploadStoragePort for FsUploadStorage {
    async fn store(
        &self,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        use tokio::fs;
        use tokio::io::AsyncWriteExt;

        if bytes.len() > self.max_file_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_file_bytes,
            });
        }
        let original = original_filename.unwrap_or_default();
        if !is_accepted_type(original, content_type) {
            return Err(UploadError::UnsupportedType);
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| UploadError::Storage(e.into()))?;

        let safe = sanitize_filename(original);
        let millis = chrono::Utc::now().timestamp_millis();
        let mut filename = format!("{}-{}", millis, safe);
        let mut counter = 1;
        let mut file = loop {
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&filename))
                .await;
            match opened {
                Ok(file) => break file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    filename = format!("{}-{}-{}", millis, counter, safe);
                    counter += 1;
                }
                Err(e) => return Err(UploadError::Storage(e.into())),
            }
        };
        file.write_all(bytes)
            .await
            .map_err(|e| UploadError::Storage(e.into()))?;
        file.flush()
            .await
            .map_err(|e| UploadError::Storage(e.into()))?;
        tracing::debug!(file = %filename, size = bytes.len(), "upload_stored");
        Ok(StoredUpload {
            reference: format!("/uploads/{}", filename),
            filename,
            size: bytes.len() as i64,
        })
    }
}
