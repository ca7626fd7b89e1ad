//! File storage for profile pictures and course files.
//!
//! Uploads are checked against an [`UploadPolicy`] and written through a
//! [`FileStorage`] backend under a generated key such as
//! `profile_pictures/2b6c....png`. Only the key is persisted in the database.
//!
//! # Example
//!
//! ```ignore
//! use campus_core::file_storage::{FileStorage, LocalFileStorage, UploadPolicy};
//!
//! let storage = LocalFileStorage::new("./storage/uploads".into(), "/static".to_string());
//! let policy = UploadPolicy::course_file();
//!
//! policy.check(&content_type, bytes.len())?;
//! let key = storage.save(&policy.generate_key(&content_type), &bytes).await?;
//! let url = storage.get_url(&key)?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use axum::http::StatusCode;
use tokio::fs;
use uuid::Uuid;

use crate::errors::AppError;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Storage backend. Implementations can be swapped without touching services.
pub trait FileStorage: Send + Sync {
    /// Save `content` under `key` and return the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Delete the file stored under `key`. Missing files are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for `key`.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// MIME type not allowed.
    InvalidMimeType {
        received: String,
        allowed: Vec<String>,
    },

    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl StorageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidFileSize { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidMimeType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::new(self.status(), self)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::InvalidMimeType { received, allowed } => {
                write!(
                    f,
                    "MIME type '{}' not allowed. Allowed types: {}",
                    received,
                    allowed.join(", ")
                )
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Accepted content types and size limit for one kind of upload.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub prefix: &'static str,
    pub allowed_mime_types: &'static [&'static str],
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub const fn profile_picture() -> Self {
        Self {
            prefix: "profile_pictures",
            allowed_mime_types: &["image/png", "image/jpeg"],
            max_bytes: 5 * 1024 * 1024,
        }
    }

    pub const fn course_file() -> Self {
        Self {
            prefix: "files",
            allowed_mime_types: &["application/pdf"],
            max_bytes: 20 * 1024 * 1024,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn check(&self, mime_type: &str, size_bytes: usize) -> Result<(), StorageError> {
        if !self.allowed_mime_types.contains(&mime_type) {
            return Err(StorageError::InvalidMimeType {
                received: mime_type.to_string(),
                allowed: self
                    .allowed_mime_types
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
            });
        }

        if size_bytes > self.max_bytes {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_bytes,
            });
        }

        Ok(())
    }

    /// Fresh storage key for a file of `mime_type`.
    pub fn generate_key(&self, mime_type: &str) -> String {
        format!(
            "{}/{}.{}",
            self.prefix,
            Uuid::new_v4().simple(),
            extension_for(mime_type)
        )
    }
}

pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

/// Stores files in a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,

    /// Public URL prefix (e.g. "/static" or "http://localhost:8000/static")
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self { base_dir, base_url }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with a separator".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(&file_path, content).await?;
            tracing::debug!(storage.key = %key, size = content.len(), "Stored file");

            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_generated_keys() {
        let key = UploadPolicy::course_file().generate_key("application/pdf");
        assert!(key.starts_with("files/"));
        assert!(key.ends_with(".pdf"));
        assert!(LocalFileStorage::validate_key(&key).is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("..\\windows\\system32").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
    }

    #[test]
    fn test_profile_picture_policy() {
        let policy = UploadPolicy::profile_picture();
        assert!(policy.check("image/png", 1024).is_ok());
        assert!(policy.check("image/jpeg", 1024).is_ok());

        let err = policy.check("image/gif", 1024).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_course_file_policy_size_limit() {
        let policy = UploadPolicy::course_file().with_max_bytes(10);
        let err = policy.check("application/pdf", 11).unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(policy.check("text/plain", 1).is_err());
    }

    #[test]
    fn test_get_url_handles_trailing_slash() {
        let storage = LocalFileStorage::new(PathBuf::from("./uploads"), "/static/".to_string());
        let url = storage.get_url("files/abc.pdf").unwrap();
        assert_eq!(url, "/static/files/abc.pdf");
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let dir = std::env::temp_dir().join(format!("campus-storage-{}", Uuid::new_v4()));
        let storage = LocalFileStorage::new(dir.clone(), "/static".to_string());

        let key = storage.save("files/test.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(fs::read(dir.join(&key)).await.unwrap(), b"%PDF-1.4");

        storage.delete(&key).await.unwrap();
        storage.delete(&key).await.unwrap();
        assert!(!dir.join(&key).exists());

        let _ = fs::remove_dir_all(&dir).await;
    }
}
