//! Reading uploaded files out of `multipart/form-data` bodies.

use axum::body::Bytes;
use axum::extract::Multipart;

use campus_core::AppError;
use campus_core::file_storage::{FileStorage, LocalFileStorage, StorageError, UploadPolicy};

#[derive(Debug)]
pub struct UploadedFile {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Returns the first part named `field_name`. Other parts are skipped.
pub async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Failed to read upload: {}", e)))?;

        return Ok(UploadedFile {
            content_type,
            file_name,
            bytes,
        });
    }

    Err(AppError::bad_request(anyhow::anyhow!(
        "{} is required",
        field_name
    )))
}

/// Checks `file` against `policy` and stores it under a fresh key.
///
/// A disallowed content type is reported with `wrong_type_message`.
pub async fn store_upload(
    storage: &LocalFileStorage,
    policy: &UploadPolicy,
    file: &UploadedFile,
    wrong_type_message: &str,
) -> Result<String, AppError> {
    policy
        .check(&file.content_type, file.bytes.len())
        .map_err(|e| match e {
            StorageError::InvalidMimeType { .. } => {
                AppError::unsupported_media_type(anyhow::anyhow!("{}", wrong_type_message))
            }
            other => other.into_app_error(),
        })?;

    let key = policy.generate_key(&file.content_type);
    storage
        .save(&key, &file.bytes)
        .await
        .map_err(StorageError::into_app_error)
}
