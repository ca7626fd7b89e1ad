use std::env;
use std::path::PathBuf;

use crate::non_empty_var;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory uploads are written to.
    pub base_dir: PathBuf,
    /// URL prefix the upload directory is served under.
    pub base_url: String,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./storage/uploads"),
            base_url: "/static".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_dir: non_empty_var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
            base_url: non_empty_var("STORAGE_BASE_URL").unwrap_or(defaults.base_url),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }
}
