use serde::Deserialize;
use utoipa::IntoParams;

pub use campus_models::files::*;
use campus_models::ids::FileId;

/// Query parameters sent alongside a file upload.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UploadFileParams {
    /// Kind of document, such as `material`, `assignment` or `submission`
    pub file_type: String,
    /// The assignment this file is a submission for
    pub submission_id: Option<FileId>,
}
