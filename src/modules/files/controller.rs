use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::{instrument, warn};
use validator::Validate;

use campus_core::AppError;
use campus_core::file_storage::{FileStorage, UploadPolicy};
use campus_core::permissions::COURSE;
use campus_models::ids::{CourseId, FileId};

use crate::middleware::auth::AuthUser;
use crate::modules::courses::service::CourseService;
use crate::modules::files::model::{CourseFile, NewCourseFile, UpdateFileDto, UploadFileParams};
use crate::modules::files::service::FileService;
use crate::state::AppState;
use crate::utils::upload::{read_file_field, store_upload};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/files",
    responses(
        (status = 200, description = "Files uploaded by the caller", body = Vec<CourseFile>)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn list_my_files(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CourseFile>>, AppError> {
    let files = FileService::list_by_owner(&state.db, auth_user.user_id()).await?;
    Ok(Json(files))
}

#[utoipa::path(
    get,
    path = "/api/v1/files/course/{id}",
    params(("id" = CourseId, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Files of the course", body = Vec<CourseFile>)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_course_files(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<CourseId>,
) -> Result<Json<Vec<CourseFile>>, AppError> {
    let files = FileService::list_by_course(&state.db, id).await?;
    Ok(Json(files))
}

#[utoipa::path(
    get,
    path = "/api/v1/files/{id}",
    params(("id" = FileId, Path, description = "File ID")),
    responses(
        (status = 200, description = "File", body = CourseFile),
        (status = 404, description = "File not found")
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_file(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<FileId>,
) -> Result<Json<CourseFile>, AppError> {
    let file = FileService::get_file(&state.db, id).await?;
    Ok(Json(file))
}

#[utoipa::path(
    get,
    path = "/api/v1/files/submission/{id}",
    params(("id" = FileId, Path, description = "Assignment file ID")),
    responses(
        (status = 200, description = "Submissions for the assignment", body = Vec<CourseFile>),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_submissions(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<FileId>,
) -> Result<Json<Vec<CourseFile>>, AppError> {
    let files = FileService::list_submissions(&state.db, id).await?;
    Ok(Json(files))
}

/// Upload a PDF to a course as the multipart field `file`.
#[utoipa::path(
    post,
    path = "/api/v1/files/course/{id}",
    params(("id" = CourseId, Path, description = "Course ID"), UploadFileParams),
    request_body(content_type = "multipart/form-data", description = "Multipart form with a `file` field"),
    responses(
        (status = 201, description = "File stored", body = CourseFile),
        (status = 404, description = "Course or assignment not found"),
        (status = 415, description = "Not a PDF")
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, multipart), fields(user.id = %auth_user.user_id()))]
pub async fn upload_file(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<CourseId>,
    Query(params): Query<UploadFileParams>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CourseFile>), AppError> {
    CourseService::get_course(&state.db, id).await?;

    if let Some(assignment_id) = params.submission_id
        && FileService::find_file(&state.db, assignment_id).await?.is_none()
    {
        return Err(AppError::not_found(anyhow::anyhow!(
            "Assignment with id {} not found",
            assignment_id
        )));
    }

    let upload = read_file_field(&mut multipart, "file").await?;
    let policy = UploadPolicy::course_file().with_max_bytes(state.storage_config.max_upload_bytes);
    let key = store_upload(
        &state.storage,
        &policy,
        &upload,
        "Uploaded files can only be PDFs",
    )
    .await?;

    let new_file = NewCourseFile {
        course_id: id,
        owner_id: auth_user.user_id(),
        filename: key.clone(),
        file_type: params.file_type,
        submission_id: params.submission_id,
    };

    let created = match new_file.validate() {
        Ok(()) => FileService::create_file(&state.db, new_file).await,
        Err(e) => Err(AppError::unprocessable(anyhow::anyhow!(
            "Invalid file type: {}",
            e
        ))),
    };

    match created {
        Ok(file) => Ok((StatusCode::CREATED, Json(file))),
        Err(e) => {
            if let Err(delete_err) = state.storage.delete(&key).await {
                warn!(error = %delete_err, storage.key = %key, "Failed to clean up upload");
            }
            Err(e)
        }
    }
}

/// Grade a file. Allowed for course admins and for the owner of the
/// assignment the file was submitted against.
#[utoipa::path(
    put,
    path = "/api/v1/files/{id}",
    params(("id" = FileId, Path, description = "File ID")),
    request_body = UpdateFileDto,
    responses(
        (status = 200, description = "Graded file", body = CourseFile),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "File not found")
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn update_file(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FileId>,
    ValidatedJson(dto): ValidatedJson<UpdateFileDto>,
) -> Result<Json<CourseFile>, AppError> {
    let file = FileService::get_file(&state.db, id).await?;

    let owns_assignment = match file.submission_id {
        Some(assignment_id) => FileService::find_file(&state.db, assignment_id)
            .await?
            .is_some_and(|assignment| assignment.owner_id == auth_user.user_id()),
        None => false,
    };

    if !owns_assignment && !auth_user.has_permission(&state.db, COURSE).await? {
        return Err(AppError::forbidden(
            "The user doesn't have enough privileges".to_string(),
        ));
    }

    let file = FileService::set_marks(&state.db, id, dto.marks).await?;
    Ok(Json(file))
}
