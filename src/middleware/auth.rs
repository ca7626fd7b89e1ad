use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use campus_auth::verify_access_token;
use campus_core::{AppError, permissions};
use campus_models::admins::Admin;
use campus_models::professors::Professor;
use campus_models::students::Student;
use campus_models::{User, UserId, UserType};
use sqlx::PgPool;

use crate::modules::admins::service::AdminService;
use crate::modules::professors::service::ProfessorService;
use crate::modules::students::service::StudentService;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))
}

/// The active account behind a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.id
    }

    pub fn user(&self) -> &User {
        &self.0
    }

    /// Whether this user is an admin holding `permission`.
    pub async fn has_permission(&self, db: &PgPool, permission: &str) -> Result<bool, AppError> {
        if !self.0.is_admin {
            return Ok(false);
        }

        Ok(AdminService::find_admin(db, self.0.id)
            .await?
            .is_some_and(|admin| admin.permissions().is_allowed(permission)))
    }

    /// Passes when the caller is `target` or an admin holding `permission`.
    pub async fn ensure_self_or_permission(
        &self,
        db: &PgPool,
        target: UserId,
        permission: &str,
    ) -> Result<(), AppError> {
        if self.0.id == target || self.has_permission(db, permission).await? {
            return Ok(());
        }

        Err(AppError::forbidden(
            "The user doesn't have enough privileges".to_string(),
        ))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = verify_access_token(token, &state.jwt_config)?;

        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AppError::forbidden("Could not validate credentials".to_string()))?;

        let user = UserService::find_user(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !user.is_active {
            return Err(AppError::conflict(anyhow::anyhow!("Inactive user")));
        }

        Ok(AuthUser(user))
    }
}

/// An administrator together with their admin row.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub user: User,
    pub admin: Admin,
}

impl CurrentAdmin {
    pub fn is_allowed(&self, permission: &str) -> bool {
        self.admin.permissions().is_allowed(permission)
    }
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(AppError::forbidden(
                "User is not an administrator".to_string(),
            ));
        }

        let admin = AdminService::find_admin(&state.db, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin object not found")))?;

        Ok(CurrentAdmin { user, admin })
    }
}

#[derive(Debug, Clone)]
pub struct CurrentStudent {
    pub user: User,
    pub student: Student,
}

impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.user_type != UserType::Student {
            return Err(AppError::forbidden("User is not a student".to_string()));
        }

        let student = StudentService::find_student(&state.db, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student object not found")))?;

        Ok(CurrentStudent { user, student })
    }
}

#[derive(Debug, Clone)]
pub struct CurrentProfessor {
    pub user: User,
    pub professor: Professor,
}

impl FromRequestParts<AppState> for CurrentProfessor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.user_type != UserType::Professor {
            return Err(AppError::forbidden("User is not a professor".to_string()));
        }

        let professor = ProfessorService::find_professor(&state.db, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Professor object not found")))?;

        Ok(CurrentProfessor { user, professor })
    }
}

/// Generates an extractor that admits admins whose bitmask allows `$permission`.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::CurrentAdmin);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = campus_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let admin =
                    $crate::middleware::auth::CurrentAdmin::from_request_parts(parts, state)
                        .await?;

                if !admin.is_allowed($permission) {
                    return Err(campus_core::AppError::forbidden(
                        "This admin doesn't have enough privileges".to_string(),
                    ));
                }

                Ok($name(admin))
            }
        }
    };
}

require_permission!(RequireUser, permissions::USER);
require_permission!(RequireAdmin, permissions::ADMIN);
require_permission!(RequireSchool, permissions::SCHOOL);
require_permission!(RequireYear, permissions::YEAR);
require_permission!(RequireTerm, permissions::TERM);
require_permission!(RequireCourse, permissions::COURSE);
require_permission!(RequireStudent, permissions::STUDENT);
require_permission!(RequireProfessor, permissions::PROFESSOR);
