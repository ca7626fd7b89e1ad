use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, instrument, warn};

use campus_core::permissions::SUPERUSER_PERMISSIONS;
use campus_core::{AppError, hash_password, verify_password};
use campus_models::ids::UserId;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User, UserType};

pub(crate) const USER_COLUMNS: &str =
    "id, full_name, email, profile_picture, hashed_password, is_active, is_admin, type, school_id";

fn email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow::anyhow!(
            "The user with this email already exists in the system."
        ));
    }
    AppError::database(e)
}

/// Permissions an administrative account type starts with.
fn default_permissions(user_type: UserType) -> i32 {
    if user_type == UserType::Superuser {
        SUPERUSER_PERMISSIONS
    } else {
        0
    }
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_user(db: &PgPool, user_id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        Self::find_user(db, user_id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The user with this ID does not exist in the system"
            ))
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY email OFFSET $1 LIMIT $2",
            USER_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    /// Returns the user when the email exists and the password matches.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = Self::find_by_email(db, email).await? else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        if !verify_password(password, &user.hashed_password)? {
            warn!(user.id = %user.id, "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Creates the account and the role rows its type and admin flag call for,
    /// all in one transaction.
    #[instrument(skip(db, dto), fields(user.email = %dto.email, user.role = %dto.user_type))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        let is_admin = dto.is_admin || dto.user_type.is_administrative();

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, full_name, hashed_password, is_active, is_admin, type, school_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&dto.email)
        .bind(&dto.full_name)
        .bind(&hashed_password)
        .bind(dto.is_active)
        .bind(is_admin)
        .bind(dto.user_type)
        .bind(dto.school_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(email_conflict)?;

        Self::insert_role_row(&mut tx, user.id, user.user_type).await?;

        if user.user_type.is_administrative() {
            Self::upsert_admin(&mut tx, user.id, default_permissions(user.user_type)).await?;
        } else if is_admin {
            Self::ensure_admin(&mut tx, user.id).await?;
        }

        tx.commit().await?;

        info!(user.id = %user.id, user.role = %user.user_type, "User created");
        Ok(user)
    }

    /// Applies a partial update and keeps the role rows consistent with the
    /// resulting type and admin flag. Everything runs in one transaction.
    ///
    /// Role rules:
    /// - leaving `admin`/`superuser` drops the admin row
    /// - entering `admin` sets permissions to 0, entering `superuser` to -1
    /// - `is_admin = true` creates an admin row with no permissions if missing,
    ///   `is_admin = false` removes it
    #[instrument(skip(db, dto), fields(user.id = %user_id))]
    pub async fn update_user(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The user with this id does not exist in the system"
            ))
        })?;

        let new_type = dto.user_type.unwrap_or(existing.user_type);
        let type_changed = new_type != existing.user_type;

        let is_admin = if new_type.is_administrative() {
            true
        } else {
            dto.is_admin
                .unwrap_or(existing.is_admin && !existing.user_type.is_administrative())
        };

        if type_changed {
            debug!(from = %existing.user_type, to = %new_type, "Changing user type");
            Self::delete_role_row(&mut tx, user_id, existing.user_type).await?;
            Self::insert_role_row(&mut tx, user_id, new_type).await?;

            if existing.user_type.is_administrative() && !new_type.is_administrative() {
                Self::delete_admin(&mut tx, user_id).await?;
            }
        }

        if new_type.is_administrative() {
            if type_changed {
                Self::upsert_admin(&mut tx, user_id, default_permissions(new_type)).await?;
            } else {
                Self::ensure_admin(&mut tx, user_id).await?;
            }
        } else if is_admin {
            Self::ensure_admin(&mut tx, user_id).await?;
        } else {
            Self::delete_admin(&mut tx, user_id).await?;
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET email = $1, full_name = $2, hashed_password = $3, is_active = $4,
                 is_admin = $5, type = $6, school_id = $7, profile_picture = $8
             WHERE id = $9
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(dto.email.unwrap_or(existing.email))
        .bind(dto.full_name.or(existing.full_name))
        .bind(hashed_password.unwrap_or(existing.hashed_password))
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .bind(is_admin)
        .bind(new_type)
        .bind(dto.school_id.or(existing.school_id))
        .bind(dto.profile_picture.or(existing.profile_picture))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(email_conflict)?;

        tx.commit().await?;

        info!(user.id = %user.id, user.role = %user.user_type, user.is_admin = user.is_admin, "User updated");
        Ok(user)
    }

    /// Stores the key of a newly uploaded picture and returns the updated user
    /// together with the key it replaced.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn set_profile_picture(
        db: &PgPool,
        user_id: UserId,
        key: &str,
    ) -> Result<(User, Option<String>), AppError> {
        let previous = sqlx::query_scalar::<_, Option<String>>(
            "SELECT profile_picture FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The user with this id does not exist in the system"
            ))
        })?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET profile_picture = $1 WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(key)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok((user, previous))
    }

    async fn insert_role_row(
        conn: &mut PgConnection,
        user_id: UserId,
        user_type: UserType,
    ) -> Result<(), AppError> {
        let query = match user_type {
            UserType::Professor => {
                "INSERT INTO professors (user_id) VALUES ($1) ON CONFLICT DO NOTHING"
            }
            UserType::Student => {
                "INSERT INTO students (user_id, term_id) VALUES ($1, NULL) ON CONFLICT DO NOTHING"
            }
            UserType::Admin | UserType::Superuser => return Ok(()),
        };

        sqlx::query(query).bind(user_id).execute(conn).await?;
        Ok(())
    }

    async fn delete_role_row(
        conn: &mut PgConnection,
        user_id: UserId,
        user_type: UserType,
    ) -> Result<(), AppError> {
        let query = match user_type {
            UserType::Professor => "DELETE FROM professors WHERE user_id = $1",
            UserType::Student => "DELETE FROM students WHERE user_id = $1",
            UserType::Admin | UserType::Superuser => return Ok(()),
        };

        sqlx::query(query).bind(user_id).execute(conn).await?;
        Ok(())
    }

    async fn upsert_admin(
        conn: &mut PgConnection,
        user_id: UserId,
        permissions: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO admins (user_id, permissions) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET permissions = EXCLUDED.permissions",
        )
        .bind(user_id)
        .bind(permissions)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn ensure_admin(conn: &mut PgConnection, user_id: UserId) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO admins (user_id, permissions) VALUES ($1, 0) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn delete_admin(conn: &mut PgConnection, user_id: UserId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM admins WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
