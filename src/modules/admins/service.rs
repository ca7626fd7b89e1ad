use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::UserId;
use campus_models::users::{User, UserType};

use crate::modules::admins::model::{Admin, CreateAdminDto, UpdateAdminDto};
use crate::modules::users::service::USER_COLUMNS;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "admins"))]
    pub async fn find_admin(db: &PgPool, user_id: UserId) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT user_id, permissions FROM admins WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(admin)
    }

    /// Grants admin rights to a professor. Returns the new admin row and the
    /// promoted account.
    #[instrument(skip(db))]
    pub async fn promote(db: &PgPool, dto: CreateAdminDto) -> Result<(Admin, User), AppError> {
        let mut tx = db.begin().await?;

        let already_admin = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE user_id = $1)",
        )
        .bind(dto.user_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_admin {
            return Err(AppError::conflict(anyhow::anyhow!(
                "This user is already an admin!"
            )));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(dto.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("This user does not exist!")))?;

        if user.user_type != UserType::Professor {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "A {} cannot be promoted to an admin!",
                user.user_type
            )));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_admin = TRUE WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(dto.user_id)
        .fetch_one(&mut *tx)
        .await?;

        let admin = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (user_id, permissions) VALUES ($1, $2)
             RETURNING user_id, permissions",
        )
        .bind(dto.user_id)
        .bind(dto.permissions)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(admin.id = %admin.user_id, admin.permissions = admin.permissions, "Professor promoted to admin");
        Ok((admin, user))
    }

    /// Replaces an admin's permission bitmask. Superuser rows are left alone.
    #[instrument(skip(db))]
    pub async fn update_permissions(db: &PgPool, dto: UpdateAdminDto) -> Result<Admin, AppError> {
        let existing = Self::find_admin(db, dto.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("This admin does not exist!")))?;

        let Some(permissions) = dto.permissions else {
            return Ok(existing);
        };

        if existing.permissions().is_superuser() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Superuser permissions cannot be modified"
            )));
        }

        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins SET permissions = $1 WHERE user_id = $2
             RETURNING user_id, permissions",
        )
        .bind(permissions)
        .bind(dto.user_id)
        .fetch_one(db)
        .await?;

        info!(admin.id = %admin.user_id, admin.permissions = admin.permissions, "Admin permissions updated");
        Ok(admin)
    }

    /// Takes admin rights away from a professor and returns the removed row.
    #[instrument(skip(db))]
    pub async fn demote(db: &PgPool, user_id: UserId) -> Result<Admin, AppError> {
        let mut tx = db.begin().await?;

        let user_type = sqlx::query_scalar::<_, UserType>(
            "UPDATE users SET is_admin = FALSE WHERE id = $1 AND type NOT IN ('admin', 'superuser')
             RETURNING type",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if user_type.is_none() {
            let existing = sqlx::query_scalar::<_, UserType>("SELECT type FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("This user does not exist!")))?;

            return Err(AppError::bad_request(anyhow::anyhow!(
                "A {} cannot be demoted!",
                existing
            )));
        }

        let admin = sqlx::query_as::<_, Admin>(
            "DELETE FROM admins WHERE user_id = $1 RETURNING user_id, permissions",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("This admin does not exist!")))?;

        tx.commit().await?;

        info!(admin.id = %admin.user_id, "Admin demoted");
        Ok(admin)
    }
}
