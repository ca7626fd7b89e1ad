use std::sync::Arc;

use campus_config::{AppConfig, CorsConfig, EmailConfig, JwtConfig, StorageConfig};
use campus_core::file_storage::LocalFileStorage;
use campus_db::init_db_pool;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub app_config: AppConfig,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub storage: Arc<LocalFileStorage>,
}

impl AppState {
    /// Builds a state around an existing pool, reading everything else from the
    /// environment. Used by `init_app_state` and by the integration tests.
    pub fn from_pool(db: PgPool) -> Self {
        let app_config = AppConfig::from_env();
        let email_config = EmailConfig::from_env(&app_config.project_name);
        let storage_config = StorageConfig::from_env();
        let storage = Arc::new(LocalFileStorage::new(
            storage_config.base_dir.clone(),
            storage_config.base_url.clone(),
        ));

        Self {
            db,
            app_config,
            jwt_config: JwtConfig::from_env(),
            email_config,
            cors_config: CorsConfig::from_env(),
            storage_config,
            storage,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    Ok(AppState::from_pool(db))
}
