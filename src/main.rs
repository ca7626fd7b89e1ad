use anyhow::Context;
use campus::cli::ensure_first_superuser;
use campus::logging::{init_sentry, init_tracing};
use campus::router::init_router;
use campus::state::init_app_state;
use campus_config::AppConfig;
use campus_db::run_migrations;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;
    let _sentry = init_sentry(AppConfig::from_env().sentry_dsn.as_deref());

    let state = init_app_state().await?;
    run_migrations(&state.db).await?;
    ensure_first_superuser(&state.db, &state.app_config).await?;

    let address = state.app_config.bind_address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");
    axum::serve(listener, app).await?;

    Ok(())
}
