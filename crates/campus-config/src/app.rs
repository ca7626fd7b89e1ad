use std::env;

use crate::non_empty_var;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub project_name: String,
    /// Prefix every API route is nested under.
    pub api_prefix: String,
    /// Public base URL, used in links sent by email.
    pub server_host: String,
    pub port: u16,
    pub first_superuser: Option<String>,
    pub first_superuser_password: Option<String>,
    pub sentry_dsn: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "Campus".to_string(),
            api_prefix: "/api/v1".to_string(),
            server_host: "http://localhost:8000".to_string(),
            port: 8000,
            first_superuser: None,
            first_superuser_password: None,
            sentry_dsn: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            project_name: non_empty_var("PROJECT_NAME").unwrap_or(defaults.project_name),
            api_prefix: non_empty_var("API_V1_STR")
                .map(|prefix| normalize_prefix(&prefix))
                .unwrap_or(defaults.api_prefix),
            server_host: non_empty_var("SERVER_HOST").unwrap_or(defaults.server_host),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            first_superuser: non_empty_var("FIRST_SUPERUSER"),
            first_superuser_password: non_empty_var("FIRST_SUPERUSER_PASSWORD"),
            sentry_dsn: non_empty_var("SENTRY_DSN"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
