use std::env;

use crate::non_empty_var;

#[derive(Clone, Debug)]
pub struct EmailConfig {
    /// True only when host, port and sender address are all configured.
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_tls: bool,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    /// `project_name` is the sender name used when `EMAILS_FROM_NAME` is blank.
    pub fn from_env(project_name: &str) -> Self {
        let smtp_host = non_empty_var("SMTP_HOST");
        let smtp_port = env::var("SMTP_PORT").ok().and_then(|s| s.parse::<u16>().ok());
        let from_email = non_empty_var("EMAILS_FROM_EMAIL");

        Self {
            enabled: smtp_host.is_some() && smtp_port.is_some() && from_email.is_some(),
            smtp_host: smtp_host.unwrap_or_else(|| "localhost".to_string()),
            smtp_port: smtp_port.unwrap_or(25),
            smtp_username: env::var("SMTP_USER").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            smtp_tls: env::var("SMTP_TLS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(true),
            from_email: from_email.unwrap_or_default(),
            from_name: non_empty_var("EMAILS_FROM_NAME")
                .unwrap_or_else(|| project_name.to_string()),
        }
    }

    /// A config that never sends mail.
    pub fn disabled(project_name: &str) -> Self {
        Self {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            smtp_username: String::new(),
            smtp_password: String::new(),
            smtp_tls: false,
            from_email: String::new(),
            from_name: project_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_uses_project_name() {
        let config = EmailConfig::disabled("Campus");
        assert!(!config.enabled);
        assert_eq!(config.from_name, "Campus");
    }
}
