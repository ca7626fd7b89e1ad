use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, instrument};

use campus_config::{AppConfig, EmailConfig};
use campus_core::AppError;

pub struct EmailService {
    config: EmailConfig,
    project_name: String,
    server_host: String,
}

impl EmailService {
    pub fn new(config: EmailConfig, app_config: &AppConfig) -> Self {
        Self {
            config,
            project_name: app_config.project_name.clone(),
            server_host: app_config.server_host.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[instrument(skip(self))]
    pub async fn send_test_email(&self, to_email: &str) -> Result<(), AppError> {
        let subject = format!("{} - Test email", self.project_name);
        let text_body = format!(
            "This is a test email sent by {}.\n\nIf you can read this, outgoing mail works.",
            self.project_name
        );
        let html_body = self.layout(
            "Test email",
            &format!(
                "<p>This is a test email sent by <strong>{}</strong>.</p>\
                 <p>If you can read this, outgoing mail works.</p>",
                self.project_name
            ),
        );

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn send_new_account_email(
        &self,
        to_email: &str,
        username: &str,
    ) -> Result<(), AppError> {
        let subject = format!("{} - New account for user {}", self.project_name, username);
        let text_body = format!(
            "Welcome to {}!\n\n\
             An account was created for you with the username {}.\n\n\
             Log in at {}",
            self.project_name, username, self.server_host
        );
        let html_body = self.layout(
            "Your new account",
            &format!(
                "<p>Welcome to <strong>{}</strong>!</p>\
                 <p>An account was created for you with the username <strong>{}</strong>.</p>\
                 <p><a href=\"{}\">Go to the dashboard</a></p>",
                self.project_name, username, self.server_host
            ),
        );

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn send_new_admin_email(&self, to_email: &str, name: &str) -> Result<(), AppError> {
        let subject = format!("{} - You are now an administrator", self.project_name);
        let text_body = format!(
            "Hi {},\n\n\
             You have been made an administrator of {}.\n\n\
             Log in at {}",
            name, self.project_name, self.server_host
        );
        let html_body = self.layout(
            "New administrator",
            &format!(
                "<p>Hi <strong>{}</strong>,</p>\
                 <p>You have been made an administrator of {}.</p>\
                 <p><a href=\"{}\">Go to the dashboard</a></p>",
                name, self.project_name, self.server_host
            ),
        );

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn send_reset_password_email(
        &self,
        to_email: &str,
        token: &str,
        valid_hours: i64,
    ) -> Result<(), AppError> {
        let subject = format!("{} - Password recovery for user {}", self.project_name, to_email);
        let reset_link = format!("{}/reset-password?token={}", self.server_host, token);
        let text_body = format!(
            "We received a request to recover the password for {}.\n\n\
             Reset your password here:\n{}\n\n\
             This link will expire in {} hours.\n\n\
             If you didn't request this, please ignore this email.",
            to_email, reset_link, valid_hours
        );
        let html_body = self.layout(
            "Password recovery",
            &format!(
                "<p>We received a request to recover the password for <strong>{}</strong>.</p>\
                 <p><a href=\"{}\">Reset password</a></p>\
                 <p>This link will expire in {} hours.</p>\
                 <p>If you didn't request this, please ignore this email.</p>",
                to_email, reset_link, valid_hours
            ),
        );

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            debug!("Email delivery disabled, skipping");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if !self.config.smtp_tls {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let mut builder = SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port);

            if !self.config.smtp_username.is_empty() {
                builder = builder.credentials(Credentials::new(
                    self.config.smtp_username.clone(),
                    self.config.smtp_password.clone(),
                ));
            }

            builder.build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn layout(&self, title: &str, content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" align="center" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="background-color: #1E3A8A; padding: 24px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 24px;">{project}</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 32px; color: #444444; font-size: 15px; line-height: 1.5;">
                <h2 style="margin: 0 0 16px 0; color: #222222;">{title}</h2>
                {content}
            </td>
        </tr>
        <tr>
            <td style="padding: 16px; text-align: center; color: #999999; font-size: 12px;">
                This is an automated email from {project}. Please do not reply.
            </td>
        </tr>
    </table>
</body>
</html>"#,
            title = title,
            project = self.project_name,
            content = content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_service_skips_delivery() {
        let app_config = AppConfig::default();
        let service = EmailService::new(
            EmailConfig::disabled(&app_config.project_name),
            &app_config,
        );

        assert!(!service.is_enabled());
        assert!(service.send_test_email("nobody@example.com").await.is_ok());
    }

    #[test]
    fn test_layout_includes_project_name() {
        let app_config = AppConfig::default();
        let service = EmailService::new(EmailConfig::disabled("Campus"), &app_config);
        let html = service.layout("Hello", "<p>Body</p>");
        assert!(html.contains("Campus"));
        assert!(html.contains("<p>Body</p>"));
    }
}
