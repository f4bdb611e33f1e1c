use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use skillswap_config::EmailConfig;
use skillswap_core::AppError;
use skillswap_models::{Email, SocialLinks, UserCard};
use tracing::{info, instrument, warn};

/// One side of an accepted swap: who to write to, and the counterpart whose
/// contact details they now get to see.
#[derive(Debug, Clone)]
pub struct MatchNotice {
    pub to_email: Email,
    pub to_name: String,
    pub counterpart: UserCard,
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Sends every notice on a detached task. Failures are logged and never
    /// reach the caller.
    pub fn spawn_swap_accepted(&self, notices: Vec<MatchNotice>) {
        let service = self.clone();
        tokio::spawn(async move {
            for notice in notices {
                if let Err(e) = service.send_swap_accepted(&notice).await {
                    warn!(
                        to = %notice.to_email,
                        error = %e.error,
                        "Failed to send swap accepted email"
                    );
                }
            }
        });
    }

    #[instrument(skip(self, notice), fields(to = %notice.to_email))]
    pub async fn send_swap_accepted(&self, notice: &MatchNotice) -> Result<(), AppError> {
        let subject = format!("You matched with {} on SkillSwap", notice.counterpart.name);
        let text_body = swap_accepted_text(&notice.to_name, &notice.counterpart);
        let html_body = swap_accepted_html(&notice.to_name, &notice.counterpart);

        if !self.config.enabled {
            info!(subject = %subject, "SMTP disabled, skipping swap accepted email");
            return Ok(());
        }

        self.send_email(notice.to_email.as_str(), &subject, &text_body, &html_body)
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

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

fn contact_lines(card: &UserCard) -> Vec<String> {
    let SocialLinks {
        instagram,
        telegram,
        twitter,
    } = &card.social_links;

    [
        ("Phone", &card.phone),
        ("Instagram", instagram),
        ("Telegram", telegram),
        ("Twitter", twitter),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
    .collect()
}

fn swap_accepted_text(to_name: &str, counterpart: &UserCard) -> String {
    format!(
        "Hi {},\n\n\
         Your skill swap with {} has been accepted.\n\n\
         You can reach them here:\n\
         {}\n\n\
         Happy swapping,\n\
         SkillSwap Team",
        to_name,
        counterpart.name,
        contact_lines(counterpart).join("\n")
    )
}

fn swap_accepted_html(to_name: &str, counterpart: &UserCard) -> String {
    let items: String = contact_lines(counterpart)
        .iter()
        .map(|line| format!("<li>{}</li>", html_escape(line)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Swap accepted</title></head>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f4; padding: 20px;">
    <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 30px;">
        <h1 style="color: #0F766E; margin-top: 0;">It's a match!</h1>
        <p>Hi {},</p>
        <p>Your skill swap with <strong>{}</strong> has been accepted. You can reach them here:</p>
        <ul>{}</ul>
        <p style="color: #666666;">Happy swapping,<br>SkillSwap Team</p>
    </div>
</body>
</html>"#,
        html_escape(to_name),
        html_escape(&counterpart.name),
        items
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
