//! Outbound email.
//!
//! `EmailSender` is the seam: SMTP via lettre in production, a log-only sender when no
//! SMTP server is configured, and a recording sender in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use configs::EmailConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message. The error string is for logs only.
    async fn send(&self, message: EmailMessage) -> Result<(), String>;
}

/// Builds the sender for the given config.
pub fn sender_from_config(cfg: &EmailConfig) -> Result<Arc<dyn EmailSender>, String> {
    if cfg.smtp_enabled() {
        Ok(Arc::new(SmtpEmailSender::new(cfg)?))
    } else {
        Ok(Arc::new(LogEmailSender))
    }
}

#[derive(Clone)]
pub struct SmtpEmailSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(cfg: &EmailConfig) -> Result<Self, String> {
        let builder = if cfg.smtp_port == 465 {
            SmtpTransport::relay(&cfg.smtp_server)
        } else {
            SmtpTransport::starttls_relay(&cfg.smtp_server)
        }
        .map_err(|e| format!("SMTP relay error: {e}"))?;
        let transport = builder
            .port(cfg.smtp_port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .build();
        let from = format!("{} <{}>", cfg.from_name, cfg.from_email)
            .parse::<Mailbox>()
            .map_err(|e| format!("Invalid from address: {e}"))?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), String> {
        let to = message.to.parse::<Mailbox>().map_err(|e| format!("Invalid to address: {e}"))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .multipart(MultiPart::alternative_plain_html(message.text, message.html))
            .map_err(|e| format!("Failed to build email: {e}"))?;

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| format!("Email task failed: {e}"))?
            .map(|_| ())
            .map_err(|e| format!("Failed to send email: {e}"))
    }
}

/// Logs instead of sending. Used when SMTP is not configured.
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), String> {
        info!(to = %message.to, subject = %message.subject, "email_not_sent_smtp_disabled");
        Ok(())
    }
}

/// Captures messages in memory. Recipients listed in `fail_for` are rejected.
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail_for: Mutex<Vec<String>>,
}

impl RecordingEmailSender {
    pub fn fail_for(&self, to: &str) {
        if let Ok(mut list) = self.fail_for.lock() {
            list.push(to.to_string());
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), String> {
        let rejected = self.fail_for.lock().map(|l| l.contains(&message.to)).unwrap_or(false);
        if rejected {
            return Err(format!("mailbox unavailable: {}", message.to));
        }
        self.sent.lock().map_err(|e| e.to_string())?.push(message);
        Ok(())
    }
}

pub fn password_reset_email(to: &str, reset_link: &str) -> EmailMessage {
    let href = encode_double_quoted_attribute(reset_link);
    EmailMessage {
        to: to.to_string(),
        subject: "Password Reset Request".into(),
        text: format!(
            "You requested a password reset.\n\nOpen this link to choose a new password:\n{reset_link}\n\nThe link expires in one hour. If you did not request it, ignore this email."
        ),
        html: format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Reset your password</h2>
    <p>You requested a password reset. The link below expires in one hour.</p>
    <p><a href="{href}">Reset Password</a></p>
    <p style="color: #666; font-size: 14px;">If you did not request this, you can ignore this email.</p>
  </div>
</body>
</html>"#
        ),
    }
}

pub fn newsletter_email(to: &str, title: &str, body: &str, image: Option<&str>) -> EmailMessage {
    // title, body and image come from a public endpoint
    let title_html = encode_text(title);
    let body_html = encode_text(body);
    let image_html = image
        .filter(|i| !i.trim().is_empty())
        .map(|i| {
            format!(
                r#"<p><img src="{}" alt="{}" style="max-width: 100%;"></p>"#,
                encode_double_quoted_attribute(i),
                encode_double_quoted_attribute(title)
            )
        })
        .unwrap_or_default();
    EmailMessage {
        to: to.to_string(),
        subject: format!("New Newsletter: {title}"),
        text: format!("{title}\n\n{body}"),
        html: format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>{title_html}</h1>
    {image_html}
    <div>{body_html}</div>
  </div>
</body>
</html>"#
        ),
    }
}
