use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::config::EmailConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug)]
pub enum MailError {
    Http(reqwest::Error),
    Rejected { status: u16, body: String },
    Render(askama::Error),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::Http(e) => write!(f, "HTTP error: {e}"),
            MailError::Rejected { status, body } => write!(f, "rejected with HTTP {status}: {body}"),
            MailError::Render(e) => write!(f, "template error: {e}"),
        }
    }
}

impl std::error::Error for MailError {}

impl From<reqwest::Error> for MailError {
    fn from(e: reqwest::Error) -> Self {
        MailError::Http(e)
    }
}

impl From<askama::Error> for MailError {
    fn from(e: askama::Error) -> Self {
        MailError::Render(e)
    }
}

/// Anything that can deliver one email.
pub trait Mailer {
    fn send(&self, email: &OutgoingEmail) -> impl Future<Output = Result<(), MailError>>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Client for a JSON transactional email API (`POST` with a bearer key).
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpMailer {
    pub fn new(config: EmailConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, config })
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let body = SendRequest {
            from: &self.config.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(MailError::Rejected { status: status.as_u16(), body })
    }
}
