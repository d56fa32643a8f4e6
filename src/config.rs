//! Runtime configuration, read from environment variables (and `.env` via dotenvy).

use std::fmt;
use std::time::Duration;

use crate::calendar::WeekAnchor;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, reason } => write!(f, "{key} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Transactional email API settings. Absent when `EMAIL_API_KEY` is unset,
/// in which case reminders are disabled.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    pub app_name: String,
    /// Public base URL used in email links.
    pub app_url: String,
    pub week_anchor: WeekAnchor,
    pub email: Option<EmailConfig>,
    pub cron_secret: Option<String>,
    pub reminder_interval: Option<Duration>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let week_anchor = match get("WEEK_ANCHOR") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| ConfigError::Invalid { key: "WEEK_ANCHOR", reason })?,
            None => WeekAnchor::default(),
        };

        let reminder_interval = match get("REMINDER_INTERVAL_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "REMINDER_INTERVAL_SECS",
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "REMINDER_INTERVAL_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let email = match get("EMAIL_API_KEY") {
            Some(api_key) => Some(EmailConfig {
                api_url: get("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
                api_key,
                from: get("EMAIL_FROM").ok_or(ConfigError::Missing("EMAIL_FROM"))?,
            }),
            None => None,
        };

        let cookie_secure = match get("COOKIE_SECURE").as_deref() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "COOKIE_SECURE",
                    reason: format!("expected true/false, got '{other}'"),
                });
            }
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let app_url = get("APP_URL")
            .unwrap_or_else(|| format!("http://{bind_addr}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            app_url,
            bind_addr,
            session_key: get("SESSION_KEY"),
            cookie_secure,
            app_name: get("APP_NAME").unwrap_or_else(|| "TopMarket".to_string()),
            week_anchor,
            email,
            cron_secret: get("CRON_SECRET"),
            reminder_interval,
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
        })
    }
}
