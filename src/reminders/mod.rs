//! Weekly reminder emails to everyone on the roster.
//!
//! A failed send is logged and counted; it never stops the rest of the batch.

pub mod content;
pub mod mailer;
pub mod scheduler;

use askama::Template;
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::roles::Role;
use crate::models::user::{self, RosterEntry};
use crate::templates_structs::ReminderEmailTemplate;

pub use self::mailer::{HttpMailer, MailError, Mailer, OutgoingEmail};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Render the email for one roster entry.
pub fn build_email(entry: &RosterEntry, app_name: &str, app_url: &str) -> Result<OutgoingEmail, MailError> {
    let role = entry.role.parse::<Role>().ok();
    let content = content::content_for(role);
    let path = role.map(|r| r.home_path()).unwrap_or_else(|| "/dashboard".to_string());

    let html = ReminderEmailTemplate {
        app_name: app_name.to_string(),
        nombre: entry.nombre.clone(),
        headline: content.headline,
        intro: content.intro,
        checklist: content.checklist,
        cta_url: format!("{app_url}{path}"),
    }
    .render()?;

    Ok(OutgoingEmail {
        to: entry.email.clone(),
        subject: content.subject.to_string(),
        html,
    })
}

/// Send one reminder per roster entry, sequentially.
pub async fn dispatch<M: Mailer>(
    mailer: &M,
    roster: &[RosterEntry],
    app_name: &str,
    app_url: &str,
) -> ReminderSummary {
    let mut summary = ReminderSummary { total: roster.len(), ..Default::default() };

    for entry in roster {
        let outcome = match build_email(entry, app_name, app_url) {
            Ok(email) => mailer.send(&email).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                log::warn!("Reminder to {} failed: {}", entry.email, e);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Reminders done: total={}, sent={}, failed={}",
        summary.total,
        summary.sent,
        summary.failed
    );
    summary
}

/// Load the roster and send the batch.
pub async fn run<M: Mailer>(
    pool: &PgPool,
    mailer: &M,
    app_name: &str,
    app_url: &str,
) -> Result<ReminderSummary, sqlx::Error> {
    let roster = user::find_reminder_roster(pool).await?;
    Ok(dispatch(mailer, &roster, app_name, app_url).await)
}
