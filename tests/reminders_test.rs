//! Reminder email tests with an in-memory mailer.

use std::cell::RefCell;

use topmarket::auth::roles::Role;
use topmarket::models::user::RosterEntry;
use topmarket::reminders::content::content_for;
use topmarket::reminders::{self, MailError, Mailer, OutgoingEmail, ReminderSummary};

/// Records every email; fails for addresses listed in `fail_for`.
#[derive(Default)]
struct FakeMailer {
    sent: RefCell<Vec<OutgoingEmail>>,
    fail_for: Vec<String>,
}

impl Mailer for FakeMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail_for.contains(&email.to) {
            return Err(MailError::Rejected { status: 422, body: "invalid recipient".to_string() });
        }
        self.sent.borrow_mut().push(email.clone());
        Ok(())
    }
}

fn entry(email: &str, role: &str) -> RosterEntry {
    RosterEntry {
        email: email.to_string(),
        nombre: "Ana".to_string(),
        role: role.to_string(),
    }
}

#[test]
fn test_every_role_has_distinct_content() {
    let mut subjects: Vec<&str> = Role::ALL.iter().map(|r| content_for(Some(*r)).subject).collect();
    subjects.push(content_for(None).subject);
    let before = subjects.len();
    subjects.sort_unstable();
    subjects.dedup();
    assert_eq!(subjects.len(), before);
}

#[test]
fn test_build_email_links_to_role_home() {
    let email = reminders::build_email(&entry("ana@x.mx", "cobranza"), "TopMarket", "https://tm.example")
        .expect("render");
    assert_eq!(email.to, "ana@x.mx");
    assert_eq!(email.subject, content_for(Some(Role::Cobranza)).subject);
    assert!(email.html.contains("https://tm.example/reportes/cobranza"));
    assert!(email.html.contains("Ana"));
}

#[test]
fn test_unknown_role_gets_generic_email() {
    let email = reminders::build_email(&entry("x@x.mx", "marketing"), "TopMarket", "https://tm.example")
        .expect("render");
    assert_eq!(email.subject, content_for(None).subject);
    assert!(email.html.contains("https://tm.example/dashboard"));
}

#[tokio::test]
async fn test_dispatch_counts_failures_and_continues() {
    let mailer = FakeMailer {
        fail_for: vec!["bad@x.mx".to_string()],
        ..Default::default()
    };
    let roster = vec![
        entry("a@x.mx", "ventas"),
        entry("bad@x.mx", "pxr"),
        entry("c@x.mx", "admin"),
    ];

    let summary = reminders::dispatch(&mailer, &roster, "TopMarket", "http://localhost:8080").await;

    assert_eq!(summary, ReminderSummary { total: 3, sent: 2, failed: 1 });
    let sent = mailer.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].to, "c@x.mx");
}

#[tokio::test]
async fn test_dispatch_empty_roster() {
    let mailer = FakeMailer::default();
    let summary = reminders::dispatch(&mailer, &[], "TopMarket", "http://localhost").await;
    assert_eq!(summary, ReminderSummary::default());
}
