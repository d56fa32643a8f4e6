use askama::Template;

#[derive(Template)]
#[template(path = "emails/reminder.html")]
pub struct ReminderEmailTemplate {
    pub app_name: String,
    pub nombre: String,
    pub headline: &'static str,
    pub intro: &'static str,
    pub checklist: &'static [&'static str],
    pub cta_url: String,
}
