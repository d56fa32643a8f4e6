use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::roles::{Capability, Role};
use crate::auth::session::{self, require};
use crate::calendar::DateRange;
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::report_handlers::{clamp_year, today};
use crate::models::summary::{self, KindSummary};
use crate::reminders::{self, HttpMailer};
use crate::templates_structs::{KindCard, MonthBar, OverviewTemplate, PageContext};

#[derive(Deserialize)]
pub struct OverviewQuery {
    pub year: Option<i32>,
}

fn card(s: &KindSummary) -> KindCard {
    let [primary, secondary] = s.kind.metrics();
    let (current_label, current_primary, current_secondary) = match &s.current {
        Some(row) => (
            row.week_label.clone(),
            primary.unit.format(row.primary_value),
            secondary.unit.format(row.secondary_value),
        ),
        None => ("Sin registro para la semana actual".to_string(), "-".to_string(), "-".to_string()),
    };
    KindCard {
        title: s.kind.title().to_string(),
        slug: s.kind.slug().to_string(),
        primary_label: primary.label.to_string(),
        secondary_label: secondary.label.to_string(),
        total_primary: primary.unit.format(s.totals.primary),
        total_secondary: secondary.unit.format(s.totals.secondary),
        weeks_reported: s.totals.weeks,
        current_label,
        current_primary,
        current_secondary,
        months: s
            .months
            .iter()
            .map(|m| MonthBar {
                label: m.label.to_string(),
                value: primary.unit.format(m.primary),
                pct: m.bar_pct,
            })
            .collect(),
    }
}

/// GET /admin
///
/// Yearly totals and month charts per area.
pub async fn overview(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<OverviewQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require(&session, Capability::ViewOverview)?;

    let today = today();
    let year = clamp_year(query.year.unwrap_or_else(|| today.year()));
    let summaries = summary::year_overview(&pool, year, today, config.week_anchor).await?;

    let ctx = PageContext::build(&session, &user, &config.app_name, "/admin");
    let tmpl = OverviewTemplate {
        ctx,
        year,
        prev_year: clamp_year(year - 1),
        next_year: clamp_year(year + 1),
        today_label: DateRange { start: today, end: today }.label(),
        cards: summaries.iter().map(card).collect(),
    };
    render(tmpl)
}

#[derive(Deserialize)]
pub struct ViewAsForm {
    pub role: String,
    pub csrf_token: String,
}

/// POST /admin/ver-como
///
/// Render the app as another role.
pub async fn view_as(
    session: Session,
    form: web::Form<ViewAsForm>,
) -> Result<HttpResponse, AppError> {
    let user = require(&session, Capability::Impersonate)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let role: Role = form
        .role
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;
    session::set_view_as(&session, Some(role))?;
    log::info!("{} is viewing the app as {}", user.email, role);
    Ok(redirect(&role.home_path()))
}

/// POST /admin/ver-como/salir
pub async fn stop_view_as(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require(&session, Capability::Impersonate)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session::set_view_as(&session, None)?;
    Ok(redirect("/admin"))
}

/// POST /admin/recordatorios
///
/// Manual trigger from the overview page.
pub async fn send_reminders(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<CsrfOnly>,
    mailer: Option<web::Data<HttpMailer>>,
) -> Result<HttpResponse, AppError> {
    let user = require(&session, Capability::TriggerReminders)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(mailer) = mailer else {
        session::set_flash(&session, "El envío de correos no está configurado");
        return Ok(redirect("/admin"));
    };

    log::info!("{} triggered reminders manually", user.email);
    let summary = reminders::run(&pool, mailer.get_ref(), &config.app_name, &config.app_url).await?;
    session::set_flash(
        &session,
        &format!(
            "Recordatorios enviados: {} de {} ({} con error)",
            summary.sent, summary.total, summary.failed
        ),
    );
    Ok(redirect("/admin"))
}
