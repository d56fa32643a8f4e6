use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

use super::{parse_kind, week_from_path, week_url};
use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::{self, SessionUser, require};
use crate::calendar::Week;
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::models::report_kind::{MetricUnit, ReportKind};
use crate::models::venta_detalle;
use crate::models::weekly::{self, WeeklyReport, WeeklyReportForm};
use crate::templates_structs::{DetailRow, PageContext, WeekFormTemplate};

/// Raw input value; counts without decimals.
fn input_value(unit: MetricUnit, value: f64) -> String {
    match unit {
        MetricUnit::Count => format!("{value:.0}"),
        MetricUnit::Currency => format!("{value:.2}"),
    }
}

fn shifted_week_url(kind: ReportKind, shifted: Option<NaiveDate>, current: NaiveDate) -> String {
    week_url(kind, shifted.unwrap_or(current))
}

struct WeekPage<'a> {
    kind: ReportKind,
    week: Week,
    stored: Option<&'a WeeklyReport>,
    primary_value: String,
    secondary_value: String,
    notas: String,
    errors: Vec<String>,
}

async fn render_week(
    pool: &PgPool,
    config: &AppConfig,
    session: &Session,
    user: &SessionUser,
    page: WeekPage<'_>,
) -> Result<HttpResponse, AppError> {
    let kind = page.kind;
    let [primary, secondary] = kind.metrics();

    let (details, details_total) = match page.stored {
        Some(row) if kind.has_details() => {
            let rows = venta_detalle::find_by_venta(pool, row.id).await?;
            let total: f64 = rows.iter().map(|d| d.monto).sum();
            let details = rows
                .into_iter()
                .map(|d| DetailRow {
                    id: d.id,
                    fecha: d.fecha.format("%Y-%m-%d").to_string(),
                    monto: input_value(MetricUnit::Currency, d.monto),
                    monto_display: MetricUnit::Currency.format(d.monto),
                    detalles: d.detalles,
                })
                .collect();
            (details, MetricUnit::Currency.format(total))
        }
        _ => (Vec::new(), MetricUnit::Currency.format(0.0)),
    };

    let ctx = PageContext::build(session, user, &config.app_name, &kind.path());
    let tmpl = WeekFormTemplate {
        ctx,
        kind_slug: kind.slug().to_string(),
        kind_title: kind.title().to_string(),
        week_label: page
            .stored
            .map(|r| r.week_label.clone())
            .unwrap_or_else(|| page.week.label()),
        week_start: page.week.start.format("%Y-%m-%d").to_string(),
        range_label: page.week.range().label(),
        prev_week: shifted_week_url(kind, page.week.start.checked_sub_signed(Duration::days(7)), page.week.start),
        next_week: shifted_week_url(kind, page.week.start.checked_add_signed(Duration::days(7)), page.week.start),
        report_id: page.stored.map(|r| r.id),
        primary_label: primary.label.to_string(),
        secondary_label: secondary.label.to_string(),
        primary_step: primary.unit.input_step().to_string(),
        secondary_step: secondary.unit.input_step().to_string(),
        primary_value: page.primary_value,
        secondary_value: page.secondary_value,
        notas: page.notas,
        can_edit: user.can(Capability::EditReports(kind)),
        can_delete: user.can(Capability::DeleteReports),
        errors: page.errors,
        has_details: kind.has_details(),
        details,
        details_total,
    };
    render(tmpl)
}

/// GET /reportes/{kind}/semanas/{week_start}
pub async fn week_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<(String, NaiveDate)>,
) -> Result<HttpResponse, AppError> {
    let (slug, date) = path.into_inner();
    let kind = parse_kind(&slug)?;
    let user = require(&session, Capability::ViewReports(kind))?;

    let week = week_from_path(date, config.week_anchor)?;
    if week.start != date {
        return Ok(redirect(&week_url(kind, week.start)));
    }

    let stored = weekly::find_by_week_start(&pool, kind, week.start).await?;
    let [primary, secondary] = kind.metrics();
    let page = WeekPage {
        kind,
        week,
        stored: stored.as_ref(),
        primary_value: input_value(primary.unit, stored.as_ref().map_or(0.0, |r| r.primary_value)),
        secondary_value: input_value(secondary.unit, stored.as_ref().map_or(0.0, |r| r.secondary_value)),
        notas: stored.as_ref().map(|r| r.notas.clone()).unwrap_or_default(),
        errors: vec![],
    };
    render_week(&pool, &config, &session, &user, page).await
}

/// POST /reportes/{kind}/semanas/{week_start}
///
/// First save inserts, later saves overwrite.
pub async fn save_week(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<(String, NaiveDate)>,
    form: web::Form<WeeklyReportForm>,
) -> Result<HttpResponse, AppError> {
    let (slug, date) = path.into_inner();
    let kind = parse_kind(&slug)?;
    let user = require(&session, Capability::EditReports(kind))?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let week = week_from_path(date, config.week_anchor)?;

    let values = match form.parse(kind) {
        Ok(values) => values,
        Err(errors) => {
            let stored = weekly::find_by_week_start(&pool, kind, week.start).await?;
            let page = WeekPage {
                kind,
                week,
                stored: stored.as_ref(),
                primary_value: form.primary_value.clone(),
                secondary_value: form.secondary_value.clone(),
                notas: form.notas.clone(),
                errors,
            };
            return render_week(&pool, &config, &session, &user, page).await;
        }
    };

    match weekly::save_week(&pool, kind, &week, &values).await {
        Ok(id) => {
            log::info!("{} saved {} week {} (id {})", user.email, kind, week.start, id);
            session::set_flash(&session, "Semana guardada");
        }
        Err(e) => {
            log::error!("Saving {} week {} failed: {}", kind, week.start, e);
            session::set_flash(&session, "No se pudo guardar la semana, intenta de nuevo");
        }
    }
    Ok(redirect(&week_url(kind, week.start)))
}
