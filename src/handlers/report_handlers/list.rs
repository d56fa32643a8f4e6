use std::collections::{BTreeMap, HashMap};

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;

use super::{clamp_year, parse_kind, today, year_url};
use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::{self, require};
use crate::calendar::{DateRange, find_current_week, generate_weeks_for_year};
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::models::summary::totals_in_range;
use crate::models::{venta_detalle, weekly};
use crate::models::report_kind::{MetricUnit, ReportKind};
use crate::templates_structs::{PageContext, ReportYearTemplate, WeekRow};

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// GET /reportes/{kind}
///
/// Every week of the year, seeding empty rows on first visit.
pub async fn year_view(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, AppError> {
    let kind = parse_kind(&path)?;
    let user = require(&session, Capability::ViewReports(kind))?;

    let today = today();
    let year = clamp_year(query.year.unwrap_or_else(|| today.year()));
    let weeks = generate_weeks_for_year(year, config.week_anchor);

    let mut stored = weekly::find_for_weeks(&pool, kind, &weeks).await?;
    if stored.is_empty() && !weeks.is_empty() {
        weekly::seed_weeks(&pool, kind, &weeks).await?;
        stored = weekly::find_for_weeks(&pool, kind, &weeks).await?;
    }

    let detail_totals: HashMap<i64, f64> = if kind.has_details() {
        let ids: Vec<i64> = stored.iter().map(|r| r.id).collect();
        venta_detalle::totals_by_venta(&pool, &ids).await?.into_iter().collect()
    } else {
        HashMap::new()
    };

    let [primary, secondary] = kind.metrics();
    let current_start = find_current_week(&weeks, today).map(|i| weeks[i].start);

    // Generated weeks first, then stored rows fill in (and add any week the
    // current anchor would not generate).
    let mut rows: BTreeMap<NaiveDate, WeekRow> = weeks
        .iter()
        .map(|w| {
            (w.start, WeekRow {
                id: None,
                label: w.label(),
                start: w.start.format("%Y-%m-%d").to_string(),
                primary: primary.unit.format(0.0),
                secondary: secondary.unit.format(0.0),
                notas: String::new(),
                detail_total: None,
                is_current: Some(w.start) == current_start,
                is_future: w.start > today,
            })
        })
        .collect();

    for r in &stored {
        let entry = rows.entry(r.week_start).or_insert_with(|| WeekRow {
            id: None,
            label: String::new(),
            start: r.week_start.format("%Y-%m-%d").to_string(),
            primary: String::new(),
            secondary: String::new(),
            notas: String::new(),
            detail_total: None,
            is_current: r.week_start <= today && today <= r.week_end,
            is_future: r.week_start > today,
        });
        entry.id = Some(r.id);
        entry.label = r.week_label.clone();
        entry.primary = primary.unit.format(r.primary_value);
        entry.secondary = secondary.unit.format(r.secondary_value);
        entry.notas = r.notas.clone();
        entry.detail_total = detail_totals
            .get(&r.id)
            .map(|total| MetricUnit::Currency.format(*total));
    }

    let totals = match (weeks.first(), weeks.last()) {
        (Some(first), Some(last)) => DateRange::new(first.start, last.end)
            .map(|range| totals_in_range(&stored, &range))
            .unwrap_or_default(),
        _ => Default::default(),
    };

    let ctx = PageContext::build(&session, &user, &config.app_name, &kind.path());
    let tmpl = ReportYearTemplate {
        ctx,
        kind_slug: kind.slug().to_string(),
        kind_title: kind.title().to_string(),
        year,
        prev_year: clamp_year(year - 1),
        next_year: clamp_year(year + 1),
        primary_label: primary.label.to_string(),
        secondary_label: secondary.label.to_string(),
        rows: rows.into_values().collect(),
        total_primary: primary.unit.format(totals.primary),
        total_secondary: secondary.unit.format(totals.secondary),
        can_edit: user.can(Capability::EditReports(kind)),
        can_delete: user.can(Capability::DeleteReports),
        has_details: kind.has_details(),
    };
    render(tmpl)
}

#[derive(Deserialize)]
pub struct GenerateForm {
    pub year: i32,
    pub csrf_token: String,
}

/// Owners and admins may bootstrap a year of empty weeks.
fn can_generate(user: &session::SessionUser, kind: ReportKind) -> bool {
    user.can(Capability::EditReports(kind)) || user.role.is_admin()
}

/// POST /reportes/{kind}/generar
pub async fn generate(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<GenerateForm>,
) -> Result<HttpResponse, AppError> {
    let kind = parse_kind(&path)?;
    let user = session::current_user(&session)?;
    if !can_generate(&user, kind) {
        return Err(AppError::PermissionDenied(format!("generate weeks for {kind}")));
    }
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let year = clamp_year(form.year);
    let weeks = generate_weeks_for_year(year, config.week_anchor);
    match weekly::seed_weeks(&pool, kind, &weeks).await {
        Ok(0) => session::set_flash(&session, &format!("Todas las semanas de {year} ya existían")),
        Ok(n) => session::set_flash(&session, &format!("Se generaron {n} semanas para {year}")),
        Err(e) => {
            log::error!("Seeding {} weeks for {} failed: {}", kind, year, e);
            session::set_flash(&session, "No se pudieron generar las semanas");
        }
    }
    Ok(redirect(&year_url(kind, year)))
}
