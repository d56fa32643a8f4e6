use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::roles::Capability;
use crate::auth::session::require;
use crate::calendar::{DateRange, monday_of};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::report_handlers::today;
use crate::models::report_kind::{MetricSpec, ReportKind};
use crate::models::summary::{self, HistoryRow};
use crate::templates_structs::{HistoryCell, HistoryColumn, HistoryLine, HistoryTemplate, PageContext};

/// Weeks shown when no range is given.
const DEFAULT_WEEKS: i64 = 12;

/// Longest range accepted, in days.
const MAX_RANGE_DAYS: i64 = 3 * 366;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Fecha inválida: {s}")),
    }
}

/// Resolve the query into a range; defaults to the last twelve weeks.
pub fn resolve_range(query: &HistoryQuery, today: NaiveDate) -> Result<DateRange, String> {
    let this_monday = monday_of(today).ok_or_else(|| format!("Fecha inválida: {today}"))?;
    let default_start = this_monday - Duration::weeks(DEFAULT_WEEKS - 1);
    let default_end = this_monday + Duration::days(6);

    let start = parse_date(query.desde.as_deref())?.unwrap_or(default_start);
    let end = parse_date(query.hasta.as_deref())?.unwrap_or(default_end);

    let range = DateRange::new(start, end)
        .ok_or_else(|| "La fecha inicial debe ser anterior a la final".to_string())?;
    if range.days() > MAX_RANGE_DAYS {
        return Err("El rango máximo es de tres años".to_string());
    }
    Ok(range)
}

fn cell(metrics: [MetricSpec; 2], values: Option<(f64, f64)>) -> HistoryCell {
    match values {
        Some((a, b)) => HistoryCell { primary: metrics[0].unit.format(a), secondary: metrics[1].unit.format(b) },
        None => HistoryCell { primary: "-".to_string(), secondary: "-".to_string() },
    }
}

fn lines_and_totals(rows: &[HistoryRow]) -> (Vec<HistoryLine>, Vec<HistoryCell>) {
    let lines = rows
        .iter()
        .map(|row| HistoryLine {
            week_label: row.week_label.clone(),
            cells: ReportKind::ALL
                .iter()
                .zip(&row.values)
                .map(|(kind, v)| cell(kind.metrics(), *v))
                .collect(),
        })
        .collect();

    let totals = ReportKind::ALL
        .iter()
        .enumerate()
        .map(|(slot, kind)| {
            let sum = rows
                .iter()
                .filter_map(|r| r.values[slot])
                .fold((0.0, 0.0), |(a, b), (x, y)| (a + x, b + y));
            cell(kind.metrics(), Some(sum))
        })
        .collect();

    (lines, totals)
}

/// GET /historial?desde=YYYY-MM-DD&hasta=YYYY-MM-DD
pub async fn history(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require(&session, Capability::ViewHistory)?;
    let today = today();

    let (range, error) = match resolve_range(&query, today) {
        Ok(range) => (Some(range), None),
        Err(msg) => (None, Some(msg)),
    };

    let rows = match &range {
        Some(range) => summary::history(&pool, range).await?,
        None => Vec::new(),
    };
    let (lines, totals) = lines_and_totals(&rows);

    let columns = ReportKind::ALL
        .iter()
        .map(|k| HistoryColumn {
            title: k.title().to_string(),
            primary_label: k.primary().label.to_string(),
            secondary_label: k.secondary().label.to_string(),
        })
        .collect();

    let ctx = PageContext::build(&session, &user, &config.app_name, "/historial");
    let tmpl = HistoryTemplate {
        ctx,
        desde: range.map(|r| r.start.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| query.desde.clone().unwrap_or_default()),
        hasta: range.map(|r| r.end.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| query.hasta.clone().unwrap_or_default()),
        range_label: range.map(|r| r.label()).unwrap_or_default(),
        columns,
        lines,
        totals,
        error,
    };
    render(tmpl)
}
