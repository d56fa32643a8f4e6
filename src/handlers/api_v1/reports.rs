use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::roles::Capability;
use crate::auth::session::require;
use crate::calendar::generate_weeks_for_year;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::report_handlers::{clamp_year, today};
use crate::models::report_kind::ReportKind;
use crate::models::{summary, weekly};
use crate::templates_structs::{ApiErrorResponse, ApiKindSummary, ApiOverview, ApiReportYear};

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// GET /api/v1/reportes/{kind}?year= - stored rows for the reporting weeks of one area and year
pub async fn year(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, AppError> {
    let kind = match path.parse::<ReportKind>() {
        Ok(kind) => kind,
        Err(reason) => {
            return Ok(HttpResponse::NotFound().json(ApiErrorResponse {
                error: "Unknown report kind".to_string(),
                details: Some(reason),
            }));
        }
    };
    require(&session, Capability::ViewReports(kind))?;

    let year = clamp_year(query.year.unwrap_or_else(|| today().year()));
    let weeks = generate_weeks_for_year(year, config.week_anchor);
    let rows = weekly::find_for_weeks(&pool, kind, &weeks).await?;

    Ok(HttpResponse::Ok().json(ApiReportYear {
        kind,
        year,
        metrics: kind.metrics(),
        rows,
    }))
}

/// GET /api/v1/resumen?year= - yearly totals per area
pub async fn overview(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, AppError> {
    require(&session, Capability::ViewOverview)?;

    let today = today();
    let year = clamp_year(query.year.unwrap_or_else(|| today.year()));
    let kinds = summary::year_overview(&pool, year, today, config.week_anchor)
        .await?
        .into_iter()
        .map(ApiKindSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiOverview { year, kinds }))
}
