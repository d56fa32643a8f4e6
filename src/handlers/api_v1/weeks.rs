use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::current_user;
use crate::calendar::week_for_date;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::report_handlers::today;
use crate::templates_structs::ApiCurrentWeek;

/// GET /api/v1/semanas/actual - the reporting week containing today
pub async fn current(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    current_user(&session)?;

    let today = today();
    let week = week_for_date(today, config.week_anchor)
        .ok_or_else(|| AppError::BadRequest(format!("No reporting week contains {today}")))?;
    Ok(HttpResponse::Ok().json(ApiCurrentWeek {
        today: today.format("%Y-%m-%d").to_string(),
        anchor: config.week_anchor.to_string(),
        label: week.label(),
        range_label: week.range().label(),
        week,
    }))
}
