use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use sqlx::PgPool;

use super::{parse_kind, year_url};
use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::{self, require};
use crate::errors::{AppError, redirect};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::weekly;

/// POST /reportes/{kind}/{id}/eliminar
///
/// Admin only, after the confirm prompt.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<(String, i64)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let (slug, id) = path.into_inner();
    let kind = parse_kind(&slug)?;
    let user = require(&session, Capability::DeleteReports)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let row = weekly::find_by_id(&pool, kind, id)
        .await?
        .ok_or(AppError::NotFound)?;

    match weekly::delete(&pool, kind, id).await {
        Ok(true) => {
            log::info!("{} deleted {} row {} ({})", user.email, kind, id, row.week_label);
            session::set_flash(&session, &format!("Se eliminó {}", row.week_label));
        }
        Ok(false) => session::set_flash(&session, "La semana ya no existía"),
        Err(e) => {
            log::error!("Deleting {} row {} failed: {}", kind, id, e);
            session::set_flash(&session, "Error al eliminar la semana");
        }
    }
    Ok(redirect(&year_url(kind, row.week_start.year())))
}
