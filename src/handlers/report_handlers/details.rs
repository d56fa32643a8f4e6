use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use super::week_url;
use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::{self, require};
use crate::errors::{AppError, redirect};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::report_kind::ReportKind;
use crate::models::venta_detalle::{self, VentaDetalleForm};
use crate::models::weekly::{self, WeeklyReport};

async fn load_venta(pool: &PgPool, id: i64) -> Result<WeeklyReport, AppError> {
    weekly::find_by_id(pool, ReportKind::Ventas, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// POST /reportes/ventas/{id}/detalles
pub async fn create_detail(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<VentaDetalleForm>,
) -> Result<HttpResponse, AppError> {
    let user = require(&session, Capability::EditReports(ReportKind::Ventas))?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let venta = load_venta(&pool, path.into_inner()).await?;
    let back = week_url(ReportKind::Ventas, venta.week_start);

    let new = match form.parse() {
        Ok(new) => new,
        Err(errors) => {
            session::set_flash(&session, &errors.join(". "));
            return Ok(redirect(&back));
        }
    };

    match venta_detalle::create(&pool, venta.id, &new).await {
        Ok(id) => {
            log::info!("{} added venta detalle {} to {}", user.email, id, venta.week_label);
            session::set_flash(&session, "Venta agregada");
        }
        Err(e) => {
            log::error!("Creating venta detalle for {} failed: {}", venta.id, e);
            session::set_flash(&session, "No se pudo agregar la venta");
        }
    }
    Ok(redirect(&back))
}

/// POST /reportes/ventas/{id}/detalles/{detalle_id}
pub async fn update_detail(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<VentaDetalleForm>,
) -> Result<HttpResponse, AppError> {
    require(&session, Capability::EditReports(ReportKind::Ventas))?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let (venta_id, detalle_id) = path.into_inner();
    let venta = load_venta(&pool, venta_id).await?;
    let back = week_url(ReportKind::Ventas, venta.week_start);

    let new = match form.parse() {
        Ok(new) => new,
        Err(errors) => {
            session::set_flash(&session, &errors.join(". "));
            return Ok(redirect(&back));
        }
    };

    match venta_detalle::update(&pool, venta.id, detalle_id, &new).await {
        Ok(true) => session::set_flash(&session, "Venta actualizada"),
        Ok(false) => return Err(AppError::NotFound),
        Err(e) => {
            log::error!("Updating venta detalle {} failed: {}", detalle_id, e);
            session::set_flash(&session, "No se pudo actualizar la venta");
        }
    }
    Ok(redirect(&back))
}

/// POST /reportes/ventas/{id}/detalles/{detalle_id}/eliminar
pub async fn delete_detail(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require(&session, Capability::EditReports(ReportKind::Ventas))?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let (venta_id, detalle_id) = path.into_inner();
    let venta = load_venta(&pool, venta_id).await?;

    match venta_detalle::delete(&pool, venta.id, detalle_id).await {
        Ok(true) => session::set_flash(&session, "Venta eliminada"),
        Ok(false) => session::set_flash(&session, "La venta ya no existía"),
        Err(e) => {
            log::error!("Deleting venta detalle {} failed: {}", detalle_id, e);
            session::set_flash(&session, "Error al eliminar la venta");
        }
    }
    Ok(redirect(&week_url(ReportKind::Ventas, venta.week_start)))
}

/// GET /reportes/ventas/{id}/detalles.csv
pub async fn export_csv(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require(&session, Capability::ViewReports(ReportKind::Ventas))?;

    let venta = load_venta(&pool, path.into_inner()).await?;
    let rows = venta_detalle::find_by_venta(&pool, venta.id).await?;
    let csv = venta_detalle::csv::to_csv(&rows);

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"ventas-{}.csv\"", venta.week_start.format("%Y-%m-%d")),
        ))
        .body(csv))
}
