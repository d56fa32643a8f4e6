//! Read-only JSON API used by scripts and the dashboard widgets.

pub mod reports;
pub mod weeks;

use actix_web::web;

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/semanas/actual", web::get().to(weeks::current))
        .route("/reportes/{kind}", web::get().to(reports::year))
        .route("/resumen", web::get().to(reports::overview));
}
