pub mod admin_handlers;
pub mod api_v1;
pub mod auth_handlers;
pub mod history_handlers;
pub mod reminder_handlers;
pub mod report_handlers;
pub mod user_handlers;

use actix_web::{web, HttpResponse};

use crate::auth;
use crate::errors::redirect;

/// Register every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        // Cron trigger authenticates with its own bearer token
        .route("/api/recordatorios", web::get().to(reminder_handlers::trigger))
        .route("/api/recordatorios", web::post().to(reminder_handlers::trigger))
        .route("/", web::get().to(|| async { redirect("/dashboard") }))
        // Protected routes
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/dashboard", web::get().to(auth_handlers::dashboard))
                .route("/logout", web::post().to(auth_handlers::logout))
                // Ventas line items, before the generic /reportes/{kind}/{id} routes
                .route("/reportes/ventas/{id}/detalles.csv", web::get().to(report_handlers::export_csv))
                .route("/reportes/ventas/{id}/detalles", web::post().to(report_handlers::create_detail))
                .route("/reportes/ventas/{id}/detalles/{detalle_id}", web::post().to(report_handlers::update_detail))
                .route("/reportes/ventas/{id}/detalles/{detalle_id}/eliminar", web::post().to(report_handlers::delete_detail))
                // Weekly reports
                .route("/reportes/{kind}", web::get().to(report_handlers::year_view))
                .route("/reportes/{kind}/generar", web::post().to(report_handlers::generate))
                .route("/reportes/{kind}/semanas/{week_start}", web::get().to(report_handlers::week_form))
                .route("/reportes/{kind}/semanas/{week_start}", web::post().to(report_handlers::save_week))
                .route("/reportes/{kind}/{id}/eliminar", web::post().to(report_handlers::delete))
                // Admin
                .route("/admin", web::get().to(admin_handlers::overview))
                .route("/admin/ver-como", web::post().to(admin_handlers::view_as))
                .route("/admin/ver-como/salir", web::post().to(admin_handlers::stop_view_as))
                .route("/admin/recordatorios", web::post().to(admin_handlers::send_reminders))
                .route("/historial", web::get().to(history_handlers::history))
                // Users: /usuarios/nuevo BEFORE /usuarios/{id}
                .route("/usuarios", web::get().to(user_handlers::list))
                .route("/usuarios/nuevo", web::get().to(user_handlers::new_form))
                .route("/usuarios", web::post().to(user_handlers::create))
                .route("/usuarios/{id}/editar", web::get().to(user_handlers::edit_form))
                .route("/usuarios/{id}", web::post().to(user_handlers::update))
                .route("/usuarios/{id}/eliminar", web::post().to(user_handlers::delete))
                // JSON API
                .service(web::scope("/api/v1").configure(api_v1::configure)),
        );
}

/// Fallback for unknown paths.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}
