use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::{self, require};
use crate::errors::{AppError, redirect};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::user;
use super::helpers::is_last_admin;

/// POST /usuarios/{id}/eliminar
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if id == current.id {
        session::set_flash(&session, "No puedes eliminar tu propia cuenta");
        return Ok(redirect("/usuarios"));
    }

    let Some(target) = user::find_display_by_id(&pool, id).await? else {
        session::set_flash(&session, "El usuario ya no existía");
        return Ok(redirect("/usuarios"));
    };

    if is_last_admin(&pool, &target).await? {
        session::set_flash(&session, "No se puede eliminar al último administrador");
        return Ok(redirect("/usuarios"));
    }

    match user::delete(&pool, id).await {
        Ok(_) => {
            log::info!("{} deleted user {} ({})", current.email, id, target.email);
            session::set_flash(&session, &format!("Usuario {} eliminado", target.email));
        }
        Err(e) => {
            log::error!("Deleting user {} failed: {}", id, e);
            session::set_flash(&session, "Error al eliminar el usuario");
        }
    }
    Ok(redirect("/usuarios"))
}
