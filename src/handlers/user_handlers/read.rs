use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::roles::Capability;
use crate::auth::session::require;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::user;
use crate::templates_structs::{PageContext, UserFormTemplate, UserFormValues};
use super::helpers;

/// GET /usuarios/{id}/editar
pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;
    let id = path.into_inner();

    let target = user::find_display_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &current, &config.app_name, "/usuarios");
    render(UserFormTemplate {
        ctx,
        form_action: format!("/usuarios/{id}"),
        form_title: format!("Editar {}", target.email),
        is_edit: true,
        role_options: helpers::role_options(&target.role),
        values: UserFormValues::from_user(&target),
        errors: vec![],
    })
}
