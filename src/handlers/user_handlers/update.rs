use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::roles::{Capability, Role};
use crate::auth::session::{self, SessionUser, require};
use crate::auth::{csrf, password};
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::models::user::{self, UserForm, UserUpdate};
use crate::templates_structs::{PageContext, UserFormTemplate, UserFormValues};
use super::helpers;

fn edit_form_with_errors(
    session: &Session,
    current: &SessionUser,
    config: &AppConfig,
    id: i64,
    form: &UserForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, current, &config.app_name, "/usuarios");
    render(UserFormTemplate {
        ctx,
        form_action: format!("/usuarios/{id}"),
        form_title: format!("Editar {}", form.email.trim()),
        is_edit: true,
        role_options: helpers::role_options(&form.role),
        values: UserFormValues::from_form(form),
        errors,
    })
}

/// POST /usuarios/{id}
pub async fn update(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let existing = user::find_display_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let role = match helpers::validate_user_form(&form, false) {
        Ok(role) => role,
        Err(errors) => return edit_form_with_errors(&session, &current, &config, id, &form, errors),
    };
    let activo = form.activo.is_some();

    // Last-admin protection: the only active admin keeps the role and stays active.
    if (role != Role::Admin || !activo) && helpers::is_last_admin(&pool, &existing).await? {
        let errors = vec!["No se puede quitar el rol al último administrador activo".to_string()];
        return edit_form_with_errors(&session, &current, &config, id, &form, errors);
    }

    let password_hash = if form.password.is_empty() {
        None
    } else {
        Some(password::hash_password(&form.password)?)
    };

    let changes = UserUpdate {
        email: form.email.trim().to_string(),
        nombre: form.nombre.trim().to_string(),
        role,
        activo,
        recibe_recordatorios: form.recibe_recordatorios.is_some(),
        password_hash,
    };

    match user::update(&pool, id, &changes).await {
        Ok(true) => {
            log::info!("{} updated user {} ({})", current.email, id, changes.email);
            session::set_flash(&session, "Usuario actualizado");
            Ok(redirect("/usuarios"))
        }
        Ok(false) => Err(AppError::NotFound),
        Err(e) => {
            log::warn!("Updating user {} failed: {}", id, e);
            let errors = vec![helpers::write_error_message(&e)];
            edit_form_with_errors(&session, &current, &config, id, &form, errors)
        }
    }
}
