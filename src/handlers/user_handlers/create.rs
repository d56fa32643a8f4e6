use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::roles::Capability;
use crate::auth::session::{self, SessionUser, require};
use crate::auth::{csrf, password};
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::models::user::{self, NewUser, UserForm};
use crate::templates_structs::{PageContext, UserFormTemplate, UserFormValues};
use super::helpers;

fn create_form(
    session: &Session,
    current: &SessionUser,
    config: &AppConfig,
    values: UserFormValues,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, current, &config.app_name, "/usuarios");
    let role_options = helpers::role_options(&values.role);
    render(UserFormTemplate {
        ctx,
        form_action: "/usuarios".to_string(),
        form_title: "Nuevo usuario".to_string(),
        is_edit: false,
        values,
        role_options,
        errors,
    })
}

/// GET /usuarios/nuevo
pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;
    create_form(&session, &current, &config, UserFormValues::blank(), vec![])
}

/// POST /usuarios
pub async fn create(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let role = match helpers::validate_user_form(&form, true) {
        Ok(role) => role,
        Err(errors) => {
            return create_form(&session, &current, &config, UserFormValues::from_form(&form), errors);
        }
    };

    let new = NewUser {
        email: form.email.trim().to_string(),
        nombre: form.nombre.trim().to_string(),
        role,
        password_hash: password::hash_password(&form.password)?,
        recibe_recordatorios: form.recibe_recordatorios.is_some(),
    };

    match user::create(&pool, &new).await {
        Ok(id) => {
            log::info!("{} created user {} ({}, {})", current.email, id, new.email, role);
            session::set_flash(&session, &format!("Usuario {} creado", new.email));
            Ok(redirect("/usuarios"))
        }
        Err(e) => {
            log::warn!("Creating user {} failed: {}", new.email, e);
            let errors = vec![helpers::write_error_message(&e)];
            create_form(&session, &current, &config, UserFormValues::from_form(&form), errors)
        }
    }
}
