use sqlx::PgPool;

use crate::auth::roles::Role;
use crate::auth::validate;
use crate::errors::AppError;
use crate::models::user::{self, UserDisplay, UserForm};
use crate::templates_structs::RoleOption;

/// Validate user form data (used in both create and update flows).
/// Returns the parsed role when every field is valid.
pub fn validate_user_form(form: &UserForm, require_password: bool) -> Result<Role, Vec<String>> {
    let mut errors = vec![];
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.nombre, "Nombre", 100));
    if require_password || !form.password.is_empty() {
        errors.extend(validate::validate_password(&form.password));
    }
    let role = form.role.parse::<Role>();
    if role.is_err() {
        errors.push("Selecciona un rol válido".to_string());
    }
    match role {
        Ok(role) if errors.is_empty() => Ok(role),
        _ => Err(errors),
    }
}

/// Options for the role `<select>`, with the given slug preselected.
pub fn role_options(selected: &str) -> Vec<RoleOption> {
    Role::ALL
        .into_iter()
        .map(|r| RoleOption {
            slug: r.slug(),
            label: r.label(),
            selected: r.slug() == selected,
        })
        .collect()
}

/// True when `target` is the only active admin left.
pub async fn is_last_admin(pool: &PgPool, target: &UserDisplay) -> Result<bool, AppError> {
    if target.role != Role::Admin.slug() || !target.activo {
        return Ok(false);
    }
    Ok(user::count_admins(pool).await? <= 1)
}

/// Map a write failure to a form message; duplicate emails get their own.
pub fn write_error_message(e: &sqlx::Error) -> String {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            "Ya existe un usuario con ese correo".to_string()
        }
        _ => "No se pudo guardar el usuario".to_string(),
    }
}
