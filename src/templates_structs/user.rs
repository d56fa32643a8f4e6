use askama::Template;

use crate::models::user::{UserDisplay, UserForm};
use super::{PageContext, RoleOption};

#[derive(Template)]
#[template(path = "users/list.html")]
pub struct UserListTemplate {
    pub ctx: PageContext,
    pub users: Vec<UserDisplay>,
    pub current_user_id: i64,
}

/// Values shown in the user form, either from the stored row or from a
/// rejected submission.
pub struct UserFormValues {
    pub email: String,
    pub nombre: String,
    pub role: String,
    pub activo: bool,
    pub recibe_recordatorios: bool,
}

impl UserFormValues {
    pub fn blank() -> Self {
        Self {
            email: String::new(),
            nombre: String::new(),
            role: String::new(),
            activo: true,
            recibe_recordatorios: true,
        }
    }

    pub fn from_user(user: &UserDisplay) -> Self {
        Self {
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            role: user.role.clone(),
            activo: user.activo,
            recibe_recordatorios: user.recibe_recordatorios,
        }
    }

    pub fn from_form(form: &UserForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            nombre: form.nombre.trim().to_string(),
            role: form.role.clone(),
            activo: form.activo.is_some(),
            recibe_recordatorios: form.recibe_recordatorios.is_some(),
        }
    }
}

#[derive(Template)]
#[template(path = "users/form.html")]
pub struct UserFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub is_edit: bool,
    pub values: UserFormValues,
    pub role_options: Vec<RoleOption>,
    pub errors: Vec<String>,
}
