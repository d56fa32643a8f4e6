use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::roles::Role;

/// Internal user struct for authentication, includes the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub role: String,
    pub password_hash: String,
    pub activo: bool,
}

impl User {
    /// `None` when the stored role string is not a known role.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Safe version for templates, no password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserDisplay {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub role: String,
    pub activo: bool,
    pub recibe_recordatorios: bool,
    pub created_at: DateTime<Utc>,
}

impl UserDisplay {
    pub fn role_label(&self) -> String {
        self.role
            .parse::<Role>()
            .map(|r| r.label().to_string())
            .unwrap_or_else(|_| format!("Desconocido ({})", self.role))
    }

    pub fn created_on(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// A reminder recipient. The role stays a raw string so unknown roles still
/// get the generic reminder.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RosterEntry {
    pub email: String,
    pub nombre: String,
    pub role: String,
}

/// New user data for creation.
pub struct NewUser {
    pub email: String,
    pub nombre: String,
    pub role: Role,
    pub password_hash: String,
    pub recibe_recordatorios: bool,
}

/// Changes from the edit form. `password_hash` is only set when a new
/// password was typed.
pub struct UserUpdate {
    pub email: String,
    pub nombre: String,
    pub role: Role,
    pub activo: bool,
    pub recibe_recordatorios: bool,
    pub password_hash: Option<String>,
}

/// Form data from create/edit user forms. Checkboxes are absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub email: String,
    pub nombre: String,
    pub role: String,
    #[serde(default)]
    pub password: String,
    pub activo: Option<String>,
    pub recibe_recordatorios: Option<String>,
    pub csrf_token: String,
}
