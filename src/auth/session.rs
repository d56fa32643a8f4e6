use actix_session::Session;

use crate::auth::roles::{Capability, Role};
use crate::errors::AppError;

const USER_ID: &str = "user_id";
const EMAIL: &str = "email";
const NOMBRE: &str = "nombre";
const ROLE: &str = "role";
const VIEW_AS: &str = "view_as";
const FLASH: &str = "flash";

/// The authenticated user as stored in the signed session cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub role: Role,
    /// Role an admin is currently viewing the app as.
    pub view_as: Option<Role>,
}

impl SessionUser {
    /// Role whose pages and edit rights apply right now.
    pub fn effective_role(&self) -> Role {
        match (self.role, self.view_as) {
            (Role::Admin, Some(viewed)) => viewed,
            (role, _) => role,
        }
    }

    pub fn is_impersonating(&self) -> bool {
        self.role.is_admin() && self.view_as.is_some_and(|r| r != Role::Admin)
    }

    /// Identity-bound capabilities follow the authenticated role; the rest
    /// follow the effective role.
    pub fn can(&self, cap: Capability) -> bool {
        match cap {
            Capability::DeleteReports
            | Capability::ManageUsers
            | Capability::Impersonate
            | Capability::TriggerReminders => self.role.allows(cap),
            Capability::ViewReports(_)
            | Capability::EditReports(_)
            | Capability::ViewOverview
            | Capability::ViewHistory => self.effective_role().allows(cap),
        }
    }
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID).unwrap_or(None)
}

fn get_string(session: &Session, key: &str) -> Result<String, AppError> {
    match session.get::<String>(key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(AppError::Session(format!("No {key} in session"))),
        Err(e) => Err(AppError::Session(format!("Session error: {e}"))),
    }
}

pub fn current_user(session: &Session) -> Result<SessionUser, AppError> {
    let id = get_user_id(session).ok_or_else(|| AppError::Session("Not logged in".to_string()))?;
    let email = get_string(session, EMAIL)?;
    let nombre = get_string(session, NOMBRE).unwrap_or_default();
    let role: Role = get_string(session, ROLE)?
        .parse()
        .map_err(AppError::Session)?;
    let view_as = session
        .get::<String>(VIEW_AS)
        .unwrap_or(None)
        .and_then(|s| s.parse::<Role>().ok());
    Ok(SessionUser { id, email, nombre, role, view_as })
}

/// Store a freshly authenticated user, dropping any previous session state.
pub fn sign_in(session: &Session, id: i64, email: &str, nombre: &str, role: Role) -> Result<(), AppError> {
    session.renew();
    session.remove(VIEW_AS);
    session
        .insert(USER_ID, id)
        .and_then(|_| session.insert(EMAIL, email))
        .and_then(|_| session.insert(NOMBRE, nombre))
        .and_then(|_| session.insert(ROLE, role.slug()))
        .map_err(|e| AppError::Session(format!("Failed to write session: {e}")))
}

/// Set or clear the impersonated role. Only admins may call this.
pub fn set_view_as(session: &Session, role: Option<Role>) -> Result<(), AppError> {
    match role {
        Some(r) if r != Role::Admin => session
            .insert(VIEW_AS, r.slug())
            .map_err(|e| AppError::Session(format!("Failed to write session: {e}"))),
        _ => {
            session.remove(VIEW_AS);
            Ok(())
        }
    }
}

pub fn set_flash(session: &Session, msg: &str) {
    let _ = session.insert(FLASH, msg);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}

/// Load the session user and check a capability; returns Err(AppError) if denied.
pub fn require(session: &Session, cap: Capability) -> Result<SessionUser, AppError> {
    let user = current_user(session)?;
    if user.can(cap) {
        Ok(user)
    } else {
        Err(AppError::PermissionDenied(format!("{cap:?}")))
    }
}
