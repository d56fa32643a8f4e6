// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::roles::{Capability, Role};
use crate::auth::session::{SessionUser, take_flash};
use crate::models::nav_item::{self, NavSidebarItem};

mod admin;
mod api;
mod common;
mod email;
mod report;
mod user;

pub use self::admin::{HistoryCell, HistoryColumn, HistoryLine, HistoryTemplate, KindCard, MonthBar, OverviewTemplate};
pub use self::api::{ApiCurrentWeek, ApiErrorResponse, ApiKindSummary, ApiOverview, ApiReportYear};
pub use self::common::LoginTemplate;
pub use self::email::ReminderEmailTemplate;
pub use self::report::{DetailRow, ReportYearTemplate, WeekFormTemplate, WeekRow};
pub use self::user::{UserFormTemplate, UserFormValues, UserListTemplate};

/// Entry of the admin "view as" selector.
pub struct RoleOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.nombre`, `ctx.sidebar_items`, etc.
pub struct PageContext {
    pub app_name: String,
    pub nombre: String,
    pub email: String,
    pub avatar_initial: String,
    pub role_label: String,
    pub effective_role_label: String,
    pub can_impersonate: bool,
    pub impersonating: bool,
    pub view_as_options: Vec<RoleOption>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, user: &SessionUser, app_name: &str, current_path: &str) -> Self {
        let display = if user.nombre.is_empty() { &user.email } else { &user.nombre };
        let avatar_initial = display.chars().next().unwrap_or('?').to_uppercase().to_string();
        let effective = user.effective_role();
        let can_impersonate = user.can(Capability::Impersonate);

        let view_as_options = if can_impersonate {
            Role::ALL
                .into_iter()
                .filter(|r| *r != Role::Admin)
                .map(|r| RoleOption {
                    slug: r.slug(),
                    label: r.label(),
                    selected: user.view_as == Some(r),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            app_name: app_name.to_string(),
            nombre: display.clone(),
            email: user.email.clone(),
            avatar_initial,
            role_label: user.role.label().to_string(),
            effective_role_label: effective.label().to_string(),
            can_impersonate,
            impersonating: user.is_impersonating(),
            view_as_options,
            sidebar_items: nav_item::sidebar_for(user, current_path),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
