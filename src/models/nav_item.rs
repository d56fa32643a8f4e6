use crate::auth::roles::Capability;
use crate::auth::session::SessionUser;
use crate::models::report_kind::ReportKind;

pub struct NavSidebarItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

/// Sidebar entries the user may open, in display order. The longest matching
/// URL prefix of `current_path` is marked active.
pub fn sidebar_for(user: &SessionUser, current_path: &str) -> Vec<NavSidebarItem> {
    let mut entries: Vec<(String, String)> = Vec::new();

    if user.can(Capability::ViewOverview) {
        entries.push(("Resumen".to_string(), "/admin".to_string()));
    }
    for kind in ReportKind::ALL {
        if user.can(Capability::ViewReports(kind)) {
            entries.push((kind.title().to_string(), kind.path()));
        }
    }
    if user.can(Capability::ViewHistory) {
        entries.push(("Historial".to_string(), "/historial".to_string()));
    }
    if user.can(Capability::ManageUsers) {
        entries.push(("Usuarios".to_string(), "/usuarios".to_string()));
    }

    let best_match_len = entries
        .iter()
        .filter(|(_, url)| current_path.starts_with(url.as_str()))
        .map(|(_, url)| url.len())
        .max()
        .unwrap_or(0);

    entries
        .into_iter()
        .map(|(label, url)| NavSidebarItem {
            is_active: url.len() == best_match_len && current_path.starts_with(url.as_str()),
            label,
            url,
        })
        .collect()
}
