use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::report_kind::ReportKind;

/// Something a role may do. Checked with [`Role::allows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewReports(ReportKind),
    EditReports(ReportKind),
    DeleteReports,
    ViewOverview,
    ViewHistory,
    ManageUsers,
    Impersonate,
    TriggerReminders,
}

const ADMIN_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Ventas),
    Capability::ViewReports(ReportKind::Pxr),
    Capability::ViewReports(ReportKind::Hh),
    Capability::ViewReports(ReportKind::Cobranza),
    Capability::ViewReports(ReportKind::Gastos),
    Capability::DeleteReports,
    Capability::ViewOverview,
    Capability::ViewHistory,
    Capability::ManageUsers,
    Capability::Impersonate,
    Capability::TriggerReminders,
];

const VENTAS_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Ventas),
    Capability::EditReports(ReportKind::Ventas),
];

const PXR_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Pxr),
    Capability::EditReports(ReportKind::Pxr),
];

const HH_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Hh),
    Capability::EditReports(ReportKind::Hh),
];

const COBRANZA_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Cobranza),
    Capability::EditReports(ReportKind::Cobranza),
];

const GASTOS_CAPS: &[Capability] = &[
    Capability::ViewReports(ReportKind::Gastos),
    Capability::EditReports(ReportKind::Gastos),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Ventas,
    Pxr,
    Hh,
    Cobranza,
    Gastos,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Ventas,
        Role::Pxr,
        Role::Hh,
        Role::Cobranza,
        Role::Gastos,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Ventas => "ventas",
            Role::Pxr => "pxr",
            Role::Hh => "hh",
            Role::Cobranza => "cobranza",
            Role::Gastos => "gastos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Ventas => "Ventas",
            Role::Pxr => "Reclutamiento PXR",
            Role::Hh => "Reclutamiento HH",
            Role::Cobranza => "Cobranza",
            Role::Gastos => "Gastos",
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN_CAPS,
            Role::Ventas => VENTAS_CAPS,
            Role::Pxr => PXR_CAPS,
            Role::Hh => HH_CAPS,
            Role::Cobranza => COBRANZA_CAPS,
            Role::Gastos => GASTOS_CAPS,
        }
    }

    pub fn allows(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }

    /// The report kind this role fills in, if any.
    pub fn owned_report(&self) -> Option<ReportKind> {
        match self {
            Role::Admin => None,
            Role::Ventas => Some(ReportKind::Ventas),
            Role::Pxr => Some(ReportKind::Pxr),
            Role::Hh => Some(ReportKind::Hh),
            Role::Cobranza => Some(ReportKind::Cobranza),
            Role::Gastos => Some(ReportKind::Gastos),
        }
    }

    pub fn home_path(&self) -> String {
        match self.owned_report() {
            Some(kind) => kind.path(),
            None => "/admin".to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.slug() == s)
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
