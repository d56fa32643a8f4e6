use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// How a metric is entered and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricUnit {
    /// Whole, non-negative number.
    Count,
    /// Non-negative amount, two decimals.
    Currency,
}

impl MetricUnit {
    pub fn format(&self, value: f64) -> String {
        match self {
            MetricUnit::Count => format!("{value:.0}"),
            MetricUnit::Currency => format!("${value:.2}"),
        }
    }

    /// HTML `step` attribute for the input field.
    pub fn input_step(&self) -> &'static str {
        match self {
            MetricUnit::Count => "1",
            MetricUnit::Currency => "0.01",
        }
    }
}

/// One numeric column of a weekly table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub unit: MetricUnit,
}

/// The weekly report tables. Table and column names are fixed here and only
/// ever interpolated into SQL from these constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Ventas,
    Pxr,
    Hh,
    Cobranza,
    Gastos,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Ventas,
        ReportKind::Pxr,
        ReportKind::Hh,
        ReportKind::Cobranza,
        ReportKind::Gastos,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Ventas => "ventas",
            ReportKind::Pxr => "pxr",
            ReportKind::Hh => "hh",
            ReportKind::Cobranza => "cobranza",
            ReportKind::Gastos => "gastos",
        }
    }

    pub fn table(&self) -> &'static str {
        self.slug()
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Ventas => "Ventas",
            ReportKind::Pxr => "Colocaciones PXR",
            ReportKind::Hh => "Colocaciones HH",
            ReportKind::Cobranza => "Cobranza",
            ReportKind::Gastos => "Gastos de tarjeta",
        }
    }

    pub fn metrics(&self) -> [MetricSpec; 2] {
        use MetricUnit::{Count, Currency};
        match self {
            ReportKind::Ventas => [
                MetricSpec { column: "leads", label: "Leads", unit: Count },
                MetricSpec { column: "cierres", label: "Cierres", unit: Count },
            ],
            ReportKind::Pxr | ReportKind::Hh => [
                MetricSpec { column: "colocaciones", label: "Colocaciones", unit: Count },
                MetricSpec { column: "facturacion", label: "Facturación", unit: Currency },
            ],
            ReportKind::Cobranza => [
                MetricSpec { column: "monto_cobrado", label: "Monto cobrado", unit: Currency },
                MetricSpec { column: "facturas_pendientes", label: "Facturas pendientes", unit: Count },
            ],
            ReportKind::Gastos => [
                MetricSpec { column: "monto_tarjeta", label: "Monto en tarjeta", unit: Currency },
                MetricSpec { column: "comprobantes", label: "Comprobantes", unit: Count },
            ],
        }
    }

    pub fn primary(&self) -> MetricSpec {
        self.metrics()[0]
    }

    pub fn secondary(&self) -> MetricSpec {
        self.metrics()[1]
    }

    /// Only Ventas rows own detail rows.
    pub fn has_details(&self) -> bool {
        matches!(self, ReportKind::Ventas)
    }

    pub fn path(&self) -> String {
        format!("/reportes/{}", self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("unknown report kind '{s}'"))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
