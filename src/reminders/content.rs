use crate::auth::roles::Role;

/// Fixed text of one reminder email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderContent {
    pub subject: &'static str,
    pub headline: &'static str,
    pub intro: &'static str,
    pub checklist: &'static [&'static str],
}

const GENERIC: ReminderContent = ReminderContent {
    subject: "Recordatorio semanal de TopMarket",
    headline: "Tu reporte semanal",
    intro: "Es momento de revisar y actualizar la información de esta semana en el tablero.",
    checklist: &["Ingresa al tablero", "Revisa los datos de la semana actual"],
};

/// One template per role, plus the generic one for unknown roles.
pub fn content_for(role: Option<Role>) -> ReminderContent {
    let Some(role) = role else {
        return GENERIC;
    };
    match role {
        Role::Admin => ReminderContent {
            subject: "Resumen semanal: revisa los reportes del equipo",
            headline: "Revisión semanal de reportes",
            intro: "Los equipos ya deberían haber cargado sus cifras de la semana.",
            checklist: &[
                "Revisa el resumen anual por área",
                "Confirma que cada área completó la semana actual",
                "Consulta el historial si necesitas comparar periodos",
            ],
        },
        Role::Ventas => ReminderContent {
            subject: "Recordatorio: registra tus leads y cierres de la semana",
            headline: "Reporte semanal de ventas",
            intro: "Actualiza los leads trabajados y los cierres de esta semana.",
            checklist: &[
                "Número de leads de la semana",
                "Número de cierres",
                "Detalle de cada venta cerrada (fecha, monto, descripción)",
            ],
        },
        Role::Pxr => ReminderContent {
            subject: "Recordatorio: registra tus colocaciones PXR",
            headline: "Reporte semanal PXR",
            intro: "Registra las colocaciones PXR y la facturación de esta semana.",
            checklist: &["Colocaciones PXR cerradas", "Facturación asociada"],
        },
        Role::Hh => ReminderContent {
            subject: "Recordatorio: registra tus colocaciones HH",
            headline: "Reporte semanal HH",
            intro: "Registra las colocaciones HH y la facturación de esta semana.",
            checklist: &["Colocaciones HH cerradas", "Facturación asociada"],
        },
        Role::Cobranza => ReminderContent {
            subject: "Recordatorio: actualiza la cobranza de la semana",
            headline: "Reporte semanal de cobranza",
            intro: "Registra lo cobrado esta semana y las facturas que siguen pendientes.",
            checklist: &["Monto cobrado", "Facturas pendientes de cobro"],
        },
        Role::Gastos => ReminderContent {
            subject: "Recordatorio: registra los gastos de tarjeta",
            headline: "Reporte semanal de gastos",
            intro: "Registra los cargos de tarjeta de la semana y sus comprobantes.",
            checklist: &["Monto total en tarjeta", "Número de comprobantes entregados"],
        },
    }
}
