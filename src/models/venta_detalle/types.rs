use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::validate;
use crate::models::report_kind::MetricUnit;

/// A closed sale belonging to one weekly Ventas row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VentaDetalle {
    pub id: i64,
    pub venta_id: i64,
    pub fecha: NaiveDate,
    pub monto: f64,
    pub detalles: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVentaDetalle {
    pub fecha: NaiveDate,
    pub monto: f64,
    pub detalles: String,
}

/// Form data for adding or editing a detail row.
#[derive(Debug, Deserialize)]
pub struct VentaDetalleForm {
    pub fecha: String,
    pub monto: String,
    #[serde(default)]
    pub detalles: String,
    pub csrf_token: String,
}

impl VentaDetalleForm {
    pub fn parse(&self) -> Result<NewVentaDetalle, Vec<String>> {
        let mut errors = vec![];

        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d")
            .map_err(|_| errors.push("Fecha debe tener el formato AAAA-MM-DD".to_string()))
            .ok();
        let monto = validate::parse_metric(&self.monto, "Monto", MetricUnit::Currency)
            .map_err(|e| errors.push(e))
            .ok();
        errors.extend(validate::validate_optional(&self.detalles, "Detalles", 500));

        match (fecha, monto) {
            (Some(fecha), Some(monto)) if errors.is_empty() => Ok(NewVentaDetalle {
                fecha,
                monto,
                detalles: self.detalles.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}
