use super::types::VentaDetalle;

pub const CSV_HEADER: &str = "Fecha,Monto,Detalles";

/// Only the free-text column is quoted.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Header line followed by one line per row, joined with `\n`.
pub fn to_csv(rows: &[VentaDetalle]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for row in rows {
        lines.push(format!(
            "{},{},{}",
            row.fecha.format("%Y-%m-%d"),
            row.monto,
            quote(&row.detalles),
        ));
    }
    lines.join("\n")
}
