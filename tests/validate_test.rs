//! Input validation tests for metric values, weekly forms, and detail rows.

use topmarket::auth::validate;
use topmarket::models::report_kind::{MetricUnit, ReportKind};
use topmarket::models::venta_detalle::VentaDetalleForm;
use topmarket::models::weekly::WeeklyReportForm;

fn weekly_form(primary: &str, secondary: &str, notas: &str) -> WeeklyReportForm {
    WeeklyReportForm {
        primary_value: primary.to_string(),
        secondary_value: secondary.to_string(),
        notas: notas.to_string(),
        csrf_token: "t".to_string(),
    }
}

#[test]
fn test_parse_metric_empty_is_zero() {
    assert_eq!(validate::parse_metric("", "Leads", MetricUnit::Count), Ok(0.0));
    assert_eq!(validate::parse_metric("   ", "Monto", MetricUnit::Currency), Ok(0.0));
}

#[test]
fn test_parse_metric_currency_strips_symbols_and_rounds() {
    assert_eq!(validate::parse_metric("$1,234.567", "Monto", MetricUnit::Currency), Ok(1234.57));
    assert_eq!(validate::parse_metric("15000", "Monto", MetricUnit::Currency), Ok(15000.0));
}

#[test]
fn test_parse_metric_rejects_negative_and_garbage() {
    assert!(validate::parse_metric("-1", "Leads", MetricUnit::Count).is_err());
    assert!(validate::parse_metric("abc", "Leads", MetricUnit::Count).is_err());
    assert!(validate::parse_metric("NaN", "Monto", MetricUnit::Currency).is_err());
    assert!(validate::parse_metric("inf", "Monto", MetricUnit::Currency).is_err());
}

#[test]
fn test_parse_metric_counts_must_be_whole() {
    assert_eq!(validate::parse_metric("12", "Leads", MetricUnit::Count), Ok(12.0));
    let err = validate::parse_metric("2.5", "Leads", MetricUnit::Count).unwrap_err();
    assert!(err.contains("entero"), "{err}");
}

#[test]
fn test_weekly_form_uses_kind_metrics() {
    let values = weekly_form("3", "1,500.50", " buena semana ")
        .parse(ReportKind::Pxr)
        .expect("valid");
    assert_eq!(values.primary, 3.0);
    assert_eq!(values.secondary, 1500.5);
    assert_eq!(values.notas, "buena semana");

    // facturacion is currency for PXR, but cierres is a count for Ventas
    assert!(weekly_form("3", "1.5", "").parse(ReportKind::Ventas).is_err());
}

#[test]
fn test_weekly_form_collects_every_error() {
    let errors = weekly_form("-1", "x", &"n".repeat(2001))
        .parse(ReportKind::Cobranza)
        .unwrap_err();
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn test_venta_detalle_form() {
    let form = VentaDetalleForm {
        fecha: "2025-04-30".to_string(),
        monto: "15000".to_string(),
        detalles: "Cliente ACME".to_string(),
        csrf_token: "t".to_string(),
    };
    let new = form.parse().expect("valid");
    assert_eq!(new.monto, 15000.0);
    assert_eq!(new.detalles, "Cliente ACME");

    let bad = VentaDetalleForm {
        fecha: "30/04/2025".to_string(),
        monto: "-5".to_string(),
        detalles: String::new(),
        csrf_token: "t".to_string(),
    };
    assert_eq!(bad.parse().unwrap_err().len(), 2);
}

#[test]
fn test_email_and_password_rules() {
    assert!(validate::validate_email("ana@topmarket.mx").is_none());
    assert!(validate::validate_email("ana").is_some());
    assert!(validate::validate_email("").is_some());
    assert!(validate::validate_password("12345678").is_none());
    assert!(validate::validate_password("short").is_some());
}
