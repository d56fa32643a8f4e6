use crate::models::report_kind::MetricUnit;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("El correo es obligatorio".to_string());
    }
    if trimmed.len() > 254 {
        return Some("El correo debe tener como máximo 254 caracteres".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("El correo no es válido".to_string());
    }
    None
}

/// Validate a password: min 8 chars.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("La contraseña es obligatoria".to_string());
    }
    if password.chars().count() < 8 {
        return Some("La contraseña debe tener al menos 8 caracteres".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} es obligatorio"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} debe tener como máximo {max_len} caracteres"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} debe tener como máximo {max_len} caracteres"));
    }
    None
}

/// Parse a metric input. Empty means zero; values must be finite and
/// non-negative, and counts must be whole numbers.
pub fn parse_metric(value: &str, field_name: &str, unit: MetricUnit) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let normalized: String = trimmed.chars().filter(|c| *c != ',' && *c != '$').collect();
    let parsed: f64 = normalized
        .parse()
        .map_err(|_| format!("{field_name} debe ser un número"))?;
    if !parsed.is_finite() {
        return Err(format!("{field_name} debe ser un número"));
    }
    if parsed < 0.0 {
        return Err(format!("{field_name} no puede ser negativo"));
    }
    match unit {
        MetricUnit::Count if parsed.fract() != 0.0 => {
            Err(format!("{field_name} debe ser un número entero"))
        }
        MetricUnit::Count => Ok(parsed),
        MetricUnit::Currency => Ok((parsed * 100.0).round() / 100.0),
    }
}
