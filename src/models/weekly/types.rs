use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate;
use crate::calendar::DateSpan;
use crate::models::report_kind::ReportKind;

/// One stored week of a report table. Metric columns are aliased to
/// `primary_value`/`secondary_value` so every table maps to this struct.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WeeklyReport {
    pub id: i64,
    pub week_label: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub primary_value: f64,
    pub secondary_value: f64,
    pub notas: String,
    pub updated_at: DateTime<Utc>,
}

impl DateSpan for WeeklyReport {
    fn span_start(&self) -> NaiveDate {
        self.week_start
    }

    fn span_end(&self) -> NaiveDate {
        self.week_end
    }
}

/// Validated values ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyValues {
    pub primary: f64,
    pub secondary: f64,
    pub notas: String,
}

/// Form data from the week editor.
#[derive(Debug, Deserialize)]
pub struct WeeklyReportForm {
    pub primary_value: String,
    pub secondary_value: String,
    #[serde(default)]
    pub notas: String,
    pub csrf_token: String,
}

impl WeeklyReportForm {
    /// Validate against the metric definitions of `kind`; collects every error.
    pub fn parse(&self, kind: ReportKind) -> Result<WeeklyValues, Vec<String>> {
        let [primary_spec, secondary_spec] = kind.metrics();
        let mut errors = vec![];

        let primary = validate::parse_metric(&self.primary_value, primary_spec.label, primary_spec.unit)
            .map_err(|e| errors.push(e))
            .ok();
        let secondary = validate::parse_metric(&self.secondary_value, secondary_spec.label, secondary_spec.unit)
            .map_err(|e| errors.push(e))
            .ok();
        errors.extend(validate::validate_optional(&self.notas, "Notas", 2000));

        match (primary, secondary) {
            (Some(primary), Some(secondary)) if errors.is_empty() => Ok(WeeklyValues {
                primary,
                secondary,
                notas: self.notas.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}
