use serde::Serialize;

use crate::calendar::Week;
use crate::models::report_kind::{MetricSpec, ReportKind};
use crate::models::summary::KindSummary;
use crate::models::weekly::WeeklyReport;

/// GET /api/v1/semanas/actual
#[derive(Serialize, Debug)]
pub struct ApiCurrentWeek {
    pub today: String,
    pub anchor: String,
    pub week: Week,
    pub label: String,
    pub range_label: String,
}

/// One kind's rows for a year, with the metric names so clients can label them.
#[derive(Serialize, Debug)]
pub struct ApiReportYear {
    pub kind: ReportKind,
    pub year: i32,
    pub metrics: [MetricSpec; 2],
    pub rows: Vec<WeeklyReport>,
}

#[derive(Serialize, Debug)]
pub struct ApiKindSummary {
    pub kind: ReportKind,
    pub title: &'static str,
    pub metrics: [MetricSpec; 2],
    pub total_primary: f64,
    pub total_secondary: f64,
    pub weeks_reported: usize,
    pub current: Option<WeeklyReport>,
}

impl From<KindSummary> for ApiKindSummary {
    fn from(s: KindSummary) -> Self {
        ApiKindSummary {
            kind: s.kind,
            title: s.kind.title(),
            metrics: s.kind.metrics(),
            total_primary: s.totals.primary,
            total_secondary: s.totals.secondary,
            weeks_reported: s.totals.weeks,
            current: s.current,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiOverview {
    pub year: i32,
    pub kinds: Vec<ApiKindSummary>,
}

#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: &str) -> Self {
        Self { error: error.to_string(), details: None }
    }
}
