use askama::Template;

use super::PageContext;

/// One line of a year table.
pub struct WeekRow {
    pub id: Option<i64>,
    pub label: String,
    /// `YYYY-MM-DD`, used in URLs.
    pub start: String,
    pub primary: String,
    pub secondary: String,
    pub notas: String,
    pub detail_total: Option<String>,
    pub is_current: bool,
    pub is_future: bool,
}

#[derive(Template)]
#[template(path = "reports/year.html")]
pub struct ReportYearTemplate {
    pub ctx: PageContext,
    pub kind_slug: String,
    pub kind_title: String,
    pub year: i32,
    pub prev_year: i32,
    pub next_year: i32,
    pub primary_label: String,
    pub secondary_label: String,
    pub rows: Vec<WeekRow>,
    pub total_primary: String,
    pub total_secondary: String,
    pub can_edit: bool,
    pub can_delete: bool,
    pub has_details: bool,
}

pub struct DetailRow {
    pub id: i64,
    pub fecha: String,
    /// Raw number for the edit input.
    pub monto: String,
    pub monto_display: String,
    pub detalles: String,
}

#[derive(Template)]
#[template(path = "reports/week.html")]
pub struct WeekFormTemplate {
    pub ctx: PageContext,
    pub kind_slug: String,
    pub kind_title: String,
    pub week_label: String,
    pub week_start: String,
    pub range_label: String,
    pub prev_week: String,
    pub next_week: String,
    pub report_id: Option<i64>,
    pub primary_label: String,
    pub secondary_label: String,
    pub primary_step: String,
    pub secondary_step: String,
    pub primary_value: String,
    pub secondary_value: String,
    pub notas: String,
    pub can_edit: bool,
    pub can_delete: bool,
    pub errors: Vec<String>,
    pub has_details: bool,
    pub details: Vec<DetailRow>,
    pub details_total: String,
}
