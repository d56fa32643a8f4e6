use askama::Template;

use super::PageContext;

pub struct MonthBar {
    pub label: String,
    pub value: String,
    pub pct: u32,
}

/// Overview card for one report kind.
pub struct KindCard {
    pub title: String,
    pub slug: String,
    pub primary_label: String,
    pub secondary_label: String,
    pub total_primary: String,
    pub total_secondary: String,
    pub weeks_reported: usize,
    pub current_label: String,
    pub current_primary: String,
    pub current_secondary: String,
    pub months: Vec<MonthBar>,
}

#[derive(Template)]
#[template(path = "admin/overview.html")]
pub struct OverviewTemplate {
    pub ctx: PageContext,
    pub year: i32,
    pub prev_year: i32,
    pub next_year: i32,
    pub today_label: String,
    pub cards: Vec<KindCard>,
}

pub struct HistoryColumn {
    pub title: String,
    pub primary_label: String,
    pub secondary_label: String,
}

pub struct HistoryCell {
    pub primary: String,
    pub secondary: String,
}

pub struct HistoryLine {
    pub week_label: String,
    pub cells: Vec<HistoryCell>,
}

#[derive(Template)]
#[template(path = "admin/history.html")]
pub struct HistoryTemplate {
    pub ctx: PageContext,
    pub desde: String,
    pub hasta: String,
    pub range_label: String,
    pub columns: Vec<HistoryColumn>,
    pub lines: Vec<HistoryLine>,
    pub totals: Vec<HistoryCell>,
    pub error: Option<String>,
}
