pub mod delete;
pub mod details;
pub mod list;
pub mod week;

use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::{Week, WeekAnchor, week_for_date};
use crate::errors::AppError;
use crate::models::report_kind::ReportKind;

pub use self::delete::delete;
pub use self::details::{create_detail, delete_detail, export_csv, update_detail};
pub use self::list::{generate, year_view};
pub use self::week::{save_week, week_form};

/// Unknown kinds in the URL are a 404, not a 400.
pub(crate) fn parse_kind(slug: &str) -> Result<ReportKind, AppError> {
    slug.parse().map_err(|_| AppError::NotFound)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn week_url(kind: ReportKind, week_start: NaiveDate) -> String {
    format!("{}/semanas/{}", kind.path(), week_start.format("%Y-%m-%d"))
}

pub(crate) fn year_url(kind: ReportKind, year: i32) -> String {
    format!("{}?year={}", kind.path(), year)
}

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// Accepted range for the `year` query parameter.
pub(crate) fn clamp_year(year: i32) -> i32 {
    year.clamp(MIN_YEAR, MAX_YEAR)
}

/// Week addressed by a `/semanas/{date}` path. Dates outside the accepted
/// years are a 404.
pub(crate) fn week_from_path(date: NaiveDate, anchor: WeekAnchor) -> Result<Week, AppError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(AppError::NotFound);
    }
    week_for_date(date, anchor).ok_or(AppError::NotFound)
}
