//! Reporting calendar: Monday-start weeks and structured date ranges.
//!
//! Every weekly table row carries its own `week_start`/`week_end` pair, so the
//! lookups here work on anything that exposes a closed date interval.

pub mod range;
pub mod week;

use chrono::NaiveDate;

pub use self::range::{DateRange, month_abbrev_es, month_name_es};
pub use self::week::{
    Week, WeekAnchor, find_current_week, first_week_start, generate_weeks_for_year, monday_of,
    week_for_date,
};

/// A closed `[start, end]` date interval.
pub trait DateSpan {
    fn span_start(&self) -> NaiveDate;
    fn span_end(&self) -> NaiveDate;

    fn contains_date(&self, date: NaiveDate) -> bool {
        self.span_start() <= date && date <= self.span_end()
    }
}
