use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::DateSpan;

const MONTH_ABBREV_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

const MONTH_NAME_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

/// `month` is 1-based; out-of-range months yield an empty string.
pub fn month_abbrev_es(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREV_ES.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn month_name_es(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAME_ES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Closed date interval. Display labels are always derived from the dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_date(date)
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// `6 ene 2025 - 12 ene 2025`
    pub fn label(&self) -> String {
        format!("{} - {}", short_date_es(self.start), short_date_es(self.end))
    }
}

impl DateSpan for DateRange {
    fn span_start(&self) -> NaiveDate {
        self.start
    }

    fn span_end(&self) -> NaiveDate {
        self.end
    }
}

fn short_date_es(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_abbrev_es(date.month()), date.year())
}
