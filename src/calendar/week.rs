use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use super::{DateRange, DateSpan};

/// Rule that picks the first reporting week of a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekAnchor {
    /// First Monday on or after January 1.
    #[default]
    FirstMonday,
    /// ISO week 1: the Monday on or before January 4.
    Iso,
}

impl FromStr for WeekAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "first-monday" | "first_monday" => Ok(WeekAnchor::FirstMonday),
            "iso" => Ok(WeekAnchor::Iso),
            other => Err(format!("unknown week anchor '{other}' (expected 'first-monday' or 'iso')")),
        }
    }
}

impl fmt::Display for WeekAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekAnchor::FirstMonday => write!(f, "first-monday"),
            WeekAnchor::Iso => write!(f, "iso"),
        }
    }
}

/// One Monday..Sunday reporting week, numbered from 1 within its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Week {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Week {
    /// `None` when the Sunday falls outside chrono's date range.
    pub fn starting(number: u32, start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_signed(Duration::days(6))?;
        Some(Self { number, start, end })
    }

    /// `Semana 2 (06/01/2025 - 12/01/2025)`
    pub fn label(&self) -> String {
        format!(
            "Semana {} ({} - {})",
            self.number,
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y"),
        )
    }

    pub fn range(&self) -> DateRange {
        DateRange { start: self.start, end: self.end }
    }
}

impl DateSpan for Week {
    fn span_start(&self) -> NaiveDate {
        self.start
    }

    fn span_end(&self) -> NaiveDate {
        self.end
    }
}

/// Start date of week 1 of `year` under the given anchor.
pub fn first_week_start(year: i32, anchor: WeekAnchor) -> Option<NaiveDate> {
    match anchor {
        WeekAnchor::FirstMonday => {
            let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let offset = (7 - jan1.weekday().num_days_from_monday()) % 7;
            jan1.checked_add_signed(Duration::days(i64::from(offset)))
        }
        WeekAnchor::Iso => NaiveDate::from_isoywd_opt(year, 1, Weekday::Mon),
    }
}

/// Year a week starting on `monday` is filed under.
fn reporting_year(monday: NaiveDate, anchor: WeekAnchor) -> i32 {
    match anchor {
        WeekAnchor::FirstMonday => monday.year(),
        WeekAnchor::Iso => monday.iso_week().year(),
    }
}

/// Consecutive weeks covering `year`, stopping once a week start leaves the year.
pub fn generate_weeks_for_year(year: i32, anchor: WeekAnchor) -> Vec<Week> {
    let Some(mut start) = first_week_start(year, anchor) else {
        return Vec::new();
    };

    let mut weeks = Vec::with_capacity(53);
    let mut number = 1;
    while reporting_year(start, anchor) == year {
        let Some(week) = Week::starting(number, start) else {
            break;
        };
        weeks.push(week);
        number += 1;
        match start.checked_add_signed(Duration::days(7)) {
            Some(next) => start = next,
            None => break,
        }
    }
    weeks
}

/// Index of the first entry whose closed interval contains `date`.
pub fn find_current_week<T: DateSpan>(weeks: &[T], date: NaiveDate) -> Option<usize> {
    weeks.iter().position(|w| w.contains_date(date))
}

pub fn monday_of(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
}

/// The reporting week containing `date`, numbered within the year it is filed under.
///
/// With the first-Monday anchor, January days before the first Monday belong to
/// the last week of the previous year. Dates at the edges of chrono's range,
/// where the week cannot be built, give `None`.
pub fn week_for_date(date: NaiveDate, anchor: WeekAnchor) -> Option<Week> {
    let monday = monday_of(date)?;
    let year = reporting_year(monday, anchor);
    let first = first_week_start(year, anchor)?;
    let number = u32::try_from((monday - first).num_days() / 7 + 1).ok()?;
    Week::starting(number, monday)
}
