//! Aggregates over weekly rows for the admin overview and history views.
//!
//! Rows are bucketed by `week_start`: a week that straddles two months or two
//! years counts toward the period it starts in.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;

use crate::calendar::{DateRange, WeekAnchor, month_name_es, week_for_date};
use crate::models::report_kind::ReportKind;
use crate::models::weekly::{self, WeeklyReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub primary: f64,
    pub secondary: f64,
    pub weeks: usize,
}

/// Sums of both metrics over rows whose `week_start` falls in `range`.
pub fn totals_in_range(rows: &[WeeklyReport], range: &DateRange) -> Totals {
    rows.iter()
        .filter(|r| range.contains(r.week_start))
        .fold(Totals::default(), |acc, r| Totals {
            primary: acc.primary + r.primary_value,
            secondary: acc.secondary + r.secondary_value,
            weeks: acc.weeks + 1,
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    pub label: &'static str,
    pub primary: f64,
    pub secondary: f64,
    /// Width of the chart bar for `primary`, 0..=100, relative to the largest month.
    pub bar_pct: u32,
}

/// Twelve buckets for `year`; months without rows are zero.
pub fn monthly_buckets(rows: &[WeeklyReport], year: i32) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (1..=12)
        .map(|month| MonthBucket {
            month,
            label: month_name_es(month),
            primary: 0.0,
            secondary: 0.0,
            bar_pct: 0,
        })
        .collect();

    for row in rows.iter().filter(|r| r.week_start.year() == year) {
        let bucket = &mut buckets[row.week_start.month0() as usize];
        bucket.primary += row.primary_value;
        bucket.secondary += row.secondary_value;
    }

    let max = buckets.iter().map(|b| b.primary).fold(0.0_f64, f64::max);
    if max > 0.0 {
        for bucket in &mut buckets {
            bucket.bar_pct = ((bucket.primary / max) * 100.0).round() as u32;
        }
    }
    buckets
}

/// Totals for one report kind within a period, plus the current-week row if any.
#[derive(Debug, Clone, Serialize)]
pub struct KindSummary {
    pub kind: ReportKind,
    pub totals: Totals,
    pub current: Option<WeeklyReport>,
    pub months: Vec<MonthBucket>,
}

/// `current` is looked up separately: the week containing today may be filed
/// under another year than `rows`.
pub fn summarize_kind(
    kind: ReportKind,
    rows: &[WeeklyReport],
    year: i32,
    current: Option<WeeklyReport>,
) -> KindSummary {
    let totals = DateRange::year(year)
        .map(|range| totals_in_range(rows, &range))
        .unwrap_or_default();
    KindSummary {
        kind,
        totals,
        current,
        months: monthly_buckets(rows, year),
    }
}

/// Load every kind for `year` and summarize each, with the row of the week
/// containing `today`.
pub async fn year_overview(
    pool: &PgPool,
    year: i32,
    today: NaiveDate,
    anchor: WeekAnchor,
) -> Result<Vec<KindSummary>, sqlx::Error> {
    let Some(range) = DateRange::year(year) else {
        return Ok(Vec::new());
    };
    let this_week = week_for_date(today, anchor);
    let mut summaries = Vec::with_capacity(ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        let rows = weekly::find_in_range(pool, kind, &range).await?;
        let current = match &this_week {
            Some(week) => weekly::find_by_week_start(pool, kind, week.start).await?,
            None => None,
        };
        summaries.push(summarize_kind(kind, &rows, year, current));
    }
    Ok(summaries)
}

/// One line of the history table: a week start with each kind's values.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub week_label: String,
    /// Indexed like `ReportKind::ALL`; `None` where that kind has no row.
    pub values: Vec<Option<(f64, f64)>>,
}

/// Merge per-kind rows into one line per week start, oldest first.
pub fn history_rows(per_kind: &[(ReportKind, Vec<WeeklyReport>)]) -> Vec<HistoryRow> {
    let mut by_week: BTreeMap<NaiveDate, HistoryRow> = BTreeMap::new();

    for (kind, rows) in per_kind {
        let Some(slot) = ReportKind::ALL.iter().position(|k| k == kind) else {
            continue;
        };
        for row in rows {
            let entry = by_week.entry(row.week_start).or_insert_with(|| HistoryRow {
                week_start: row.week_start,
                week_end: row.week_end,
                week_label: row.week_label.clone(),
                values: vec![None; ReportKind::ALL.len()],
            });
            entry.values[slot] = Some((row.primary_value, row.secondary_value));
        }
    }

    by_week.into_values().collect()
}

/// Load all kinds for `range` and merge them into history rows.
pub async fn history(pool: &PgPool, range: &DateRange) -> Result<Vec<HistoryRow>, sqlx::Error> {
    let mut per_kind = Vec::with_capacity(ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        per_kind.push((kind, weekly::find_in_range(pool, kind, range).await?));
    }
    Ok(history_rows(&per_kind))
}
