//! Aggregation tests for the admin overview and history views.

use chrono::{NaiveDate, Utc};

use topmarket::calendar::DateRange;
use topmarket::models::report_kind::ReportKind;
use topmarket::models::summary::{history_rows, monthly_buckets, summarize_kind, totals_in_range};
use topmarket::models::weekly::WeeklyReport;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn report(id: i64, start: NaiveDate, primary: f64, secondary: f64) -> WeeklyReport {
    WeeklyReport {
        id,
        week_label: format!("Semana {id}"),
        week_start: start,
        week_end: start + chrono::Duration::days(6),
        primary_value: primary,
        secondary_value: secondary,
        notas: String::new(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_totals_only_count_rows_starting_in_range() {
    let rows = vec![
        report(1, d(2024, 12, 30), 100.0, 1.0),
        report(2, d(2025, 1, 6), 10.0, 2.0),
        report(3, d(2025, 1, 13), 5.0, 3.0),
    ];
    let totals = totals_in_range(&rows, &DateRange::year(2025).expect("year"));
    assert_eq!(totals.primary, 15.0);
    assert_eq!(totals.secondary, 5.0);
    assert_eq!(totals.weeks, 2);
}

#[test]
fn test_monthly_buckets_scale_bars_to_largest_month() {
    let rows = vec![
        report(1, d(2025, 1, 6), 10.0, 0.0),
        report(2, d(2025, 1, 27), 10.0, 0.0),
        report(3, d(2025, 3, 3), 5.0, 0.0),
        // a week starting in the previous year is ignored
        report(4, d(2024, 12, 30), 99.0, 0.0),
    ];
    let months = monthly_buckets(&rows, 2025);
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].label, "Enero");
    assert_eq!(months[0].primary, 20.0);
    assert_eq!(months[0].bar_pct, 100);
    assert_eq!(months[1].bar_pct, 0);
    assert_eq!(months[2].bar_pct, 25);
}

#[test]
fn test_monthly_buckets_all_zero_without_rows() {
    let months = monthly_buckets(&[], 2025);
    assert!(months.iter().all(|m| m.primary == 0.0 && m.bar_pct == 0));
}

#[test]
fn test_summarize_kind_keeps_current_row_from_another_year() {
    let rows = vec![
        report(1, d(2025, 1, 6), 1.0, 0.0),
        report(2, d(2025, 1, 13), 2.0, 0.0),
    ];
    let straddling = report(9, d(2024, 12, 30), 7.0, 0.0);
    let summary = summarize_kind(ReportKind::Ventas, &rows, 2025, Some(straddling));
    assert_eq!(summary.current.map(|r| r.id), Some(9));
    assert_eq!(summary.totals.primary, 3.0);

    let none = summarize_kind(ReportKind::Ventas, &rows, 2025, None);
    assert!(none.current.is_none());
}

#[test]
fn test_history_rows_merge_kinds_by_week() {
    let per_kind = vec![
        (ReportKind::Ventas, vec![report(1, d(2025, 1, 13), 4.0, 1.0)]),
        (
            ReportKind::Gastos,
            vec![report(7, d(2025, 1, 6), 300.0, 2.0), report(8, d(2025, 1, 13), 50.0, 1.0)],
        ),
    ];
    let rows = history_rows(&per_kind);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].week_start, d(2025, 1, 6));
    assert_eq!(rows[0].values[0], None);
    assert_eq!(rows[0].values[4], Some((300.0, 2.0)));
    assert_eq!(rows[1].values[0], Some((4.0, 1.0)));
    assert_eq!(rows[1].values.len(), ReportKind::ALL.len());
}
