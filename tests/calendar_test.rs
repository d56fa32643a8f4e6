//! Reporting calendar tests: week generation under both anchors, current-week
//! lookup, and Spanish labels.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use topmarket::calendar::{
    DateRange, DateSpan, Week, WeekAnchor, find_current_week, first_week_start,
    generate_weeks_for_year, monday_of, week_for_date,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn test_first_week_start_first_monday_anchor() {
    assert_eq!(first_week_start(2025, WeekAnchor::FirstMonday), Some(d(2025, 1, 6)));
    // 2024 starts on a Monday
    assert_eq!(first_week_start(2024, WeekAnchor::FirstMonday), Some(d(2024, 1, 1)));
}

#[test]
fn test_first_week_start_iso_anchor() {
    assert_eq!(first_week_start(2025, WeekAnchor::Iso), Some(d(2024, 12, 30)));
    assert_eq!(first_week_start(2026, WeekAnchor::Iso), Some(d(2025, 12, 29)));
}

#[test]
fn test_generate_weeks_2025_first_monday() {
    let weeks = generate_weeks_for_year(2025, WeekAnchor::FirstMonday);
    assert_eq!(weeks[0].start, d(2025, 1, 6));
    assert_eq!(weeks[0].number, 1);
    assert_eq!(weeks.len(), 52);
    assert_eq!(weeks.last().map(|w| w.start), Some(d(2025, 12, 29)));
}

#[test]
fn test_generate_weeks_2025_iso() {
    let weeks = generate_weeks_for_year(2025, WeekAnchor::Iso);
    assert_eq!(weeks[0].start, d(2024, 12, 30));
    assert_eq!(weeks.len(), 52);
    assert_eq!(weeks.last().map(|w| w.start), Some(d(2025, 12, 22)));
}

#[test]
fn test_generate_weeks_53_week_years() {
    assert_eq!(generate_weeks_for_year(2024, WeekAnchor::FirstMonday).len(), 53);
    assert_eq!(generate_weeks_for_year(2026, WeekAnchor::Iso).len(), 53);
}

#[test]
fn test_generated_weeks_are_contiguous_monday_to_sunday() {
    for anchor in [WeekAnchor::FirstMonday, WeekAnchor::Iso] {
        for year in 2020..=2030 {
            let weeks = generate_weeks_for_year(year, anchor);
            assert!(!weeks.is_empty(), "{year} {anchor}");
            for (i, w) in weeks.iter().enumerate() {
                assert_eq!(w.start.weekday(), Weekday::Mon);
                assert_eq!(w.end.weekday(), Weekday::Sun);
                assert_eq!(w.end - w.start, Duration::days(6));
                assert_eq!(w.number as usize, i + 1);
            }
            for pair in weeks.windows(2) {
                assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
            }
        }
    }
}

#[test]
fn test_consecutive_years_do_not_overlap_or_gap() {
    for anchor in [WeekAnchor::FirstMonday, WeekAnchor::Iso] {
        for year in 2020..2030 {
            let this = generate_weeks_for_year(year, anchor);
            let next = generate_weeks_for_year(year + 1, anchor);
            let last = this.last().expect("weeks");
            assert_eq!(next[0].start, last.start + Duration::days(7), "{year} {anchor}");
        }
    }
}

#[test]
fn test_find_current_week_example() {
    let ranges = [
        DateRange { start: d(2025, 4, 21), end: d(2025, 4, 27) },
        DateRange { start: d(2025, 4, 28), end: d(2025, 5, 4) },
    ];
    assert_eq!(find_current_week(&ranges, d(2025, 4, 30)), Some(1));
}

#[test]
fn test_find_current_week_bounds_are_inclusive() {
    let weeks = generate_weeks_for_year(2025, WeekAnchor::FirstMonday);
    assert_eq!(find_current_week(&weeks, d(2025, 1, 6)), Some(0));
    assert_eq!(find_current_week(&weeks, d(2025, 1, 12)), Some(0));
    assert_eq!(find_current_week(&weeks, d(2025, 1, 13)), Some(1));
}

#[test]
fn test_find_current_week_outside_returns_none() {
    let weeks = generate_weeks_for_year(2025, WeekAnchor::FirstMonday);
    assert_eq!(find_current_week(&weeks, d(2025, 1, 3)), None);
    assert_eq!(find_current_week::<Week>(&[], d(2025, 1, 3)), None);
}

#[test]
fn test_monday_of() {
    assert_eq!(monday_of(d(2025, 4, 30)), Some(d(2025, 4, 28)));
    assert_eq!(monday_of(d(2025, 4, 28)), Some(d(2025, 4, 28)));
    assert_eq!(monday_of(d(2025, 5, 4)), Some(d(2025, 4, 28)));
}

#[test]
fn test_week_for_date_matches_generated_week() {
    let weeks = generate_weeks_for_year(2025, WeekAnchor::FirstMonday);
    let found = week_for_date(d(2025, 4, 30), WeekAnchor::FirstMonday).expect("week");
    let idx = find_current_week(&weeks, d(2025, 4, 30)).expect("inside 2025");
    assert_eq!(found, weeks[idx]);
}

#[test]
fn test_week_for_date_early_january_belongs_to_previous_year() {
    let week = week_for_date(d(2025, 1, 3), WeekAnchor::FirstMonday).expect("week");
    assert_eq!(week.start, d(2024, 12, 30));
    assert_eq!(week.number, 53);

    let iso = week_for_date(d(2025, 1, 3), WeekAnchor::Iso).expect("week");
    assert_eq!(iso.start, d(2024, 12, 30));
    assert_eq!(iso.number, 1);
}

#[test]
fn test_week_label_format() {
    let week = Week::starting(2, d(2025, 1, 6)).expect("week");
    assert_eq!(week.label(), "Semana 2 (06/01/2025 - 12/01/2025)");
    assert_eq!(week.range().label(), "6 ene 2025 - 12 ene 2025");
}

#[test]
fn test_date_range_rejects_reversed_bounds() {
    assert!(DateRange::new(d(2025, 2, 1), d(2025, 1, 1)).is_none());
    let single = DateRange::new(d(2025, 2, 1), d(2025, 2, 1)).expect("single day");
    assert_eq!(single.days(), 1);
    assert!(single.contains_date(d(2025, 2, 1)));
}

#[test]
fn test_week_at_end_of_date_range_is_none() {
    assert!(Week::starting(1, NaiveDate::MAX).is_none());
    for anchor in [WeekAnchor::FirstMonday, WeekAnchor::Iso] {
        let last = week_for_date(NaiveDate::MAX, anchor);
        assert!(last.is_none_or(|w| w.end == NaiveDate::MAX));
    }
    assert!(generate_weeks_for_year(NaiveDate::MAX.year(), WeekAnchor::FirstMonday).len() < 53);
}

#[test]
fn test_week_anchor_parsing() {
    assert_eq!("".parse::<WeekAnchor>(), Ok(WeekAnchor::FirstMonday));
    assert_eq!("first-monday".parse::<WeekAnchor>(), Ok(WeekAnchor::FirstMonday));
    assert_eq!("ISO".parse::<WeekAnchor>(), Ok(WeekAnchor::Iso));
    assert!("sunday".parse::<WeekAnchor>().is_err());
}
