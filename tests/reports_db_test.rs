//! Weekly report persistence: seeding, saving, and deleting with detail rows.
//!
//! Requires `TEST_DATABASE_URL`; each test skips itself otherwise.

mod common;

use chrono::NaiveDate;
use sqlx::PgPool;

use topmarket::calendar::{DateRange, Week, WeekAnchor, generate_weeks_for_year, week_for_date};
use topmarket::models::report_kind::ReportKind;
use topmarket::models::summary;
use topmarket::models::venta_detalle::{self, NewVentaDetalle};
use topmarket::models::weekly::{self, WeeklyValues};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn week(date: NaiveDate) -> Week {
    week_for_date(date, WeekAnchor::FirstMonday).expect("week")
}

async fn row_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count")
}

async fn detail_count(pool: &PgPool, venta_id: i64) -> usize {
    venta_detalle::find_by_venta(pool, venta_id).await.expect("details").len()
}

fn values(primary: f64, secondary: f64, notas: &str) -> WeeklyValues {
    WeeklyValues { primary, secondary, notas: notas.to_string() }
}

#[tokio::test]
async fn test_seed_weeks_is_idempotent() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let weeks = generate_weeks_for_year(2025, WeekAnchor::FirstMonday);

    let first = weekly::seed_weeks(pool, ReportKind::Pxr, &weeks).await.expect("seed");
    assert_eq!(first, weeks.len() as u64);
    let second = weekly::seed_weeks(pool, ReportKind::Pxr, &weeks).await.expect("seed again");
    assert_eq!(second, 0);
    assert_eq!(row_count(pool, ReportKind::Pxr.table()).await, weeks.len() as i64);

    // Other tables are untouched
    assert_eq!(row_count(pool, ReportKind::Hh.table()).await, 0);

    let rows = weekly::find_for_weeks(pool, ReportKind::Pxr, &weeks).await.expect("rows");
    assert_eq!(rows.len(), weeks.len());
    assert!(rows.windows(2).all(|w| w[0].week_start < w[1].week_start));
    assert!(rows.iter().all(|r| r.primary_value == 0.0 && r.notas.is_empty()));

    db.teardown().await;
}

#[tokio::test]
async fn test_save_week_inserts_then_overwrites() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let week = week(d(2025, 4, 30));

    let id = weekly::save_week(pool, ReportKind::Cobranza, &week, &values(1500.5, 3.0, "primera"))
        .await
        .expect("insert");
    let again = weekly::save_week(pool, ReportKind::Cobranza, &week, &values(2000.0, 1.0, "segunda"))
        .await
        .expect("overwrite");
    assert_eq!(id, again);

    let row = weekly::find_by_week_start(pool, ReportKind::Cobranza, week.start)
        .await
        .expect("query")
        .expect("row");
    assert_eq!(row.primary_value, 2000.0);
    assert_eq!(row.secondary_value, 1.0);
    assert_eq!(row.notas, "segunda");
    assert_eq!(row.week_label, week.label());
    assert_eq!(row.week_end, d(2025, 5, 4));
    assert_eq!(row_count(pool, ReportKind::Cobranza.table()).await, 1);

    db.teardown().await;
}

#[tokio::test]
async fn test_negative_values_rejected_by_database() {
    let Some(db) = common::setup_test_db().await else { return };
    let result = weekly::save_week(db.pool(), ReportKind::Gastos, &week(d(2025, 2, 3)), &values(-1.0, 0.0, "")).await;
    assert!(result.is_err());
    db.teardown().await;
}

#[tokio::test]
async fn test_delete_venta_removes_details_first() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let venta_id = weekly::save_week(pool, ReportKind::Ventas, &week(d(2025, 4, 28)), &values(2.0, 17500.5, ""))
        .await
        .expect("save");

    for (monto, detalles) in [(15000.0, "ACME"), (2500.5, "Globex")] {
        let new = NewVentaDetalle { fecha: d(2025, 4, 29), monto, detalles: detalles.to_string() };
        venta_detalle::create(pool, venta_id, &new).await.expect("detail");
    }
    assert_eq!(detail_count(pool, venta_id).await, 2);
    let totals = venta_detalle::totals_by_venta(pool, &[venta_id]).await.expect("totals");
    assert_eq!(totals, vec![(venta_id, 17500.5)]);

    assert!(weekly::delete(pool, ReportKind::Ventas, venta_id).await.expect("delete"));
    assert_eq!(detail_count(pool, venta_id).await, 0);
    assert_eq!(row_count(pool, "ventas_detalle").await, 0);
    assert!(weekly::find_by_id(pool, ReportKind::Ventas, venta_id).await.expect("find").is_none());
    assert!(!weekly::delete(pool, ReportKind::Ventas, venta_id).await.expect("delete again"));

    db.teardown().await;
}

#[tokio::test]
async fn test_detail_update_is_scoped_to_parent() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let empty = values(0.0, 0.0, "");
    let a = weekly::save_week(pool, ReportKind::Ventas, &week(d(2025, 3, 3)), &empty).await.expect("week a");
    let b = weekly::save_week(pool, ReportKind::Ventas, &week(d(2025, 3, 10)), &empty).await.expect("week b");

    let new = NewVentaDetalle { fecha: d(2025, 3, 4), monto: 100.0, detalles: String::new() };
    let detail = venta_detalle::create(pool, a, &new).await.expect("detail");

    let changed = NewVentaDetalle { monto: 250.0, ..new.clone() };
    assert!(!venta_detalle::update(pool, b, detail, &changed).await.expect("wrong parent"));
    assert!(venta_detalle::update(pool, a, detail, &changed).await.expect("right parent"));
    let stored = venta_detalle::find_by_venta(pool, a).await.expect("details");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, detail);
    assert_eq!(stored[0].monto, 250.0);

    assert!(!venta_detalle::delete(pool, b, detail).await.expect("wrong parent"));
    assert!(venta_detalle::delete(pool, a, detail).await.expect("right parent"));

    db.teardown().await;
}

#[tokio::test]
async fn test_history_merges_kinds() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let week = week(d(2025, 6, 2));
    weekly::save_week(pool, ReportKind::Ventas, &week, &values(10.0, 2.0, "")).await.expect("ventas");
    weekly::save_week(pool, ReportKind::Hh, &week, &values(1.0, 900.0, "")).await.expect("hh");

    let range = DateRange::new(d(2025, 6, 1), d(2025, 6, 30)).expect("range");
    let rows = summary::history(pool, &range).await.expect("history");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values[0], Some((10.0, 2.0)));
    assert_eq!(rows[0].values[1], None);
    assert_eq!(rows[0].values[2], Some((1.0, 900.0)));

    db.teardown().await;
}

#[tokio::test]
async fn test_iso_year_rows_include_week_starting_in_december() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let iso_week1 = week_for_date(d(2025, 1, 1), WeekAnchor::Iso).expect("iso week");
    assert_eq!(iso_week1.start, d(2024, 12, 30));
    weekly::save_week(pool, ReportKind::Ventas, &iso_week1, &values(3.0, 900.0, "")).await.expect("save");

    let weeks = generate_weeks_for_year(2025, WeekAnchor::Iso);
    let rows = weekly::find_for_weeks(pool, ReportKind::Ventas, &weeks).await.expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].week_start, d(2024, 12, 30));

    let calendar_year = DateRange::year(2025).expect("year");
    let by_calendar = weekly::find_in_range(pool, ReportKind::Ventas, &calendar_year).await.expect("rows");
    assert!(by_calendar.is_empty());

    db.teardown().await;
}

#[tokio::test]
async fn test_year_overview_finds_current_week_filed_under_previous_year() {
    let Some(db) = common::setup_test_db().await else { return };
    let pool = db.pool();
    let straddling = week(d(2025, 1, 2));
    assert_eq!(straddling.start, d(2024, 12, 30));
    let id = weekly::save_week(pool, ReportKind::Ventas, &straddling, &values(4.0, 1200.0, ""))
        .await
        .expect("save");

    let overview = summary::year_overview(pool, 2025, d(2025, 1, 2), WeekAnchor::FirstMonday)
        .await
        .expect("overview");
    let ventas = overview.iter().find(|s| s.kind == ReportKind::Ventas).expect("ventas");
    assert_eq!(ventas.current.as_ref().map(|r| r.id), Some(id));
    assert_eq!(ventas.totals.weeks, 0);

    let gastos = overview.iter().find(|s| s.kind == ReportKind::Gastos).expect("gastos");
    assert!(gastos.current.is_none());

    db.teardown().await;
}
