use chrono::NaiveDate;
use sqlx::PgPool;

use super::types::{WeeklyReport, WeeklyValues};
use crate::calendar::{DateRange, Week};
use crate::models::report_kind::ReportKind;

fn select_sql(kind: ReportKind) -> String {
    let [primary, secondary] = kind.metrics();
    format!(
        "SELECT id, week_label, week_start, week_end, \
                {} AS primary_value, {} AS secondary_value, \
                notas, updated_at \
         FROM {}",
        primary.column,
        secondary.column,
        kind.table(),
    )
}

/// Rows whose `week_start` falls in `range`, oldest first.
pub async fn find_in_range(
    pool: &PgPool,
    kind: ReportKind,
    range: &DateRange,
) -> Result<Vec<WeeklyReport>, sqlx::Error> {
    let sql = format!(
        "{} WHERE week_start BETWEEN $1 AND $2 ORDER BY week_start ASC",
        select_sql(kind)
    );
    sqlx::query_as::<_, WeeklyReport>(&sql)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
}

/// Rows for a generated year of weeks. The first week may start in the
/// previous calendar year, so the range follows the weeks, not January 1.
pub async fn find_for_weeks(
    pool: &PgPool,
    kind: ReportKind,
    weeks: &[Week],
) -> Result<Vec<WeeklyReport>, sqlx::Error> {
    let (Some(first), Some(last)) = (weeks.first(), weeks.last()) else {
        return Ok(Vec::new());
    };
    find_in_range(pool, kind, &DateRange { start: first.start, end: last.start }).await
}

pub async fn find_by_id(
    pool: &PgPool,
    kind: ReportKind,
    id: i64,
) -> Result<Option<WeeklyReport>, sqlx::Error> {
    let sql = format!("{} WHERE id = $1", select_sql(kind));
    sqlx::query_as::<_, WeeklyReport>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_week_start(
    pool: &PgPool,
    kind: ReportKind,
    week_start: NaiveDate,
) -> Result<Option<WeeklyReport>, sqlx::Error> {
    let sql = format!("{} WHERE week_start = $1", select_sql(kind));
    sqlx::query_as::<_, WeeklyReport>(&sql)
        .bind(week_start)
        .fetch_optional(pool)
        .await
}

/// Insert empty rows for every week not stored yet. Returns the number inserted.
pub async fn seed_weeks(
    pool: &PgPool,
    kind: ReportKind,
    weeks: &[Week],
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (week_label, week_start, week_end) VALUES ($1, $2, $3) \
         ON CONFLICT DO NOTHING",
        kind.table()
    );

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for week in weeks {
        inserted += sqlx::query(&sql)
            .bind(week.label())
            .bind(week.start)
            .bind(week.end)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;

    if inserted > 0 {
        log::info!("Seeded {} empty week(s) into {}", inserted, kind.table());
    }
    Ok(inserted)
}

/// Insert or overwrite the values for `week` (last write wins).
pub async fn save_week(
    pool: &PgPool,
    kind: ReportKind,
    week: &Week,
    values: &WeeklyValues,
) -> Result<i64, sqlx::Error> {
    let [primary, secondary] = kind.metrics();
    let sql = format!(
        "INSERT INTO {table} (week_label, week_start, week_end, {a}, {b}, notas) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (week_start) DO UPDATE SET \
             {a} = EXCLUDED.{a}, {b} = EXCLUDED.{b}, notas = EXCLUDED.notas, updated_at = now() \
         RETURNING id",
        table = kind.table(),
        a = primary.column,
        b = secondary.column,
    );
    sqlx::query_scalar(&sql)
        .bind(week.label())
        .bind(week.start)
        .bind(week.end)
        .bind(values.primary)
        .bind(values.secondary)
        .bind(&values.notas)
        .fetch_one(pool)
        .await
}

/// Delete a row. Ventas detail rows are removed first, in the same transaction.
pub async fn delete(pool: &PgPool, kind: ReportKind, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if kind.has_details() {
        let removed = sqlx::query("DELETE FROM ventas_detalle WHERE venta_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        log::debug!("Removed {} detail row(s) of venta {}", removed, id);
    }

    let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
    let deleted = sqlx::query(&sql).bind(id).execute(&mut *tx).await?.rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}
