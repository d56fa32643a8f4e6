use sqlx::PgPool;

use super::types::{NewVentaDetalle, VentaDetalle};

pub async fn find_by_venta(pool: &PgPool, venta_id: i64) -> Result<Vec<VentaDetalle>, sqlx::Error> {
    sqlx::query_as::<_, VentaDetalle>(
        "SELECT id, venta_id, fecha, monto, detalles FROM ventas_detalle \
         WHERE venta_id = $1 ORDER BY fecha ASC, id ASC",
    )
    .bind(venta_id)
    .fetch_all(pool)
    .await
}

/// Sum of detail amounts per parent row, for the given parents.
pub async fn totals_by_venta(pool: &PgPool, venta_ids: &[i64]) -> Result<Vec<(i64, f64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, f64)>(
        "SELECT venta_id, COALESCE(SUM(monto), 0)::DOUBLE PRECISION FROM ventas_detalle \
         WHERE venta_id = ANY($1) GROUP BY venta_id",
    )
    .bind(venta_ids)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, venta_id: i64, new: &NewVentaDetalle) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO ventas_detalle (venta_id, fecha, monto, detalles) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(venta_id)
    .bind(new.fecha)
    .bind(new.monto)
    .bind(&new.detalles)
    .fetch_one(pool)
    .await
}

/// Update a detail row, scoped to its parent so a mismatched URL cannot touch another week.
pub async fn update(
    pool: &PgPool,
    venta_id: i64,
    id: i64,
    new: &NewVentaDetalle,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE ventas_detalle SET fecha = $1, monto = $2, detalles = $3, updated_at = now() \
         WHERE id = $4 AND venta_id = $5",
    )
    .bind(new.fecha)
    .bind(new.monto)
    .bind(&new.detalles)
    .bind(id)
    .bind(venta_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, venta_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ventas_detalle WHERE id = $1 AND venta_id = $2")
        .bind(id)
        .bind(venta_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
