use sqlx::PgPool;

use super::types::{NewUser, RosterEntry, User, UserDisplay, UserUpdate};
use crate::auth::roles::Role;

const SELECT_USER_DISPLAY: &str = "\
    SELECT id, email, nombre, role, activo, recibe_recordatorios, created_at \
    FROM usuarios";

/// Find user by email for authentication. Returns internal User with password hash.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, nombre, role, password_hash, activo FROM usuarios \
         WHERE lower(email) = lower($1)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await
}

pub async fn find_display_by_id(pool: &PgPool, id: i64) -> Result<Option<UserDisplay>, sqlx::Error> {
    let sql = format!("{SELECT_USER_DISPLAY} WHERE id = $1");
    sqlx::query_as::<_, UserDisplay>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_all(pool: &PgPool) -> Result<Vec<UserDisplay>, sqlx::Error> {
    let sql = format!("{SELECT_USER_DISPLAY} ORDER BY role, nombre, id");
    sqlx::query_as::<_, UserDisplay>(&sql).fetch_all(pool).await
}

/// Active users who receive the weekly reminder.
pub async fn find_reminder_roster(pool: &PgPool) -> Result<Vec<RosterEntry>, sqlx::Error> {
    sqlx::query_as::<_, RosterEntry>(
        "SELECT email, nombre, role FROM usuarios \
         WHERE activo = true AND recibe_recordatorios = true \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE role = $1 AND activo = true")
        .bind(Role::Admin.slug())
        .fetch_one(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewUser) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO usuarios (email, nombre, role, password_hash, recibe_recordatorios) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(new.email.trim())
    .bind(new.nombre.trim())
    .bind(new.role.slug())
    .bind(&new.password_hash)
    .bind(new.recibe_recordatorios)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: i64, changes: &UserUpdate) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE usuarios SET email = $1, nombre = $2, role = $3, activo = $4, \
             recibe_recordatorios = $5, \
             password_hash = COALESCE($6, password_hash), \
             updated_at = now() \
         WHERE id = $7",
    )
    .bind(changes.email.trim())
    .bind(changes.nombre.trim())
    .bind(changes.role.slug())
    .bind(changes.activo)
    .bind(changes.recibe_recordatorios)
    .bind(changes.password_hash.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Create the configured admin account when no active admin exists yet.
/// Returns true if a user was inserted.
pub async fn ensure_admin(pool: &PgPool, email: &str, password_hash: &str) -> Result<bool, sqlx::Error> {
    if count_admins(pool).await? > 0 {
        return Ok(false);
    }
    let result = sqlx::query(
        "INSERT INTO usuarios (email, nombre, role, password_hash, recibe_recordatorios) \
         VALUES ($1, 'Administrador', $2, $3, false) \
         ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, \
             password_hash = EXCLUDED.password_hash, activo = true, updated_at = now()",
    )
    .bind(email.trim())
    .bind(Role::Admin.slug())
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
