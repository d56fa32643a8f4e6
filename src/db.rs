use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::auth::password;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::user;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the bootstrap admin from `ADMIN_EMAIL` / `ADMIN_PASSWORD` when the
/// database has no active admin. Returns true if an account was written.
pub async fn seed_admin(pool: &PgPool, config: &AppConfig) -> Result<bool, AppError> {
    let (Some(email), Some(pass)) = (&config.admin_email, &config.admin_password) else {
        if user::count_admins(pool).await? == 0 {
            log::warn!("No admin account exists and ADMIN_EMAIL/ADMIN_PASSWORD are not set");
        }
        return Ok(false);
    };

    if user::count_admins(pool).await? > 0 {
        return Ok(false);
    }

    let hash = password::hash_password(pass)?;
    let created = user::ensure_admin(pool, email, &hash).await?;
    if created {
        log::info!("Seeded admin account {}", email);
    }
    Ok(created)
}
