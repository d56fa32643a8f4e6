//! Shared test infrastructure for the database-backed tests.
//!
//! Database tests run only when `TEST_DATABASE_URL` points at a Postgres server.
//! Each `TestDb` gets its own schema, so tests can run in parallel and never see
//! each other's rows.

#![allow(dead_code)]

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use topmarket::auth::password;
use topmarket::auth::roles::Role;
use topmarket::db::MIGRATOR;
use topmarket::models::user::{self, NewUser};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_PASSWORD: &str = "password123";

pub struct TestDb {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drop the schema. Tests call this last; a skipped teardown only leaves a
    /// stray schema behind.
    pub async fn teardown(self) {
        self.pool.close().await;
        let sql = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        let _ = self.admin.execute(sql.as_str()).await;
        self.admin.close().await;
    }
}

/// Fresh migrated schema, or `None` when no test database is configured.
pub async fn setup_test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let schema = format!("test_{}", hex::encode(rand::random::<[u8; 6]>()));

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect to TEST_DATABASE_URL");
    admin
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .expect("create test schema");

    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let sql = format!("SET search_path TO {search_path}");
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("connect test pool");

    MIGRATOR.run(&pool).await.expect("run migrations");

    Some(TestDb { pool, admin, schema })
}

/// Insert a user with `TEST_PASSWORD` and return its id.
pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> i64 {
    let new = NewUser {
        email: email.to_string(),
        nombre: format!("Usuario {}", role.label()),
        role,
        password_hash: password::hash_password(TEST_PASSWORD).expect("hash"),
        recibe_recordatorios: true,
    };
    user::create(pool, &new).await.expect("create user")
}
