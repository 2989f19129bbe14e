use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::atomic::{AtomicU64, Ordering};

static DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Fresh in-memory SQLite database with all migrations applied.
///
/// Uses a uniquely named shared-cache memory database so every pooled
/// connection sees the same schema, which plain `sqlite::memory:` does not
/// guarantee once a test touches the pool from more than one task.
pub async fn setup_test_db() -> DatabaseConnection {
    let seq = DB_SEQ.fetch_add(1, Ordering::Relaxed);
    let url = format!(
        "sqlite:file:zonetrace_test_{}_{seq}?mode=memory&cache=shared",
        std::process::id()
    );

    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
