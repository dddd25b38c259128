use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Opens the SQLite pool (creating the file if needed) and applies migrations.
pub async fn init_db(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL {database_url:?}"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        // writers queue on the lock instead of failing with SQLITE_BUSY
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;
    info!(database_url, "Database ready");

    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// In-memory database for tests. One connection that never recycles,
/// otherwise every new connection would see an empty database.
#[cfg(test)]
pub async fn init_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    migrate(&pool).await.expect("Failed to migrate test database");
    pool
}

/// File-backed database with a real multi-connection pool, removed on drop.
#[cfg(test)]
pub struct TempDb {
    pub pool: SqlitePool,
    path: std::path::PathBuf,
}

#[cfg(test)]
impl TempDb {
    pub async fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("attendance-{}-{name}.db", std::process::id()));
        remove_db_files(&path);

        let url = format!("sqlite://{}", path.display());
        let pool = init_db(&url, 5).await.expect("Failed to open file database");

        Self { pool, path }
    }
}

#[cfg(test)]
impl Drop for TempDb {
    fn drop(&mut self) {
        remove_db_files(&self.path);
    }
}

#[cfg(test)]
fn remove_db_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
