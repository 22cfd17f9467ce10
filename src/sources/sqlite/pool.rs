use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Owns the SQLite connection pool.
///
/// Created once at startup and handed to whoever needs database access;
/// [`close`](Self::close) releases every connection on shutdown.
#[derive(Clone, Debug)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Connect to a database file (or `sqlite:` URL), creating it if missing
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool; later queries fail with `PoolClosed`
    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
