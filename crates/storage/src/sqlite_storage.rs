//! SQLite daily aggregation store.
//!
//! One append-only table per series. The "entry for a day" is the row with
//! the highest id for that day key, so writers never update in place.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use glance_core::{Clock, SystemClock};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::debug;

use super::{DailyStore, Result, StoreError};

/// SQLite daily store implementation.
#[derive(Clone)]
pub struct SqliteDailyStore {
    /// Database connection pool
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteDailyStore {
    /// Open (or create) a database file.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        let store = Self {
            pool,
            clock: Arc::new(SystemClock),
        };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// Every pooled connection to `:memory:` is a separate database, so the
    /// pool is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(db_error)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        let store = Self {
            pool,
            clock: Arc::new(SystemClock),
        };
        store.init_schema().await?;
        Ok(store)
    }

    /// Use `clock` for the current day key.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS daily_cumulative (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_key TEXT NOT NULL,
                cumulative INTEGER NOT NULL,
                recorded_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS daily_wear_time (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_key TEXT NOT NULL,
                worn_minutes INTEGER NOT NULL,
                recorded_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS adjusted_daily_goal (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                adjusted_daily_goal INTEGER NOT NULL,
                recorded_at TEXT NOT NULL
            )",
            "CREATE INDEX IF NOT EXISTS idx_cumulative_day ON daily_cumulative(day_key)",
            "CREATE INDEX IF NOT EXISTS idx_wear_time_day ON daily_wear_time(day_key)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }

    async fn last_for_day(&self, sql: &str, column: &str, day_key: &str) -> Result<Option<i64>> {
        let row = sqlx::query(sql)
            .bind(day_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|row| row.try_get::<i64, _>(column).map_err(db_error))
            .transpose()
    }

    /// Check the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl DailyStore for SqliteDailyStore {
    fn current_day_key(&self) -> String {
        self.clock.day_key()
    }

    async fn today_progress(&self, day_key: &str) -> Result<Option<i64>> {
        self.last_for_day(
            "SELECT cumulative FROM daily_cumulative WHERE day_key = ? ORDER BY id DESC LIMIT 1",
            "cumulative",
            day_key,
        )
        .await
    }

    async fn today_worn(&self, day_key: &str) -> Result<Option<i64>> {
        self.last_for_day(
            "SELECT worn_minutes FROM daily_wear_time WHERE day_key = ? ORDER BY id DESC LIMIT 1",
            "worn_minutes",
            day_key,
        )
        .await
    }

    async fn adjusted_goal(&self) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT adjusted_daily_goal FROM adjusted_daily_goal ORDER BY id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|row| row.try_get::<i64, _>("adjusted_daily_goal").map_err(db_error))
            .transpose()
    }

    async fn record_progress(&self, day_key: &str, cumulative_minutes: i64) -> Result<()> {
        sqlx::query("INSERT INTO daily_cumulative (day_key, cumulative, recorded_at) VALUES (?, ?, ?)")
            .bind(day_key)
            .bind(cumulative_minutes)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        debug!(day_key, cumulative_minutes, "recorded daily progress");
        Ok(())
    }

    async fn record_worn(&self, day_key: &str, worn_minutes: i64) -> Result<()> {
        sqlx::query("INSERT INTO daily_wear_time (day_key, worn_minutes, recorded_at) VALUES (?, ?, ?)")
            .bind(day_key)
            .bind(worn_minutes)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        debug!(day_key, worn_minutes, "recorded wear time");
        Ok(())
    }

    async fn record_adjusted_goal(&self, goal_minutes: i64) -> Result<()> {
        sqlx::query("INSERT INTO adjusted_daily_goal (adjusted_daily_goal, recorded_at) VALUES (?, ?)")
            .bind(goal_minutes)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        debug!(goal_minutes, "recorded adjusted goal");
        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use glance_core::FixedClock;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = SqliteDailyStore::in_memory().await.unwrap();
        assert!(store.health_check().await);

        assert_eq!(store.today_progress("2026-10-16").await.unwrap(), None);
        assert_eq!(store.today_worn("2026-10-16").await.unwrap(), None);
        assert_eq!(store.adjusted_goal().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_entry_for_day() {
        let store = SqliteDailyStore::in_memory().await.unwrap();

        store.record_progress("2026-10-15", 500).await.unwrap();
        store.record_progress("2026-10-16", 12).await.unwrap();
        store.record_progress("2026-10-16", 40).await.unwrap();
        store.record_worn("2026-10-16", 90).await.unwrap();
        store.record_worn("2026-10-16", 150).await.unwrap();

        assert_eq!(store.today_progress("2026-10-16").await.unwrap(), Some(40));
        assert_eq!(store.today_progress("2026-10-15").await.unwrap(), Some(500));
        assert_eq!(store.today_worn("2026-10-16").await.unwrap(), Some(150));
        assert_eq!(store.today_worn("2026-10-15").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recorded_at_is_a_timestamp() {
        let store = SqliteDailyStore::in_memory().await.unwrap();
        let before = Utc::now();
        store.record_progress("2026-10-16", 5).await.unwrap();

        let row = sqlx::query("SELECT recorded_at FROM daily_cumulative")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        let recorded_at: DateTime<Utc> = row.try_get("recorded_at").unwrap();
        assert!(recorded_at >= before);
    }

    #[tokio::test]
    async fn test_adjusted_goal_latest_wins() {
        let store = SqliteDailyStore::in_memory().await.unwrap();
        store.record_adjusted_goal(600).await.unwrap();
        store.record_adjusted_goal(0).await.unwrap();
        assert_eq!(store.adjusted_goal().await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_day_key_from_clock() {
        let store = SqliteDailyStore::in_memory()
            .await
            .unwrap()
            .with_clock(Arc::new(FixedClock::at(0).with_day_key("2026-01-02")));
        assert_eq!(store.current_day_key(), "2026-01-02");
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.db");

        {
            let store = SqliteDailyStore::new(&path).await.unwrap();
            store.record_worn("2026-10-16", 75).await.unwrap();
        }

        let reopened = SqliteDailyStore::new(&path).await.unwrap();
        assert_eq!(reopened.today_worn("2026-10-16").await.unwrap(), Some(75));
    }
}
