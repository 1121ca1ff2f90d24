//! In-memory stores for tests and embedding.
//!
//! Both stores can be switched into a failing mode where every read returns
//! [`StoreError::Unavailable`], to exercise fallback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use glance_core::{Clock, SystemClock};
use tokio::sync::RwLock;

use super::{DailyStore, PreferenceStore, Result, StoreError};

/// In-memory preference store.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, i64>>,
    fail_reads: AtomicBool,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose reads always fail.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_fail_reads(true);
        store
    }

    /// Toggle read failures.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get_i64(&self, key: &str, default: i64) -> Result<i64> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("preference {key}")));
        }
        Ok(self.values.read().await.get(key).copied().unwrap_or(default))
    }

    async fn put_i64(&self, key: &str, value: i64) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Default)]
struct DailyRows {
    progress: HashMap<String, Vec<i64>>,
    worn: HashMap<String, Vec<i64>>,
    goals: Vec<i64>,
}

/// In-memory daily aggregation store.
pub struct MemoryDailyStore {
    rows: RwLock<DailyRows>,
    clock: Arc<dyn Clock>,
    fail_reads: AtomicBool,
}

impl MemoryDailyStore {
    /// Create an empty store using the system clock for day keys.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store using `clock` for day keys.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: RwLock::new(DailyRows::default()),
            clock,
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Toggle read failures.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self, what: &str) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(what.to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryDailyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DailyStore for MemoryDailyStore {
    fn current_day_key(&self) -> String {
        self.clock.day_key()
    }

    async fn today_progress(&self, day_key: &str) -> Result<Option<i64>> {
        self.check_reads("daily progress")?;
        let rows = self.rows.read().await;
        Ok(rows.progress.get(day_key).and_then(|v| v.last().copied()))
    }

    async fn today_worn(&self, day_key: &str) -> Result<Option<i64>> {
        self.check_reads("daily wear time")?;
        let rows = self.rows.read().await;
        Ok(rows.worn.get(day_key).and_then(|v| v.last().copied()))
    }

    async fn adjusted_goal(&self) -> Result<Option<i64>> {
        self.check_reads("adjusted goal")?;
        Ok(self.rows.read().await.goals.last().copied())
    }

    async fn record_progress(&self, day_key: &str, cumulative_minutes: i64) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.progress.entry(day_key.to_string()).or_default().push(cumulative_minutes);
        Ok(())
    }

    async fn record_worn(&self, day_key: &str, worn_minutes: i64) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.worn.entry(day_key.to_string()).or_default().push(worn_minutes);
        Ok(())
    }

    async fn record_adjusted_goal(&self, goal_minutes: i64) -> Result<()> {
        self.rows.write().await.goals.push(goal_minutes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_core::FixedClock;

    #[tokio::test]
    async fn test_preferences_default_and_failure() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_i64("missing", 7).await.unwrap(), 7);

        store.put_i64("week", 4).await.unwrap();
        assert_eq!(store.get_i64("week", 1).await.unwrap(), 4);

        store.set_fail_reads(true);
        assert!(matches!(store.get_i64("week", 1).await, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_daily_last_entry_per_day() {
        let clock = Arc::new(FixedClock::at(0).with_day_key("2026-10-16"));
        let store = MemoryDailyStore::with_clock(clock);
        assert_eq!(store.current_day_key(), "2026-10-16");

        store.record_progress("2026-10-15", 300).await.unwrap();
        store.record_progress("2026-10-16", 20).await.unwrap();
        store.record_progress("2026-10-16", 45).await.unwrap();

        assert_eq!(store.today_progress("2026-10-16").await.unwrap(), Some(45));
        assert_eq!(store.today_progress("2026-10-15").await.unwrap(), Some(300));
        assert_eq!(store.today_worn("2026-10-16").await.unwrap(), None);
        assert_eq!(store.adjusted_goal().await.unwrap(), None);

        store.record_adjusted_goal(600).await.unwrap();
        store.record_adjusted_goal(720).await.unwrap();
        assert_eq!(store.adjusted_goal().await.unwrap(), Some(720));
    }

    #[tokio::test]
    async fn test_daily_failing_reads() {
        let store = MemoryDailyStore::new();
        store.record_worn("2026-10-16", 30).await.unwrap();
        store.set_fail_reads(true);
        assert!(store.today_worn("2026-10-16").await.is_err());
        assert!(store.adjusted_goal().await.is_err());
    }
}
