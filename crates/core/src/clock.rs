//! Time source for heartbeat ages and day keys.

use chrono::{DateTime, Local, TimeZone};

/// Format of day keys, e.g. `2026-10-16`.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant and calendar day.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_epoch_millis(&self) -> i64;

    /// Identifier of the current calendar day, in local time.
    fn day_key(&self) -> String;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn day_key(&self) -> String {
        day_key_for(&Local::now())
    }
}

/// Clock frozen at a given instant and day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    now_epoch_millis: i64,
    day_key: String,
}

impl FixedClock {
    /// Freeze at `now_epoch_millis`, deriving the day key in local time.
    pub fn at(now_epoch_millis: i64) -> Self {
        let day_key = DateTime::from_timestamp_millis(now_epoch_millis)
            .map(|t| day_key_for(&t.with_timezone(&Local)))
            .unwrap_or_else(|| "1970-01-01".to_string());
        Self {
            now_epoch_millis,
            day_key,
        }
    }

    /// Override the day key.
    pub fn with_day_key(mut self, day_key: impl Into<String>) -> Self {
        self.day_key = day_key.into();
        self
    }
}

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> i64 {
        self.now_epoch_millis
    }

    fn day_key(&self) -> String {
        self.day_key.clone()
    }
}

/// Day key of an instant.
pub fn day_key_for<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(DAY_KEY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_day_key_format() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(day_key_for(&instant), "2026-03-07");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(42).with_day_key("2026-10-16");
        assert_eq!(clock.now_epoch_millis(), 42);
        assert_eq!(clock.day_key(), "2026-10-16");
    }

    #[test]
    fn test_system_clock_day_key_shape() {
        let key = SystemClock.day_key();
        assert_eq!(key.len(), 10);
        assert!(NaiveDate::parse_from_str(&key, DAY_KEY_FORMAT).is_ok());
    }
}
