//! Time source for the services.
//!
//! The calendar grid itself never looks at the clock; only "today" for the
//! current-date endpoint and ID timestamps come from here.

use chrono::{Local, Utc};
use shared::DateOnly;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Clock: Send + Sync {
    /// Today's date in the server's local timezone
    fn today(&self) -> DateOnly;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateOnly {
        Local::now().date_naive().into()
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Clock frozen at a given date and instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: DateOnly,
    pub millis: u64,
}

impl Clock for FixedClock {
    fn today(&self) -> DateOnly {
        self.today
    }

    fn now_millis(&self) -> u64 {
        self.millis
    }
}

/// Hands out strictly increasing millisecond stamps for entity IDs, so two
/// entities created within the same millisecond still get distinct IDs.
#[derive(Debug, Default)]
pub struct IdTimestamps {
    last: AtomicU64,
}

impl IdTimestamps {
    pub fn next(&self, now_millis: u64) -> u64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(current + 1);
            match self
                .last
                .compare_exchange_weak(current, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_timestamps_are_strictly_increasing() {
        let ids = IdTimestamps::default();
        assert_eq!(ids.next(1000), 1000);
        assert_eq!(ids.next(1000), 1001);
        assert_eq!(ids.next(999), 1002);
        assert_eq!(ids.next(5000), 5000);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock {
            today: "2024-07-16".parse().unwrap(),
            millis: 42,
        };
        assert_eq!(clock.today().to_string(), "2024-07-16");
        assert_eq!(clock.now_millis(), 42);
    }
}
