//! Scan window for filtering events.

use chrono::{DateTime, Duration, Utc};

/// Epoch-second bounds for the events to keep.
///
/// `now` is the run start shifted back by the configured skew, `cutoff` is
/// the run start plus the future horizon. Both are computed once from a
/// single captured instant and held constant through the whole walk, so the
/// window cannot drift across a long scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanWindow {
    pub now: i64,
    pub cutoff: i64,
}

impl ScanWindow {
    /// Build the window from a single run-start instant.
    pub fn from_run_start(run_start: DateTime<Utc>, skew_hours: i64, future_days: i64) -> Self {
        ScanWindow {
            now: (run_start - Duration::hours(skew_hours)).timestamp(),
            cutoff: (run_start + Duration::days(future_days)).timestamp(),
        }
    }

    /// Whether an event starting at `start` falls inside the window.
    pub fn contains(&self, start: i64) -> bool {
        start >= self.now && start <= self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bounds_follow_skew_and_horizon() {
        let run_start = Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap();
        let window = ScanWindow::from_run_start(run_start, 8, 3);

        assert_eq!(window.now, run_start.timestamp() - 8 * 3600);
        assert_eq!(window.cutoff, run_start.timestamp() + 3 * 86400);
    }

    #[test]
    fn contains_is_inclusive_at_both_bounds() {
        let window = ScanWindow {
            now: 100,
            cutoff: 200,
        };

        assert!(window.contains(100));
        assert!(window.contains(150));
        assert!(window.contains(200));
        assert!(!window.contains(99));
        assert!(!window.contains(201));
    }
}
