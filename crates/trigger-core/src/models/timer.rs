use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::duration::format_hms;

/// Stable identity of a timer within one session. Row positions change when
/// timers are deleted; ids never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named stopwatch accounted against the wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub id: TimerId,
    pub title: String,
    elapsed: Duration,
    running: bool,
    started_at: DateTime<Utc>,
}

impl Timer {
    pub fn new(id: TimerId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            elapsed: Duration::zero(),
            running: false,
            started_at: Utc::now(),
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.started_at = Utc::now();
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.elapsed = saturating_add(self.elapsed, self.running_segment());
            self.running = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Zeroes the timer; a running timer keeps running from zero.
    pub fn reset(&mut self) {
        self.elapsed = Duration::zero();
        if self.running {
            self.started_at = Utc::now();
        }
    }

    pub fn add_time(&mut self, seconds: u64) {
        self.elapsed = saturating_add(self.elapsed, seconds_delta(seconds));
    }

    pub fn subtract_time(&mut self, seconds: u64) {
        if self.running {
            let now = Utc::now();
            self.elapsed = saturating_add(self.elapsed, self.segment_until(now));
            self.started_at = now;
        }

        self.elapsed = self
            .elapsed
            .checked_sub(&seconds_delta(seconds))
            .unwrap_or_else(Duration::zero)
            .max(Duration::zero());
    }

    pub fn get_elapsed(&self) -> Duration {
        if self.running {
            saturating_add(self.elapsed, self.running_segment())
        } else {
            self.elapsed
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.get_elapsed().num_seconds().max(0) as u64
    }

    pub fn format_elapsed(&self) -> String {
        format_hms(self.elapsed_seconds())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// When the current running segment began, if the timer is running.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.running.then_some(self.started_at)
    }

    fn running_segment(&self) -> Duration {
        self.segment_until(Utc::now())
    }

    fn segment_until(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.started_at)
            .max(Duration::zero())
    }
}

fn seconds_delta(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

fn saturating_add(lhs: Duration, rhs: Duration) -> Duration {
    lhs.checked_add(&rhs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    fn timer() -> Timer {
        Timer::new(TimerId(1), "test")
    }

    #[test]
    fn test_new_timer_is_stopped_at_zero() {
        let timer = timer();
        assert!(!timer.is_running());
        assert_eq!(timer.get_elapsed(), Duration::zero());
        assert_eq!(timer.started_at(), None);
        assert_eq!(timer.format_elapsed(), "00:00:00");
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = timer();
        timer.start();
        let first = timer.started_at();
        sleep(StdDuration::from_millis(20));
        timer.start();

        assert!(first.is_some());
        assert_eq!(timer.started_at(), first);
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let mut timer = timer();
        timer.start();
        sleep(StdDuration::from_millis(30));
        timer.stop();

        let elapsed = timer.get_elapsed();
        assert!(elapsed > Duration::zero());

        sleep(StdDuration::from_millis(30));
        assert_eq!(timer.get_elapsed(), elapsed);

        timer.stop();
        assert_eq!(timer.get_elapsed(), elapsed);
    }

    #[test]
    fn test_start_and_stop_accumulates() {
        let mut timer = timer();

        timer.start();
        sleep(StdDuration::from_millis(30));
        timer.stop();
        let first = timer.get_elapsed();
        assert!(first > Duration::zero());

        timer.start();
        sleep(StdDuration::from_millis(30));
        timer.stop();
        let second = timer.get_elapsed();

        assert!(second > first);
    }

    #[test]
    fn test_toggle() {
        let mut timer = timer();
        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_reset_keeps_running_state() {
        let mut timer = timer();
        timer.add_time(120);
        timer.start();
        timer.reset();

        assert!(timer.is_running());
        assert_eq!(timer.elapsed_seconds(), 0);

        timer.stop();
        timer.add_time(5);
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.get_elapsed(), Duration::zero());
    }

    #[test]
    fn test_add_and_subtract_time() {
        let mut timer = timer();

        timer.add_time(1);
        assert_eq!(timer.elapsed_seconds(), 1);
        timer.add_time(300);
        assert_eq!(timer.elapsed_seconds(), 301);
        timer.add_time(0);
        assert_eq!(timer.elapsed_seconds(), 301);

        timer.subtract_time(300);
        assert_eq!(timer.elapsed_seconds(), 1);
        timer.subtract_time(1);
        assert_eq!(timer.elapsed_seconds(), 0);
        timer.subtract_time(240);
        assert_eq!(timer.get_elapsed(), Duration::zero());
    }

    #[test]
    fn test_subtract_never_goes_negative() {
        let mut timer = timer();
        timer.add_time(10);
        timer.subtract_time(u64::MAX);
        assert_eq!(timer.get_elapsed(), Duration::zero());
    }

    #[test]
    fn test_subtract_while_running_reduces_total() {
        let mut timer = timer();
        timer.add_time(3900);
        timer.start();
        timer.subtract_time(300);

        assert!(timer.is_running());
        assert_eq!(timer.elapsed_seconds(), 3600);
        assert_eq!(timer.format_elapsed(), "01:00:00");
    }

    #[test]
    fn test_add_time_saturates() {
        let mut timer = timer();
        timer.add_time(u64::MAX);
        timer.add_time(u64::MAX);
        assert_eq!(timer.get_elapsed(), Duration::MAX);
    }
}
