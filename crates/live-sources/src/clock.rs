#![forbid(unsafe_code)]

//! Clock-backed cells.
//!
//! A [`TimeSource`] answers two questions: how long since the source was
//! created, and how long since the Unix epoch. [`SystemTimeSource`] reads
//! the platform clock through `web_time`; [`ManualTimeSource`] is advanced
//! by hand for deterministic tests.

use std::cell::Cell;
use std::rc::Rc;

use live_core::{EvaluationMode, Live};
use web_time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub trait TimeSource {
    /// Time since this source was created.
    fn elapsed(&self) -> Duration;

    /// Time since 1970-01-01T00:00:00Z. A clock set before the epoch reads
    /// as zero.
    fn since_epoch(&self) -> Duration;
}

/// Platform clock. The elapsed reference is captured at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    start: Instant,
}

impl SystemTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn since_epoch(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// A manually advanced clock.
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    elapsed: Rc<Cell<Duration>>,
    epoch_offset: Duration,
}

impl ManualTimeSource {
    /// Starts at zero elapsed time, `epoch_offset` after the epoch.
    #[must_use]
    pub fn new(epoch_offset: Duration) -> Self {
        Self {
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
            epoch_offset,
        }
    }

    pub fn advance(&self, delta: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(delta));
    }

    pub fn set_elapsed(&self, elapsed: Duration) {
        self.elapsed.set(elapsed);
    }
}

impl TimeSource for ManualTimeSource {
    fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    fn since_epoch(&self) -> Duration {
        self.epoch_offset.saturating_add(self.elapsed.get())
    }
}

fn whole_seconds(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}

/// Whole seconds since `time` was created.
pub fn seconds(mode: EvaluationMode, time: Rc<dyn TimeSource>) -> Live<i64> {
    Live::from_fn(mode, move || whole_seconds(time.elapsed()))
}

/// Whole seconds since the Unix epoch.
pub fn seconds_since_1970(mode: EvaluationMode, time: Rc<dyn TimeSource>) -> Live<i64> {
    Live::from_fn(mode, move || whole_seconds(time.since_epoch()))
}

/// Fractional seconds since `time` was created.
pub fn elapsed(mode: EvaluationMode, time: Rc<dyn TimeSource>) -> Live<f64> {
    Live::from_fn(mode, move || time.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_drives_seconds() {
        let clock = ManualTimeSource::new(Duration::from_secs(1_000));
        let cell = seconds(EvaluationMode::Live, Rc::new(clock.clone()));
        assert_eq!(cell.resolve(), 0);

        clock.advance(Duration::from_millis(2_500));
        assert_eq!(cell.resolve(), 2);

        let epoch = seconds_since_1970(EvaluationMode::Live, Rc::new(clock.clone()));
        assert_eq!(epoch.resolve(), 1_002);
    }

    #[test]
    fn elapsed_is_fractional() {
        let clock = ManualTimeSource::default();
        let cell = elapsed(EvaluationMode::Live, Rc::new(clock.clone()));
        clock.set_elapsed(Duration::from_millis(1_250));
        assert_eq!(cell.resolve(), 1.25);
    }

    #[test]
    fn frozen_clock_reads_once() {
        let clock = ManualTimeSource::default();
        clock.advance(Duration::from_secs(3));
        let cell = seconds(EvaluationMode::Frozen, Rc::new(clock.clone()));
        clock.advance(Duration::from_secs(10));
        assert_eq!(cell.resolve(), 3);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        let clock = SystemTimeSource::new();
        assert!(clock.since_epoch() > Duration::from_secs(1_500_000_000));
        assert!(clock.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn whole_seconds_saturates() {
        assert_eq!(whole_seconds(Duration::MAX), i64::MAX);
    }
}
