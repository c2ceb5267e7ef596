//! Minimum-duration loading gate and rotating status labels.
//!
//! Only affects when data is revealed, never what the data is. Time is read
//! through [`Clock`] so tests can drive it by hand.

use std::time::{Duration, Instant};

pub const DEFAULT_FLOOR: Duration = Duration::from_millis(1500);
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_millis(600);
pub const DEFAULT_STATUS_LABELS: [&str; 3] = [
    "Accessing Prefetched Data...",
    "Optimizing Templates...",
    "Finalizing AI Models...",
];

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Keeps a view "busy" for at least `floor` after activation.
#[derive(Debug, Clone, Copy)]
pub struct LoadingSmoother {
    started: Instant,
    floor: Duration,
}

impl LoadingSmoother {
    pub fn start(clock: &impl Clock, floor: Duration) -> Self {
        Self {
            started: clock.now(),
            floor,
        }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn floor_elapsed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.floor
    }

    /// Time left before the floor is reached.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.floor
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    /// Busy until the real work is done and the floor has elapsed.
    pub fn display_busy(&self, real_busy: bool, now: Instant) -> bool {
        real_busy || !self.floor_elapsed(now)
    }
}

/// Round-robin status text, advancing one label per `interval`.
#[derive(Debug, Clone)]
pub struct StatusRotation {
    labels: Vec<String>,
    interval: Duration,
    started: Instant,
}

impl StatusRotation {
    pub fn new<I, S>(labels: I, interval: Duration, started: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            interval,
            started,
        }
    }

    pub fn with_defaults(started: Instant) -> Self {
        Self::new(DEFAULT_STATUS_LABELS, DEFAULT_STATUS_INTERVAL, started)
    }

    pub fn index_at(&self, now: Instant) -> Option<usize> {
        if self.labels.is_empty() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let ticks = if self.interval.is_zero() {
            0
        } else {
            (elapsed.as_nanos() / self.interval.as_nanos()) as usize
        };
        Some(ticks % self.labels.len())
    }

    pub fn label_at(&self, now: Instant) -> Option<&str> {
        self.index_at(now).map(|i| self.labels[i].as_str())
    }

    /// The label to show, or `None` once the display is no longer busy.
    pub fn label_while(&self, busy: bool, now: Instant) -> Option<&str> {
        if busy { self.label_at(now) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct ManualClock(Cell<Instant>);

    impl ManualClock {
        fn new() -> Self {
            Self(Cell::new(Instant::now()))
        }

        fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }

    #[test]
    fn busy_until_floor_even_when_ready() {
        let clock = ManualClock::new();
        let gate = LoadingSmoother::start(&clock, DEFAULT_FLOOR);
        assert!(gate.display_busy(false, clock.now()));
        clock.advance(Duration::from_millis(1499));
        assert!(gate.display_busy(false, clock.now()));
        clock.advance(Duration::from_millis(1));
        assert!(!gate.display_busy(false, clock.now()));
    }

    #[test]
    fn busy_while_real_work_outlasts_floor() {
        let clock = ManualClock::new();
        let gate = LoadingSmoother::start(&clock, DEFAULT_FLOOR);
        clock.advance(Duration::from_secs(5));
        assert!(gate.display_busy(true, clock.now()));
        assert!(!gate.display_busy(false, clock.now()));
        assert_eq!(gate.remaining(clock.now()), Duration::ZERO);
    }

    #[test]
    fn remaining_counts_down() {
        let clock = ManualClock::new();
        let gate = LoadingSmoother::start(&clock, Duration::from_millis(1500));
        clock.advance(Duration::from_millis(500));
        assert_eq!(gate.remaining(clock.now()), Duration::from_millis(1000));
    }

    #[test]
    fn labels_rotate_from_index_zero() {
        let clock = ManualClock::new();
        let rotation = StatusRotation::with_defaults(clock.now());
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rotation.label_at(clock.now()).unwrap().to_string());
            clock.advance(DEFAULT_STATUS_INTERVAL);
        }
        assert_eq!(
            seen,
            vec![
                DEFAULT_STATUS_LABELS[0],
                DEFAULT_STATUS_LABELS[1],
                DEFAULT_STATUS_LABELS[2],
                DEFAULT_STATUS_LABELS[0],
            ]
        );
    }

    #[test]
    fn labels_stop_when_not_busy() {
        let clock = ManualClock::new();
        let rotation = StatusRotation::with_defaults(clock.now());
        assert!(rotation.label_while(true, clock.now()).is_some());
        assert!(rotation.label_while(false, clock.now()).is_none());
    }

    #[test]
    fn empty_rotation_has_no_label() {
        let rotation =
            StatusRotation::new(Vec::<String>::new(), DEFAULT_STATUS_INTERVAL, Instant::now());
        assert!(rotation.label_at(Instant::now()).is_none());
    }
}
