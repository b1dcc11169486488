//! Owned timer handles for the animated widgets
//!
//! Every widget that animates owns its handle directly (usually as an
//! `Option`), so dropping the widget or setting the option to `None`
//! cancels the timer. Nothing is registered globally.

use std::time::{Duration, Instant};

/// Lifecycle of a widget's timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Fixed-period repeating tick
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// Start an interval whose first tick is due one period after `now`.
    /// A zero period is clamped to one millisecond.
    pub fn start(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of ticks that became due since the last poll.
    ///
    /// Ticks missed while the event loop was busy are counted, not dropped,
    /// so the total number of ticks only depends on elapsed time.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }

        let overdue = now.duration_since(self.next_due);
        // Saturates after a very long stall; the remainder is reported on later polls
        let ticks = u32::try_from(overdue.as_nanos() / self.period.as_nanos())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.next_due += self.period * ticks;
        ticks
    }
}

/// Per-frame clock that reports wall-clock time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn start(now: Instant) -> Self {
        Self { last_frame: now }
    }

    /// Elapsed time since the previous frame. Time going backwards counts as zero.
    pub fn frame(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_not_due_before_period() {
        let t0 = Instant::now();
        let mut interval = Interval::start(Duration::from_millis(500), t0);

        assert_eq!(interval.poll(t0), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(499)), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(500)), 1);
        assert_eq!(interval.poll(t0 + Duration::from_millis(600)), 0, "Tick should not repeat");
    }

    #[test]
    fn test_interval_catches_up_missed_ticks() {
        let t0 = Instant::now();
        let mut interval = Interval::start(Duration::from_millis(100), t0);

        assert_eq!(interval.poll(t0 + Duration::from_millis(350)), 3);
        assert_eq!(interval.poll(t0 + Duration::from_millis(400)), 1);
    }

    #[test]
    fn test_interval_long_stall_saturates() {
        let t0 = Instant::now();
        let mut interval = Interval::start(Duration::from_millis(1), t0);
        let stalled = t0 + Duration::from_secs(60 * 24 * 60 * 60);

        assert_eq!(interval.poll(stalled), u32::MAX);
        assert!(interval.poll(stalled) > 0, "Remaining ticks are still reported");
    }

    #[test]
    fn test_frame_clock_measures_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);

        assert_eq!(clock.frame(t0 + Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.frame(t0 + Duration::from_millis(50)), Duration::from_millis(34));
        assert_eq!(clock.frame(t0), Duration::ZERO, "Backwards time counts as zero");
    }
}
