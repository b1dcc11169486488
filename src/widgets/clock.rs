//! Wall clock shown in the header

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use super::Deferred;
use crate::timer::{Interval, TimerState};

const REFRESH: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Clock {
    time: Deferred<DateTime<Local>>,
    interval: Option<Interval>,
}

impl Clock {
    /// A visible clock reads the time on its first tick, not at construction
    pub fn new(visible: bool, now: Instant) -> Self {
        let mut clock = Self {
            time: Deferred::Uninitialized,
            interval: None,
        };
        if visible {
            clock.show(now);
        }
        clock
    }

    /// Refresh the displayed time when due. `read` supplies the wall-clock time.
    pub fn tick(&mut self, now: Instant, read: impl FnOnce() -> DateTime<Local>) -> bool {
        let Some(interval) = self.interval.as_mut() else {
            return false;
        };

        let due = interval.poll(now) > 0 || !self.time.is_ready();
        if due {
            self.time = Deferred::Ready(read());
        }
        due
    }

    pub fn show(&mut self, now: Instant) {
        if self.interval.is_none() {
            self.interval = Some(Interval::start(REFRESH, now));
        }
    }

    pub fn hide(&mut self) {
        self.interval = None;
        self.time = Deferred::Uninitialized;
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.state() {
            TimerState::Running => self.hide(),
            TimerState::Stopped => self.show(now),
        }
    }

    pub fn state(&self) -> TimerState {
        if self.interval.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Formatted time, or `None` while hidden or not yet read
    pub fn display(&self) -> Option<String> {
        self.time
            .ready()
            .map(|time| time.format("%a %d %b  %H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 9, 30, secs).unwrap()
    }

    #[test]
    fn test_clock_renders_nothing_before_first_read() {
        let t0 = Instant::now();
        let mut clock = Clock::new(true, t0);
        assert_eq!(clock.display(), None);

        assert!(clock.tick(t0, || fixed(0)));
        assert_eq!(clock.display().as_deref(), Some("Fri 15 Mar  09:30:00"));
    }

    #[test]
    fn test_clock_refreshes_each_second() {
        let t0 = Instant::now();
        let mut clock = Clock::new(true, t0);
        clock.tick(t0, || fixed(0));

        assert!(!clock.tick(t0 + Duration::from_millis(500), || fixed(1)));
        assert!(clock.tick(t0 + Duration::from_secs(1), || fixed(1)));
        assert_eq!(clock.display().as_deref(), Some("Fri 15 Mar  09:30:01"));
    }

    #[test]
    fn test_hidden_clock_stops() {
        let t0 = Instant::now();
        let mut clock = Clock::new(true, t0);
        clock.tick(t0, || fixed(0));

        clock.toggle(t0);
        assert_eq!(clock.state(), TimerState::Stopped);
        assert_eq!(clock.display(), None);
        assert!(!clock.tick(t0 + Duration::from_secs(5), || fixed(5)));

        let hidden = Clock::new(false, t0);
        assert_eq!(hidden.state(), TimerState::Stopped);
    }
}
