//! Rotating-message banner
//!
//! Cycles through a fixed list of messages on a fixed period. The banner can
//! be dismissed, after which it stays hidden until a new one is created.

use std::time::{Duration, Instant};

use super::BannerMessage;
use crate::timer::{Interval, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub current_index: usize,
    pub is_visible: bool,
}

#[derive(Debug)]
pub struct RotatingBanner {
    messages: Vec<BannerMessage>,
    state: RotationState,
    interval: Option<Interval>,
}

impl RotatingBanner {
    /// Create the banner and start rotating. An empty message list never starts a timer.
    pub fn new(messages: Vec<BannerMessage>, period: Duration, now: Instant) -> Self {
        let interval = if messages.len() > 1 {
            Some(Interval::start(period, now))
        } else {
            None
        };

        Self {
            state: RotationState {
                current_index: 0,
                is_visible: !messages.is_empty(),
            },
            messages,
            interval,
        }
    }

    /// Advance by one message per elapsed period. Returns true if the shown message changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval.as_mut() else {
            return false;
        };

        let ticks = interval.poll(now) as usize;
        if ticks == 0 {
            return false;
        }

        let previous = self.state.current_index;
        self.state.current_index = (previous + ticks) % self.messages.len();
        self.state.current_index != previous
    }

    /// Hide the banner and stop rotating for good
    pub fn dismiss(&mut self) {
        if self.state.is_visible {
            tracing::debug!("Rotating banner dismissed at message {}", self.state.current_index);
        }
        self.interval = None;
        self.state.is_visible = false;
    }

    pub fn current(&self) -> Option<&BannerMessage> {
        if !self.state.is_visible {
            return None;
        }
        self.messages.get(self.state.current_index)
    }

    pub fn rotation(&self) -> RotationState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn state(&self) -> TimerState {
        if self.interval.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    fn messages(n: usize) -> Vec<BannerMessage> {
        (0..n).map(|i| BannerMessage::new(format!("message {}", i))).collect()
    }

    #[test]
    fn test_index_is_tick_count_mod_len() {
        for n in 1..=5 {
            let t0 = Instant::now();
            let mut banner = RotatingBanner::new(messages(n), PERIOD, t0);

            for k in 1..=12u32 {
                banner.tick(t0 + PERIOD * k);
                assert_eq!(
                    banner.rotation().current_index,
                    k as usize % n,
                    "After {} ticks with {} messages",
                    k,
                    n
                );
            }
        }
    }

    #[test]
    fn test_missed_ticks_are_applied() {
        let t0 = Instant::now();
        let mut banner = RotatingBanner::new(messages(3), PERIOD, t0);

        assert!(banner.tick(t0 + PERIOD * 4));
        assert_eq!(banner.current().map(|m| m.text.as_str()), Some("message 1"));
    }

    #[test]
    fn test_empty_banner_renders_nothing() {
        let t0 = Instant::now();
        let mut banner = RotatingBanner::new(Vec::new(), PERIOD, t0);

        assert!(banner.current().is_none());
        assert!(!banner.tick(t0 + PERIOD * 3));
        assert_eq!(banner.state(), TimerState::Stopped);
        banner.dismiss();
        assert!(banner.current().is_none());
    }

    #[test]
    fn test_single_message_never_rotates() {
        let t0 = Instant::now();
        let mut banner = RotatingBanner::new(messages(1), PERIOD, t0);

        assert!(!banner.tick(t0 + PERIOD * 2));
        assert_eq!(banner.current().map(|m| m.text.as_str()), Some("message 0"));
    }

    #[test]
    fn test_dismiss_is_terminal() {
        let t0 = Instant::now();
        let mut banner = RotatingBanner::new(messages(3), PERIOD, t0);
        banner.tick(t0 + PERIOD);
        assert_eq!(banner.state(), TimerState::Running);

        banner.dismiss();
        let index = banner.rotation().current_index;

        for k in 2..10u32 {
            assert!(!banner.tick(t0 + PERIOD * k), "Dismissed banner should not rotate");
        }
        assert_eq!(banner.rotation().current_index, index);
        assert!(!banner.rotation().is_visible);
        assert!(banner.current().is_none());
        assert_eq!(banner.state(), TimerState::Stopped);
    }
}
