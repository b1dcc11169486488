//! Sliding marquee banners
//!
//! Both banners scroll text from right to left across a container. Widths are
//! terminal cells and come from the layout, so nothing moves until the UI has
//! measured the container and the content at least once.

use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::timer::{FrameClock, TimerState};

/// Shortest time a width-timed message stays on screen
const MIN_PASS: Duration = Duration::from_secs(10);

/// Content cells per second of pass duration for width-timed messages
const CELLS_PER_PASS_SECOND: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Offset of the content's left edge from the container's left edge
    pub position: f64,
    pub container_width: u16,
    pub content_width: u16,
}

impl ScrollState {
    fn is_measured(&self) -> bool {
        self.container_width > 0 && self.content_width > 0
    }
}

/// Continuous marquee moving at a fixed speed
#[derive(Debug)]
pub struct MarqueeBanner {
    text: String,
    /// Cells per second
    speed: f64,
    scroll: ScrollState,
    clock: Option<FrameClock>,
}

impl MarqueeBanner {
    pub fn new(text: impl Into<String>, speed: f64) -> Self {
        Self {
            text: text.into(),
            speed: speed.max(0.0),
            scroll: ScrollState::default(),
            clock: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Record fresh layout measurements (first layout and every resize).
    ///
    /// The animation starts at the container's right edge the first time
    /// both widths are positive, and stops if either drops back to zero.
    pub fn measure(&mut self, container_width: u16, content_width: u16, now: Instant) {
        self.scroll.container_width = container_width;
        self.scroll.content_width = content_width;

        if !self.scroll.is_measured() {
            if self.clock.take().is_some() {
                tracing::debug!("Marquee paused: container collapsed to zero width");
            }
            return;
        }

        if self.clock.is_none() {
            self.scroll.position = f64::from(container_width);
            self.clock = Some(FrameClock::start(now));
        }
    }

    /// Move by `speed * elapsed`, wrapping back to the right edge once the
    /// content has fully left the container.
    pub fn advance(&mut self, now: Instant) {
        let Some(clock) = self.clock.as_mut() else {
            return;
        };

        let elapsed = clock.frame(now);
        self.scroll.position -= self.speed * elapsed.as_secs_f64();

        if self.scroll.position < -f64::from(self.scroll.content_width) {
            self.scroll.position = f64::from(self.scroll.container_width);
        }
    }

    #[cfg(test)]
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn state(&self) -> TimerState {
        if self.clock.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// The slice of text that is inside the container right now
    pub fn visible_text(&self) -> String {
        if self.clock.is_none() {
            return String::new();
        }
        window(&self.text, self.scroll.position, self.scroll.container_width)
    }
}

/// Pass duration for a message of the given width: `max(10s, width / 50)` seconds
pub fn pass_duration(content_width: u16) -> Duration {
    Duration::from_secs_f64(f64::from(content_width) / CELLS_PER_PASS_SECOND).max(MIN_PASS)
}

/// Marquee whose messages each take one full pass, timed from their width
#[derive(Debug)]
pub struct TimedMarquee {
    messages: Vec<String>,
    index: usize,
    scroll: ScrollState,
    pass_started: Option<Instant>,
}

impl TimedMarquee {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            index: 0,
            scroll: ScrollState::default(),
            pass_started: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.messages.get(self.index).map(String::as_str)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Record measurements for the current message. A pass begins on the
    /// first call where both widths are positive.
    pub fn measure(&mut self, container_width: u16, content_width: u16, now: Instant) {
        self.scroll.container_width = container_width;
        self.scroll.content_width = content_width;

        if !self.scroll.is_measured() || self.messages.is_empty() {
            self.pass_started = None;
            return;
        }

        if self.pass_started.is_none() {
            self.scroll.position = f64::from(container_width);
            self.pass_started = Some(now);
        }
    }

    /// Position the current message along its pass. Once the pass duration
    /// has elapsed the next message takes over and waits to be measured.
    pub fn advance(&mut self, now: Instant) {
        let Some(started) = self.pass_started else {
            return;
        };

        let duration = pass_duration(self.scroll.content_width);
        let elapsed = now.saturating_duration_since(started);

        if elapsed >= duration {
            self.index = (self.index + 1) % self.messages.len();
            self.scroll.content_width = 0;
            self.scroll.position = f64::from(self.scroll.container_width);
            self.pass_started = None;
            return;
        }

        let travel = f64::from(self.scroll.container_width) + f64::from(self.scroll.content_width);
        let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
        self.scroll.position = f64::from(self.scroll.container_width) - travel * progress;
    }

    #[cfg(test)]
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn state(&self) -> TimerState {
        if self.pass_started.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn visible_text(&self) -> String {
        match (self.current(), self.pass_started) {
            (Some(text), Some(_)) => window(text, self.scroll.position, self.scroll.container_width),
            _ => String::new(),
        }
    }
}

/// Render `text` placed at `position` inside a container of `width` cells.
///
/// Offsets and widths are terminal cells. A wide grapheme cut by the left
/// edge leaves blank cells; one that doesn't fit on the right is dropped.
pub(crate) fn window(text: &str, position: f64, width: u16) -> String {
    let width = usize::from(width);
    let offset = position.round() as i64;

    let mut out = String::with_capacity(width);
    let (mut used, skip) = if offset >= 0 {
        let pad = (offset as usize).min(width);
        out.extend(std::iter::repeat(' ').take(pad));
        (pad, 0)
    } else {
        (0, offset.unsigned_abs() as usize)
    };

    // Cells of text consumed so far, visible or not
    let mut cursor = 0;
    for grapheme in text.graphemes(true) {
        if used >= width {
            break;
        }
        let end = cursor + grapheme.width();

        if end <= skip {
            // Entirely left of the container
        } else if cursor < skip {
            let blank = (end - skip).min(width - used);
            out.extend(std::iter::repeat(' ').take(blank));
            used += blank;
        } else if used + (end - cursor) > width {
            break;
        } else {
            out.push_str(grapheme);
            used += end - cursor;
        }
        cursor = end;
    }
    out
}
