//! Date range demo page state

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::DateRangeError;

/// An inclusive range of calendar days with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days in the range, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn nights(&self) -> i64 {
        self.days() - 1
    }

    pub fn weekend_days(&self) -> i64 {
        self.start
            .iter_days()
            .take(self.days() as usize)
            .filter(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as i64
    }

    pub fn weekdays(&self) -> i64 {
        self.days() - self.weekend_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// Interactive range picker. Moving one endpoint past the other drags it along.
#[derive(Debug, Clone)]
pub struct DateRangeDemo {
    range: DateRange,
    pub focus: Endpoint,
}

impl DateRangeDemo {
    /// A one-week range starting on `today`
    pub fn new(today: NaiveDate) -> Self {
        let end = today + Duration::days(6);
        Self {
            range: DateRange { start: today, end },
            focus: Endpoint::Start,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        };
    }

    /// Shift the focused endpoint by `days` (negative moves back)
    pub fn shift(&mut self, days: i64) {
        let delta = Duration::days(days);
        let DateRange { mut start, mut end } = self.range;

        match self.focus {
            Endpoint::Start => {
                start = start.checked_add_signed(delta).unwrap_or(start);
                end = end.max(start);
            }
            Endpoint::End => {
                end = end.checked_add_signed(delta).unwrap_or(end);
                start = start.min(end);
            }
        }

        self.range = DateRange::new(start, end).unwrap_or(self.range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted() {
        let err = DateRange::new(date(2024, 5, 10), date(2024, 5, 9)).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::Inverted {
                start: "2024-05-10".to_string(),
                end: "2024-05-09".to_string(),
            }
        );
    }

    #[test]
    fn test_range_counts() {
        // Mon 6 May to Sun 19 May 2024
        let range = DateRange::new(date(2024, 5, 6), date(2024, 5, 19)).unwrap();
        assert_eq!(range.days(), 14);
        assert_eq!(range.nights(), 13);
        assert_eq!(range.weekend_days(), 4);
        assert_eq!(range.weekdays(), 10);

        let single = DateRange::new(date(2024, 5, 11), date(2024, 5, 11)).unwrap();
        assert_eq!(single.days(), 1);
        assert_eq!(single.nights(), 0);
        assert_eq!(single.weekend_days(), 1);
    }

    #[test]
    fn test_demo_starts_with_a_week() {
        let demo = DateRangeDemo::new(date(2024, 2, 26));
        assert_eq!(demo.range().end(), date(2024, 3, 3));
        assert_eq!(demo.range().days(), 7);
    }

    #[test]
    fn test_shift_drags_other_endpoint() {
        let mut demo = DateRangeDemo::new(date(2024, 1, 1));

        demo.shift(10);
        assert_eq!(demo.range().start(), date(2024, 1, 11));
        assert_eq!(demo.range().end(), date(2024, 1, 11), "End dragged forward");

        demo.toggle_focus();
        demo.shift(-20);
        assert_eq!(demo.range().end(), date(2023, 12, 22));
        assert_eq!(demo.range().start(), date(2023, 12, 22), "Start dragged back");

        demo.shift(7);
        assert_eq!(demo.range().days(), 8);
    }
}
