//! Wall-clock time of day on a circular 24 hour scale.

use anyhow::Result;
use chrono::Timelike;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::common::constants::MINUTES_PER_DAY;

/// `H:MM` or `HH:MM`, hour 0-23, minute 0-59.
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]|0[0-9]|1[0-9]|2[0-3]):([0-5][0-9])$")
        .expect("time pattern is a valid regex")
});

/// An hour and minute of the day.
///
/// Ordering follows minutes since midnight, so `23:59` is the greatest value
/// and `00:00` the least. Distances between two times wrap past midnight, see
/// [`circular_forward_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Returns `None` when the hour or minute is out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Build from a minutes-since-midnight count, wrapping at 24 hours.
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// Truncate any chrono time or datetime to its hour and minute.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes since midnight, in `0..1440`.
    pub fn to_minutes(self) -> u32 {
        to_minutes(self)
    }
}

/// Minutes since midnight, in `0..1440`.
pub fn to_minutes(time: TimeOfDay) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minutes walked forward from `from` until the clock reads `to`.
///
/// Wraps past midnight, so the result is always in `0..1440` and is zero
/// only when both times are equal.
pub fn circular_forward_distance(from: TimeOfDay, to: TimeOfDay) -> u32 {
    (to_minutes(to) + MINUTES_PER_DAY - to_minutes(from)) % MINUTES_PER_DAY
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = TIME_PATTERN
            .captures(s)
            .ok_or_else(|| anyhow::anyhow!("Time value {s:?} is not a valid H:MM or HH:MM time"))?;
        let hour: u32 = captures[1].parse()?;
        let minute: u32 = captures[2].parse()?;
        TimeOfDay::new(hour, minute)
            .ok_or_else(|| anyhow::anyhow!("Time value {s:?} is out of range"))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_to_minutes_bounds() {
        assert_eq!(to_minutes(t(0, 0)), 0);
        assert_eq!(to_minutes(t(12, 30)), 750);
        assert_eq!(to_minutes(t(23, 59)), 1439);
    }

    #[test]
    fn test_circular_distance_same_day() {
        assert_eq!(circular_forward_distance(t(12, 30), t(20, 0)), 450);
        assert_eq!(circular_forward_distance(t(19, 45), t(20, 0)), 15);
    }

    #[test]
    fn test_circular_distance_wraps_midnight() {
        assert_eq!(circular_forward_distance(t(23, 0), t(1, 0)), 120);
        assert_eq!(circular_forward_distance(t(20, 0), t(6, 0)), 600);
        assert_eq!(circular_forward_distance(t(0, 1), t(0, 0)), 1439);
    }

    #[test]
    fn test_circular_distance_zero_only_for_equal_times() {
        assert_eq!(circular_forward_distance(t(7, 15), t(7, 15)), 0);
        assert_ne!(circular_forward_distance(t(7, 15), t(7, 16)), 0);
    }

    #[test]
    fn test_parse_accepts_short_and_padded_hours() {
        assert_eq!("7:05".parse::<TimeOfDay>().unwrap(), t(7, 5));
        assert_eq!("07:05".parse::<TimeOfDay>().unwrap(), t(7, 5));
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap(), t(23, 59));
        assert_eq!("0:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn test_parse_rejects_bad_times() {
        for bad in ["25:00", "24:00", "12:60", "12:5", "123:00", "12-00", " 12:00", "", "ab:cd"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(t(6, 0).to_string(), "06:00");
        assert_eq!(t(22, 30).to_string(), "22:30");
    }

    #[test]
    fn test_ordering_follows_minutes() {
        assert!(t(9, 0) > t(8, 59));
        assert!(t(0, 0) < t(23, 59));
        assert_eq!(TimeOfDay::from_minutes(1440 + 61), t(1, 1));
    }
}
