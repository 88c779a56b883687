//! Time-of-day schedules of brightness and temperature anchors.
//!
//! A schedule is written by the user as a JSON object whose keys are
//! `H:MM`/`HH:MM` times in ascending order and whose values hold a brightness
//! and a temperature, each either a decimal in `[0, 1]` or `"circadian"`:
//!
//! ```json
//! {"07:00": {"brightness": "circadian", "temperature": "circadian"},
//!  "22:30": {"brightness": "0.1", "temperature": "0.9"}}
//! ```
//!
//! [`parse::check`] enforces the format once, when the setting is written.
//! Everything downstream trusts a [`Schedule`]: its anchors are sorted with
//! strictly increasing times and every literal is already inside `[0, 1]`.
//! The schedule behaves as a 24 hour cycle: the last anchor is followed by the
//! first one of the next day (see [`locate`]).

pub mod locate;
pub mod parse;
pub mod time;

use anyhow::Result;
use std::fmt;

use crate::common::constants::{CIRCADIAN_VALUE, MAXIMUM_LEVEL, MINIMUM_LEVEL, SETTING_NIGHT_TIMING, SETTING_TIMING};
pub use time::{TimeOfDay, circular_forward_distance, to_minutes};

/// One of the two independent outputs of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Brightness,
    Temperature,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Brightness => "brightness",
            Channel::Temperature => "temperature",
        }
    }
}

/// Target value of a channel at an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    /// Fixed level in `[0, 1]`.
    Literal(f64),
    /// Follow the natural daylight curve.
    Circadian,
}

impl ChannelValue {
    pub fn is_circadian(self) -> bool {
        matches!(self, ChannelValue::Circadian)
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Literal(level) => write!(f, "{level}"),
            ChannelValue::Circadian => f.write_str(CIRCADIAN_VALUE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub time: TimeOfDay,
    pub brightness: ChannelValue,
    pub temperature: ChannelValue,
}

impl Anchor {
    pub fn channel(&self, channel: Channel) -> ChannelValue {
        match channel {
            Channel::Brightness => self.brightness,
            Channel::Temperature => self.temperature,
        }
    }
}

/// Which of the zone's two schedules is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Daytime schedule used in adaptive mode.
    Adaptive,
    Night,
}

impl ScheduleKind {
    /// Name of the host setting that stores this schedule.
    pub fn setting_key(self) -> &'static str {
        match self {
            ScheduleKind::Adaptive => SETTING_TIMING,
            ScheduleKind::Night => SETTING_NIGHT_TIMING,
        }
    }
}

/// Sorted anchors with strictly increasing times.
///
/// Zero anchors means no schedule is set. A single anchor cannot be
/// interpolated; callers treat both cases as degenerate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    anchors: Vec<Anchor>,
}

impl Schedule {
    /// Build a schedule from anchors, checking the ordering and range rules
    /// that [`parse::check`] applies to serialized input.
    pub fn from_anchors(anchors: Vec<Anchor>) -> Result<Self> {
        for pair in anchors.windows(2) {
            if pair[1].time <= pair[0].time {
                anyhow::bail!(
                    "Time value {} is not after the previous time {}",
                    pair[1].time,
                    pair[0].time
                );
            }
        }
        for anchor in &anchors {
            for channel in [Channel::Brightness, Channel::Temperature] {
                check_level(anchor.channel(channel), channel, anchor.time)?;
            }
        }
        Ok(Self { anchors })
    }

    /// Anchors accepted in order by the parser, which already checked them.
    pub(crate) fn from_checked(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// At least two anchors, so a previous and a next anchor always exist.
    pub fn is_interpolable(&self) -> bool {
        self.anchors.len() >= 2
    }
}

pub(crate) fn check_level(value: ChannelValue, channel: Channel, time: TimeOfDay) -> Result<()> {
    if let ChannelValue::Literal(level) = value
        && !(MINIMUM_LEVEL..=MAXIMUM_LEVEL).contains(&level)
    {
        anyhow::bail!(
            "{} at {} must be between {} and {} (got {})",
            channel.name(),
            time,
            MINIMUM_LEVEL,
            MAXIMUM_LEVEL,
            level
        );
    }
    Ok(())
}
