//! Fade weights between anchors and resolution of channel values.
//!
//! Output stays on the previous anchor's value until the fade window opens
//! `fade_duration` minutes before the next anchor, then ramps linearly to
//! reach the next anchor's value exactly at its time. A fade never starts
//! before the previous anchor: the window is capped at the gap between them.
//!
//! Circadian values are resolved through the daylight curve. The previous
//! anchor is evaluated at the current instant, the next anchor at its own
//! upcoming time. When both bracketing values of a channel are circadian the
//! curve already provides a continuous value, so no fade is applied.

use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset};

use crate::schedule::{Anchor, Channel, ChannelValue, ScheduleKind, TimeOfDay, circular_forward_distance};
use crate::sun::SunPosition;

/// Level bounds the circadian curve is mapped onto.
///
/// Implemented by the host; values are read when a circadian value is
/// resolved, so changes to the host's configuration apply on the next cycle.
pub trait LevelBounds {
    fn min_brightness(&self) -> Result<f64>;
    fn max_brightness(&self) -> Result<f64>;
    fn noon_temperature(&self) -> Result<f64>;
    fn sunset_temperature(&self) -> Result<f64>;
    fn night_brightness(&self) -> Result<f64>;
    fn night_temperature(&self) -> Result<f64>;
}

/// A resolved brightness and temperature pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub brightness: f64,
    pub temperature: f64,
}

impl Levels {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Brightness => self.brightness,
            Channel::Temperature => self.temperature,
        }
    }
}

/// Weight of the next anchor's value at `now`, in `[0, 1]`.
pub fn fade_weight(prev: TimeOfDay, next: TimeOfDay, fade_duration: f64, now: TimeOfDay) -> f64 {
    let span = f64::from(circular_forward_distance(prev, next));
    let effective = fade_duration.min(span);
    let remaining = f64::from(circular_forward_distance(now, next));

    if remaining > effective {
        return 0.0;
    }
    if effective == 0.0 {
        return 1.0;
    }
    (effective - remaining) / effective
}

/// Which side of the bracket an anchor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Previous,
    Next,
}

/// Resolves anchor values for one refresh cycle.
pub struct ChannelResolver<'a, B: LevelBounds + ?Sized> {
    kind: ScheduleKind,
    bounds: &'a B,
    sun: &'a dyn SunPosition,
    now: DateTime<FixedOffset>,
}

impl<'a, B: LevelBounds + ?Sized> ChannelResolver<'a, B> {
    pub fn new(
        kind: ScheduleKind,
        bounds: &'a B,
        sun: &'a dyn SunPosition,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            kind,
            bounds,
            sun,
            now,
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// Circadian value of a channel at `at`.
    ///
    /// The night schedule maps circadian values to the fixed night levels
    /// without consulting the daylight curve.
    pub fn circadian(&self, channel: Channel, at: DateTime<FixedOffset>) -> Result<f64> {
        if self.kind == ScheduleKind::Night {
            return match channel {
                Channel::Brightness => self.bounds.night_brightness(),
                Channel::Temperature => self.bounds.night_temperature(),
            };
        }

        let progress = self.sun.percentage_at(at)?.filter(|p| *p > 0.0);
        match channel {
            Channel::Brightness => {
                let min = self.bounds.min_brightness()?;
                Ok(match progress {
                    Some(p) => min + (self.bounds.max_brightness()? - min) * p,
                    None => min,
                })
            }
            Channel::Temperature => {
                let sunset = self.bounds.sunset_temperature()?;
                Ok(match progress {
                    Some(p) => {
                        let noon = self.bounds.noon_temperature()?;
                        noon + (sunset - noon) * (1.0 - p)
                    }
                    None => sunset,
                })
            }
        }
    }

    /// Value of one anchor's channel as seen from the current instant.
    pub fn resolve(&self, anchor: &Anchor, channel: Channel, side: Side) -> Result<f64> {
        match anchor.channel(channel) {
            ChannelValue::Literal(level) => Ok(level),
            ChannelValue::Circadian => {
                let at = match side {
                    Side::Previous => self.now,
                    Side::Next => {
                        let ahead = circular_forward_distance(TimeOfDay::from_time(&self.now), anchor.time);
                        self.now + Duration::minutes(i64::from(ahead))
                    }
                };
                self.circadian(channel, at)
            }
        }
    }

    /// Final value of a channel between `prev` and `next` at the given weight.
    pub fn channel_value(&self, prev: &Anchor, next: &Anchor, channel: Channel, weight: f64) -> Result<f64> {
        if prev.channel(channel).is_circadian() && next.channel(channel).is_circadian() {
            return self.circadian(channel, self.now);
        }
        let from = self.resolve(prev, channel, Side::Previous)?;
        let to = self.resolve(next, channel, Side::Next)?;
        Ok(from * (1.0 - weight) + to * weight)
    }

    /// Both channels between `prev` and `next`.
    pub fn levels(&self, prev: &Anchor, next: &Anchor, weight: f64) -> Result<Levels> {
        Ok(Levels {
            brightness: self.channel_value(prev, next, Channel::Brightness, weight)?,
            temperature: self.channel_value(prev, next, Channel::Temperature, weight)?,
        })
    }

    /// Both channels straight from the daylight curve at the current instant.
    pub fn circadian_levels(&self) -> Result<Levels> {
        Ok(Levels {
            brightness: self.circadian(Channel::Brightness, self.now)?,
            temperature: self.circadian(Channel::Temperature, self.now)?,
        })
    }
}
