//! The device layer a zone runs against, and the pass-through fallback.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use super::Mode;
use crate::common::constants::{CAPABILITY_DIM, CAPABILITY_TEMPERATURE};
use crate::interpolation::{ChannelResolver, LevelBounds, Levels};
use crate::schedule::{Channel, ScheduleKind};
use crate::sun::SunPosition;

/// Device capability a zone writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Dim,
    LightTemperature,
}

impl Capability {
    pub fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Brightness => Capability::Dim,
            Channel::Temperature => Capability::LightTemperature,
        }
    }

    /// Capability identifier on the device.
    pub fn id(self) -> &'static str {
        match self {
            Capability::Dim => CAPABILITY_DIM,
            Capability::LightTemperature => CAPABILITY_TEMPERATURE,
        }
    }
}

/// Everything a zone needs from the device-control layer.
///
/// Calls are made one at a time from a single refresh or settings update;
/// the host serializes those entry points. Any error returned here aborts the
/// running refresh and is passed back to the caller unchanged.
pub trait ZoneHost: LevelBounds {
    /// Stored schedule string for `timing` or `night_timing`.
    fn schedule_setting(&self, kind: ScheduleKind) -> Result<String>;

    /// Stored `fade_duration` setting in minutes.
    fn fade_duration_setting(&self) -> Result<f64>;

    fn mode(&self) -> Result<Mode>;

    fn current_brightness(&self) -> Result<f64>;

    fn current_temperature(&self) -> Result<f64>;

    /// Current instant, already in the zone's timezone.
    fn now(&self) -> DateTime<FixedOffset>;

    fn set_capability(&mut self, capability: Capability, value: f64) -> Result<()>;

    /// Fire the "values changed" trigger.
    fn trigger_values_changed(&mut self, brightness: f64, temperature: f64) -> Result<()>;
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefreshOutcome {
    /// The schedule could not be used; the fallback ran instead.
    Fallback,
    Unchanged(Levels),
    Changed(Levels),
}

/// Last values written per channel, used to skip redundant writes.
///
/// A channel with no recorded value is compared against the host's current
/// value instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChangeTracker {
    pub brightness: Option<f64>,
    pub temperature: Option<f64>,
}

impl ChangeTracker {
    fn last<H: ZoneHost + ?Sized>(&self, host: &H, channel: Channel) -> Result<f64> {
        match (channel, self.brightness, self.temperature) {
            (Channel::Brightness, Some(value), _) | (Channel::Temperature, _, Some(value)) => Ok(value),
            (Channel::Brightness, None, _) => host.current_brightness(),
            (Channel::Temperature, _, None) => host.current_temperature(),
        }
    }

    /// Write every channel that differs from its last value and fire the
    /// trigger when anything changed.
    ///
    /// The tracker is only updated once all writes and the trigger succeeded.
    pub fn emit<H: ZoneHost + ?Sized>(&mut self, host: &mut H, levels: Levels) -> Result<RefreshOutcome> {
        let mut changed = false;
        for channel in [Channel::Brightness, Channel::Temperature] {
            let target = levels.get(channel);
            let last = self.last(host, channel)?;
            if target != last {
                host.set_capability(Capability::for_channel(channel), target)?;
                log_decorated!("{} {last:.3} → {target:.3}", channel.name());
                changed = true;
            } else {
                log_debug!("No change in {} from {last:.3}", channel.name());
            }
        }

        if changed {
            host.trigger_values_changed(levels.brightness, levels.temperature)?;
        }

        self.brightness = Some(levels.brightness);
        self.temperature = Some(levels.temperature);

        Ok(if changed {
            RefreshOutcome::Changed(levels)
        } else {
            RefreshOutcome::Unchanged(levels)
        })
    }
}

/// Behavior used when the zone cannot interpolate: off mode, or a schedule
/// with fewer than two anchors.
pub trait Fallback {
    fn pass_through<H: ZoneHost + ?Sized>(
        &mut self,
        mode: Mode,
        host: &mut H,
        sun: &dyn SunPosition,
    ) -> Result<()>;
}

/// Leaves the device untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl Fallback for NoFallback {
    fn pass_through<H: ZoneHost + ?Sized>(
        &mut self,
        _mode: Mode,
        _host: &mut H,
        _sun: &dyn SunPosition,
    ) -> Result<()> {
        Ok(())
    }
}

/// Plain circadian zone: both channels follow the daylight curve (or the
/// night levels in night mode). Off mode leaves the device alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircadianFallback;

impl Fallback for CircadianFallback {
    fn pass_through<H: ZoneHost + ?Sized>(
        &mut self,
        mode: Mode,
        host: &mut H,
        sun: &dyn SunPosition,
    ) -> Result<()> {
        let Some(kind) = mode.schedule_kind() else {
            return Ok(());
        };
        let levels = ChannelResolver::new(kind, &*host, sun, host.now()).circadian_levels()?;
        ChangeTracker::default().emit(host, levels)?;
        Ok(())
    }
}
