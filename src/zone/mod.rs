//! Zone state machine: mode selection, schedule storage and refresh cycles.
//!
//! A zone owns two schedules, one for adaptive (daytime) mode and one for
//! night mode. Each refresh reads the device mode, brackets the current time
//! in the mode's schedule, blends the anchor values and writes whichever
//! channels changed. When no usable schedule exists the injected
//! [`Fallback`] runs instead.
//!
//! Settings updates are checked in full before anything is replaced, so a
//! rejected update leaves the zone exactly as it was.

pub mod host;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::constants::{SETTING_FADE_DURATION, SETTING_NIGHT_TIMING, SETTING_TIMING, TIMING_ERROR_KEY};
use crate::interpolation::{ChannelResolver, fade_weight};
use crate::schedule::{Schedule, ScheduleKind, TimeOfDay, locate, parse};
use crate::sun::SunPosition;
pub use host::{Capability, ChangeTracker, CircadianFallback, Fallback, NoFallback, RefreshOutcome, ZoneHost};

/// Device mode, switched by the user through the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Manual control; the zone does not compute values.
    #[serde(alias = "manual")]
    Off,
    Adaptive,
    Night,
}

impl Mode {
    /// Schedule driving this mode, `None` for off.
    pub fn schedule_kind(self) -> Option<ScheduleKind> {
        match self {
            Mode::Off => None,
            Mode::Adaptive => Some(ScheduleKind::Adaptive),
            Mode::Night => Some(ScheduleKind::Night),
        }
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "adaptive" => Ok(Mode::Adaptive),
            "night" => Ok(Mode::Night),
            "off" | "manual" => Ok(Mode::Off),
            other => anyhow::bail!("Unknown mode {other:?} (expected adaptive, night or off)"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Off => "off",
            Mode::Adaptive => "adaptive",
            Mode::Night => "night",
        })
    }
}

/// Errors reported from a settings update.
#[derive(Debug, Error)]
pub enum ZoneError {
    /// A schedule string failed validation. The message key is meant for the
    /// user-facing translation lookup.
    #[error("{}: {key} rejected: {reason}", TIMING_ERROR_KEY)]
    InvalidTiming { key: &'static str, reason: String },

    #[error("setting {key} has an unusable value: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

impl ZoneError {
    /// Localization key for the message shown to the user.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            ZoneError::InvalidTiming { .. } => Some(TIMING_ERROR_KEY),
            ZoneError::InvalidSetting { .. } => None,
        }
    }
}

/// Changed settings delivered by the host. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub timing: Option<String>,
    pub night_timing: Option<String>,
    pub fade_duration: Option<f64>,
}

impl SettingsUpdate {
    /// Pick the changed keys out of the host's full new settings object.
    /// Unknown keys belong to other layers and are ignored.
    pub fn from_changed_keys<S: AsRef<str>>(
        new_settings: &Map<String, Value>,
        changed_keys: &[S],
    ) -> Result<Self, ZoneError> {
        let mut update = SettingsUpdate::default();
        for key in changed_keys.iter().map(AsRef::as_ref) {
            match key {
                SETTING_TIMING => update.timing = Some(string_setting(new_settings, SETTING_TIMING)?),
                SETTING_NIGHT_TIMING => {
                    update.night_timing = Some(string_setting(new_settings, SETTING_NIGHT_TIMING)?)
                }
                SETTING_FADE_DURATION => {
                    let value = new_settings.get(SETTING_FADE_DURATION).and_then(Value::as_f64);
                    update.fade_duration = Some(value.ok_or_else(|| ZoneError::InvalidSetting {
                        key: SETTING_FADE_DURATION,
                        reason: "expected a number of minutes".to_string(),
                    })?);
                }
                _ => {}
            }
        }
        Ok(update)
    }
}

fn string_setting(settings: &Map<String, Value>, key: &'static str) -> Result<String, ZoneError> {
    match settings.get(key) {
        Some(Value::String(raw)) => Ok(raw.clone()),
        None | Some(Value::Null) => Ok(String::new()),
        Some(other) => Err(ZoneError::InvalidTiming {
            key,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

/// Mutable state of a zone. The host persists settings; this is rebuilt
/// from them on start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneState {
    pub adaptive: Schedule,
    pub night: Schedule,
    /// Minutes; `None` until first read from the host.
    pub fade_duration: Option<f64>,
    pub last_emitted: ChangeTracker,
}

impl ZoneState {
    pub fn schedule(&self, kind: ScheduleKind) -> &Schedule {
        match kind {
            ScheduleKind::Adaptive => &self.adaptive,
            ScheduleKind::Night => &self.night,
        }
    }
}

pub struct Zone<F: Fallback = NoFallback> {
    state: ZoneState,
    fallback: F,
}

impl<F: Fallback> Zone<F> {
    pub fn new(fallback: F) -> Self {
        Self {
            state: ZoneState::default(),
            fallback,
        }
    }

    /// Build a zone from the host's stored settings.
    ///
    /// A stored schedule that does not parse is logged and left empty, so the
    /// zone falls back instead of failing to start.
    pub fn init<H: ZoneHost + ?Sized>(host: &H, fallback: F) -> Result<Self> {
        let mut zone = Self::new(fallback);
        for kind in [ScheduleKind::Adaptive, ScheduleKind::Night] {
            let raw = host
                .schedule_setting(kind)
                .with_context(|| format!("Failed to read the {} setting", kind.setting_key()))?;
            let schedule = match parse::parse(&raw) {
                Ok(schedule) => schedule,
                Err(e) => {
                    log_warning!("Ignoring stored {} schedule: {e:#}", kind.setting_key());
                    Schedule::default()
                }
            };
            *zone.schedule_mut(kind) = schedule;
        }
        log_decorated!(
            "Zone initialized with {} adaptive and {} night anchors",
            zone.state.adaptive.len(),
            zone.state.night.len()
        );
        Ok(zone)
    }

    pub fn state(&self) -> &ZoneState {
        &self.state
    }

    fn schedule_mut(&mut self, kind: ScheduleKind) -> &mut Schedule {
        match kind {
            ScheduleKind::Adaptive => &mut self.state.adaptive,
            ScheduleKind::Night => &mut self.state.night,
        }
    }

    /// Apply changed settings. Every changed schedule is validated before any
    /// of them replaces the current one.
    pub fn apply_settings(&mut self, update: &SettingsUpdate) -> Result<(), ZoneError> {
        let adaptive = update
            .timing
            .as_deref()
            .map(|raw| accept_schedule(ScheduleKind::Adaptive, raw))
            .transpose()?;
        let night = update
            .night_timing
            .as_deref()
            .map(|raw| accept_schedule(ScheduleKind::Night, raw))
            .transpose()?;

        if let Some(schedule) = adaptive {
            log_decorated!("Adaptive schedule updated ({} anchors)", schedule.len());
            self.state.adaptive = schedule;
        }
        if let Some(schedule) = night {
            log_decorated!("Night schedule updated ({} anchors)", schedule.len());
            self.state.night = schedule;
        }
        if let Some(minutes) = update.fade_duration {
            log_decorated!("Fade duration set to {minutes} minutes");
            self.state.fade_duration = Some(minutes);
        }
        Ok(())
    }

    /// Record a brightness the user applied directly, so the next refresh
    /// compares against it.
    pub fn override_brightness(&mut self, value: f64) {
        log_decorated!("Brightness override to {value:.3}");
        self.state.last_emitted.brightness = Some(value);
    }

    pub fn override_temperature(&mut self, value: f64) {
        log_decorated!("Temperature override to {value:.3}");
        self.state.last_emitted.temperature = Some(value);
    }

    /// Fade duration in minutes, read from the host on first use.
    pub fn fade_duration<H: ZoneHost + ?Sized>(&mut self, host: &H) -> Result<f64> {
        match self.state.fade_duration {
            Some(minutes) => Ok(minutes),
            None => {
                let minutes = host
                    .fade_duration_setting()
                    .context("Failed to read the fade_duration setting")?;
                self.state.fade_duration = Some(minutes);
                Ok(minutes)
            }
        }
    }

    /// Run one refresh cycle.
    pub fn refresh<H: ZoneHost + ?Sized>(
        &mut self,
        host: &mut H,
        sun: &dyn SunPosition,
    ) -> Result<RefreshOutcome> {
        let mode = host.mode()?;
        let Some(kind) = mode.schedule_kind() else {
            return self.fall_back(mode, host, sun);
        };

        let now = host.now();
        let time = TimeOfDay::from_time(&now);
        let schedule = self.state.schedule(kind);
        let Some((prev, next)) = locate::bracket(schedule, time).map(|(prev, next)| (*prev, *next)) else {
            log_debug!(
                "{} schedule has {} anchor(s), using fallback",
                kind.setting_key(),
                schedule.len()
            );
            return self.fall_back(mode, host, sun);
        };

        let fade_duration = self.fade_duration(&*host)?;
        let weight = fade_weight(prev.time, next.time, fade_duration, time);
        log_debug!("{time}: between {} and {}, fade weight {weight:.3}", prev.time, next.time);
        let levels = ChannelResolver::new(kind, &*host, sun, now).levels(&prev, &next, weight)?;

        let mut tracker = self.state.last_emitted;
        let outcome = tracker.emit(host, levels)?;
        self.state.last_emitted = tracker;
        Ok(outcome)
    }

    fn fall_back<H: ZoneHost + ?Sized>(
        &mut self,
        mode: Mode,
        host: &mut H,
        sun: &dyn SunPosition,
    ) -> Result<RefreshOutcome> {
        self.fallback.pass_through(mode, host, sun)?;
        // The fallback may have written the device; compare with the host next time.
        self.state.last_emitted = ChangeTracker::default();
        Ok(RefreshOutcome::Fallback)
    }
}

fn accept_schedule(kind: ScheduleKind, raw: &str) -> Result<Schedule, ZoneError> {
    let reject = |e: anyhow::Error| {
        log_warning!("Rejected {} setting: {e:#}", kind.setting_key());
        ZoneError::InvalidTiming {
            key: kind.setting_key(),
            reason: format!("{e:#}"),
        }
    };
    parse::check(raw).map_err(reject)?;
    parse::parse(raw).map_err(reject)
}
