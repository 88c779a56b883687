//! Host backed by the configuration file, writing to the console.
//!
//! Capabilities live in memory and every write is logged, which is all the
//! CLI commands need to show what a real device would receive.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::common::constants::*;
use crate::config::Config;
use crate::interpolation::{LevelBounds, Levels};
use crate::schedule::{ScheduleKind, TimeOfDay};
use crate::time_source;
use crate::zone::{Capability, Mode, ZoneHost};

pub struct ConsoleHost {
    config: Config,
    timezone: Option<Tz>,
    /// Fixed instant used instead of the time source.
    pinned: Option<DateTime<FixedOffset>>,
    levels: Levels,
    triggers: usize,
}

impl ConsoleHost {
    pub fn new(config: Config) -> Result<Self> {
        let timezone = config.timezone()?;
        Ok(Self {
            config,
            timezone,
            pinned: None,
            levels: Levels {
                brightness: 0.0,
                temperature: 0.0,
            },
            triggers: 0,
        })
    }

    /// Always report `instant` as the current time.
    pub fn pin_clock(&mut self, instant: DateTime<FixedOffset>) {
        self.pinned = Some(instant);
    }

    pub fn levels(&self) -> Levels {
        self.levels
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers
    }

    /// `time` on the current date in the zone's timezone.
    pub fn instant_today(&self, time: TimeOfDay) -> Result<DateTime<FixedOffset>> {
        let today = self.now().date_naive();
        let naive = today
            .and_hms_opt(time.hour(), time.minute(), 0)
            .with_context(|| format!("Invalid time {time}"))?;
        match self.timezone {
            Some(tz) => resolve_local(&tz, &naive),
            None => resolve_local(&Local, &naive),
        }
    }
}

/// Earliest instant for a local wall-clock time, skipping over DST gaps.
fn resolve_local<Z: TimeZone>(tz: &Z, naive: &NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .with_context(|| format!("{naive} does not exist in the zone's timezone"))
}

impl LevelBounds for ConsoleHost {
    fn min_brightness(&self) -> Result<f64> {
        Ok(self.config.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS))
    }

    fn max_brightness(&self) -> Result<f64> {
        Ok(self.config.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS))
    }

    fn noon_temperature(&self) -> Result<f64> {
        Ok(self.config.noon_temperature.unwrap_or(DEFAULT_NOON_TEMPERATURE))
    }

    fn sunset_temperature(&self) -> Result<f64> {
        Ok(self.config.sunset_temperature.unwrap_or(DEFAULT_SUNSET_TEMPERATURE))
    }

    fn night_brightness(&self) -> Result<f64> {
        Ok(self.config.night_brightness.unwrap_or(DEFAULT_NIGHT_BRIGHTNESS))
    }

    fn night_temperature(&self) -> Result<f64> {
        Ok(self.config.night_temperature.unwrap_or(DEFAULT_NIGHT_TEMPERATURE))
    }
}

impl ZoneHost for ConsoleHost {
    fn schedule_setting(&self, kind: ScheduleKind) -> Result<String> {
        Ok(self.config.schedule(kind).to_string())
    }

    fn fade_duration_setting(&self) -> Result<f64> {
        Ok(self.config.fade_duration.unwrap_or(DEFAULT_FADE_DURATION))
    }

    fn mode(&self) -> Result<Mode> {
        Ok(self.config.mode.unwrap_or(DEFAULT_MODE))
    }

    fn current_brightness(&self) -> Result<f64> {
        Ok(self.levels.brightness)
    }

    fn current_temperature(&self) -> Result<f64> {
        Ok(self.levels.temperature)
    }

    fn now(&self) -> DateTime<FixedOffset> {
        if let Some(instant) = self.pinned {
            return instant;
        }
        let now = time_source::now();
        match self.timezone {
            Some(tz) => now.with_timezone(&tz).fixed_offset(),
            None => now.fixed_offset(),
        }
    }

    fn set_capability(&mut self, capability: Capability, value: f64) -> Result<()> {
        match capability {
            Capability::Dim => self.levels.brightness = value,
            Capability::LightTemperature => self.levels.temperature = value,
        }
        log_indented!("{} = {value:.3}", capability.id());
        Ok(())
    }

    fn trigger_values_changed(&mut self, brightness: f64, temperature: f64) -> Result<()> {
        self.triggers += 1;
        log_decorated!("Values changed: brightness {brightness:.3}, temperature {temperature:.3}");
        Ok(())
    }
}
