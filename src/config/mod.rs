//! Configuration for the `circadian-zone` binary.
//!
//! The engine takes its settings from a host; the binary's host reads them
//! from `circadian-zone.toml`:
//!
//! ```toml
//! mode = "adaptive"          # "adaptive", "night" or "off"
//! fade_duration = 30         # Minutes before an anchor the fade starts (0-1440)
//!
//! # Schedules, in the same JSON format the device settings use
//! timing = '{"07:00":{"brightness":"circadian","temperature":"circadian"},"22:30":{"brightness":"0.1","temperature":"0.9"}}'
//! night_timing = ''
//!
//! #[Circadian bounds] all levels in 0.0-1.0
//! min_brightness = 0.1
//! max_brightness = 1.0
//! noon_temperature = 0.0     # Coolest, reached at solar noon
//! sunset_temperature = 1.0   # Warmest, reached at sunset
//! night_brightness = 0.1     # Circadian brightness on the night schedule
//! night_temperature = 1.0
//!
//! #[Daylight] coordinates take precedence over fixed times
//! latitude = 52.3676
//! longitude = 4.9041
//! sunrise = "06:00:00"
//! sunset = "19:00:00"
//! timezone = "Europe/Amsterdam"
//! ```
//!
//! Every field is optional. Values are validated before defaults fill the
//! gaps, so an error always names a value the user actually wrote.

pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::common::constants::*;
use crate::schedule::ScheduleKind;
use crate::sun::SolarCurve;
use crate::zone::Mode;

pub use loading::{get_config_path, load, load_from_path};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub mode: Option<Mode>,
    pub fade_duration: Option<f64>,
    pub timing: Option<String>,
    pub night_timing: Option<String>,

    pub min_brightness: Option<f64>,
    pub max_brightness: Option<f64>,
    pub noon_temperature: Option<f64>,
    pub sunset_temperature: Option<f64>,
    pub night_brightness: Option<f64>,
    pub night_temperature: Option<f64>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub timezone: Option<String>,
}

impl Config {
    pub fn load(config_dir: Option<&std::path::Path>) -> Result<Self> {
        load(config_dir)
    }

    /// Fill every unset field that has a default.
    pub fn apply_defaults(&mut self) {
        self.mode.get_or_insert(DEFAULT_MODE);
        self.fade_duration.get_or_insert(DEFAULT_FADE_DURATION);
        self.timing.get_or_insert_with(String::new);
        self.night_timing.get_or_insert_with(String::new);
        self.min_brightness.get_or_insert(DEFAULT_MIN_BRIGHTNESS);
        self.max_brightness.get_or_insert(DEFAULT_MAX_BRIGHTNESS);
        self.noon_temperature.get_or_insert(DEFAULT_NOON_TEMPERATURE);
        self.sunset_temperature.get_or_insert(DEFAULT_SUNSET_TEMPERATURE);
        self.night_brightness.get_or_insert(DEFAULT_NIGHT_BRIGHTNESS);
        self.night_temperature.get_or_insert(DEFAULT_NIGHT_TEMPERATURE);
        self.sunrise.get_or_insert_with(|| DEFAULT_SUNRISE.to_string());
        self.sunset.get_or_insert_with(|| DEFAULT_SUNSET.to_string());
    }

    pub fn schedule(&self, kind: ScheduleKind) -> &str {
        match kind {
            ScheduleKind::Adaptive => self.timing.as_deref().unwrap_or_default(),
            ScheduleKind::Night => self.night_timing.as_deref().unwrap_or_default(),
        }
    }

    /// Daylight curve: geographic when coordinates are set, fixed times otherwise.
    pub fn solar_curve(&self) -> Result<SolarCurve> {
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            return Ok(SolarCurve::Geo {
                latitude,
                longitude,
            });
        }
        Ok(SolarCurve::Manual {
            sunrise: parse_clock(self.sunrise.as_deref().unwrap_or(DEFAULT_SUNRISE), "sunrise")?,
            sunset: parse_clock(self.sunset.as_deref().unwrap_or(DEFAULT_SUNSET), "sunset")?,
        })
    }

    /// Configured timezone, `None` for the system's local zone.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow::anyhow!("Unknown timezone {name:?}: {e}"))
            })
            .transpose()
    }

    /// Print the effective configuration.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Mode: {}", self.mode.unwrap_or(DEFAULT_MODE));
        log_indented!(
            "Fade duration: {} minutes",
            self.fade_duration.unwrap_or(DEFAULT_FADE_DURATION)
        );
        for kind in [ScheduleKind::Adaptive, ScheduleKind::Night] {
            let raw = self.schedule(kind);
            if raw.is_empty() {
                log_indented!("{}: not set", kind.setting_key());
            } else {
                log_indented!("{}: {raw}", kind.setting_key());
            }
        }
        log_indented!(
            "Brightness range: {:.2} - {:.2}",
            self.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS),
            self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS)
        );
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => log_indented!("Daylight from coordinates {lat:.4}°, {lon:.4}°"),
            _ => log_indented!(
                "Daylight from {} to {}",
                self.sunrise.as_deref().unwrap_or(DEFAULT_SUNRISE),
                self.sunset.as_deref().unwrap_or(DEFAULT_SUNSET)
            ),
        }
        if let Some(tz) = &self.timezone {
            log_indented!("Timezone: {tz}");
        }
    }
}

pub(crate) fn parse_clock(value: &str, field: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .with_context(|| format!("Invalid {field} time {value:?}, expected HH:MM:SS"))
}

#[cfg(test)]
mod tests;
