//! Configuration validation.
//!
//! Rejects values the engine could not use sensibly: levels outside
//! `[0, 1]`, inverted ranges, schedules that fail the format check, and
//! incomplete or impossible daylight settings.

use anyhow::{Context, Result};

use super::{Config, parse_clock};
use crate::common::constants::*;
use crate::schedule::{ScheduleKind, parse};

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(minutes) = config.fade_duration
        && !(MINIMUM_FADE_DURATION..=MAXIMUM_FADE_DURATION).contains(&minutes)
    {
        anyhow::bail!(
            "fade_duration ({} minutes) must be between {} and {} minutes",
            minutes,
            MINIMUM_FADE_DURATION,
            MAXIMUM_FADE_DURATION
        );
    }

    for (name, value) in [
        ("min_brightness", config.min_brightness),
        ("max_brightness", config.max_brightness),
        ("noon_temperature", config.noon_temperature),
        ("sunset_temperature", config.sunset_temperature),
        ("night_brightness", config.night_brightness),
        ("night_temperature", config.night_temperature),
    ] {
        if let Some(level) = value
            && !(MINIMUM_LEVEL..=MAXIMUM_LEVEL).contains(&level)
        {
            anyhow::bail!(
                "{} ({}) must be between {} and {}",
                name,
                level,
                MINIMUM_LEVEL,
                MAXIMUM_LEVEL
            );
        }
    }

    let min = config.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS);
    let max = config.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS);
    if min > max {
        anyhow::bail!("min_brightness ({min}) cannot be greater than max_brightness ({max})");
    }

    for kind in [ScheduleKind::Adaptive, ScheduleKind::Night] {
        parse::check(config.schedule(kind))
            .with_context(|| format!("Invalid {} schedule", kind.setting_key()))?;
    }

    validate_daylight(config)?;

    config.timezone()?;
    Ok(())
}

fn validate_daylight(config: &Config) -> Result<()> {
    match (config.latitude, config.longitude) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
            }
            if !(-180.0..=180.0).contains(&lon) {
                anyhow::bail!("longitude must be between -180 and 180 degrees (got {})", lon);
            }
            Ok(())
        }
        (Some(_), None) | (None, Some(_)) => {
            anyhow::bail!("latitude and longitude must be set together")
        }
        (None, None) => {
            let sunrise = parse_clock(config.sunrise.as_deref().unwrap_or(DEFAULT_SUNRISE), "sunrise")?;
            let sunset = parse_clock(config.sunset.as_deref().unwrap_or(DEFAULT_SUNSET), "sunset")?;
            if sunrise >= sunset {
                anyhow::bail!(
                    "sunrise ({}) must be earlier in the day than sunset ({})",
                    sunrise,
                    sunset
                );
            }
            Ok(())
        }
    }
}
