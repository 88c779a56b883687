//! Reading and writing the serialized schedule format.
//!
//! Validation runs when a schedule setting is written; parsing runs on that
//! write and again whenever a zone is initialized from stored settings. Both
//! walk the JSON object in document order, which must already be ascending
//! time order: nothing here sorts.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Anchor, Channel, ChannelValue, Schedule, TimeOfDay, check_level};
use crate::common::constants::CIRCADIAN_VALUE;

/// Wire form of one entry's values.
#[derive(Debug, Deserialize)]
struct RawEntry {
    brightness: RawLevel,
    temperature: RawLevel,
}

/// Levels are normally strings; plain JSON numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Text(String),
    Number(f64),
}

impl RawLevel {
    fn into_value(self, channel: Channel, time: TimeOfDay) -> Result<ChannelValue> {
        let value = match self {
            RawLevel::Text(text) if text == CIRCADIAN_VALUE => ChannelValue::Circadian,
            RawLevel::Text(text) => {
                let level = text.trim().parse::<f64>().with_context(|| {
                    format!("{} at {time} is neither a number nor \"{CIRCADIAN_VALUE}\": {text:?}", channel.name())
                })?;
                ChannelValue::Literal(level)
            }
            RawLevel::Number(level) => ChannelValue::Literal(level),
        };
        check_level(value, channel, time)?;
        Ok(value)
    }
}

/// Explain why `raw` is not an acceptable schedule.
///
/// The empty string is accepted and means "no schedule".
pub fn check(raw: &str) -> Result<()> {
    decode(raw).map(|_| ())
}

/// Boolean form of [`check`]. Rejections are logged at debug level.
pub fn validate(raw: &str) -> bool {
    match check(raw) {
        Ok(()) => true,
        Err(e) => {
            log_debug!("Rejected schedule: {e:#}");
            false
        }
    }
}

/// Turn a stored schedule into anchors, in document order.
///
/// Empty input yields an empty schedule. Input that would break the
/// schedule's ordering or range rules is an error rather than a corrupt
/// schedule.
pub fn parse(raw: &str) -> Result<Schedule> {
    decode(raw)
}

fn decode(raw: &str) -> Result<Schedule> {
    if raw.is_empty() {
        return Ok(Schedule::default());
    }

    let entries: Map<String, Value> =
        serde_json::from_str(raw).context("Schedule must be a JSON object of time entries")?;

    let mut anchors: Vec<Anchor> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let time: TimeOfDay = key.parse()?;

        if let Some(previous) = anchors.last()
            && time.to_minutes() <= previous.time.to_minutes()
        {
            anyhow::bail!(
                "Time value {key} is not after the previous time {}",
                previous.time
            );
        }

        let entry: RawEntry = serde_json::from_value(value).with_context(|| {
            format!("Entry {key} must hold a brightness and a temperature")
        })?;

        anchors.push(Anchor {
            time,
            brightness: entry.brightness.into_value(Channel::Brightness, time)?,
            temperature: entry.temperature.into_value(Channel::Temperature, time)?,
        });
    }

    Ok(Schedule::from_checked(anchors))
}

/// Write a schedule in the serialized format with canonical `HH:MM` keys.
///
/// Literal levels are written with the shortest representation that parses
/// back to the same value. An empty schedule serializes to the empty string.
pub fn serialize(schedule: &Schedule) -> String {
    if schedule.is_empty() {
        return String::new();
    }

    let mut entries = Map::with_capacity(schedule.len());
    for anchor in schedule.anchors() {
        let mut entry = Map::with_capacity(2);
        for channel in [Channel::Brightness, Channel::Temperature] {
            entry.insert(
                channel.name().to_string(),
                Value::String(level_text(anchor.channel(channel))),
            );
        }
        entries.insert(anchor.time.to_string(), Value::Object(entry));
    }
    Value::Object(entries).to_string()
}

fn level_text(value: ChannelValue) -> String {
    match value {
        ChannelValue::Literal(level) => level.to_string(),
        ChannelValue::Circadian => CIRCADIAN_VALUE.to_string(),
    }
}
