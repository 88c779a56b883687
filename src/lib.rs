//! # circadian-zone
//!
//! Schedule-driven brightness and color temperature for a lighting zone.
//!
//! A zone holds two schedules of time-of-day anchors (adaptive and night).
//! On every refresh it finds the anchors around the current time, fades
//! between them and writes the result to the device through a [`ZoneHost`].
//! Anchors may ask for the natural daylight curve instead of a fixed level;
//! those are resolved with a [`SunPosition`].
//!
//! ## Layout
//!
//! - **Schedules**: `schedule` parses, validates and locates anchors
//! - **Engine**: `interpolation` computes fade weights and channel values,
//!   `zone` runs the refresh cycle and settings updates
//! - **Daylight**: `sun` provides the sun-position curve
//! - **Binary support**: `config`, `commands`, `args`, `time_source`
//!   and the `logger` macros
//!
//! [`ZoneHost`]: zone::ZoneHost
//! [`SunPosition`]: sun::SunPosition

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod interpolation;
pub mod schedule;
pub mod sun;
pub mod time_source;
pub mod zone;

pub use schedule::{Anchor, ChannelValue, Schedule, TimeOfDay};
pub use zone::{Mode, Zone, ZoneError, ZoneHost};
