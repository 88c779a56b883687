//! Command handlers for the `circadian-zone` binary.
//!
//! Every command builds a [`ConsoleHost`] from the configuration file and
//! drives a zone through it, so the output shows exactly what a device
//! would have received.

pub mod at;
pub mod host;
pub mod simulate;
pub mod validate;

pub use host::ConsoleHost;

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::interpolation::Levels;
use crate::sun::SolarCurve;
use crate::zone::{CircadianFallback, RefreshOutcome, Zone};

/// Host, daylight curve and zone for one command run.
pub(crate) struct Session {
    pub host: ConsoleHost,
    pub curve: SolarCurve,
    pub zone: Zone<CircadianFallback>,
}

impl Session {
    pub fn open(config_dir: Option<&str>) -> Result<Self> {
        let config = Config::load(config_dir.map(Path::new))?;
        config.log_config();
        let curve = config.solar_curve()?;
        let host = ConsoleHost::new(config)?;
        let zone = Zone::init(&host, CircadianFallback)?;
        Ok(Self { host, curve, zone })
    }

    pub fn refresh(&mut self) -> Result<RefreshOutcome> {
        self.zone.refresh(&mut self.host, &self.curve)
    }
}

pub(crate) fn log_levels(levels: Levels) {
    log_indented!("Brightness:  {:.3}", levels.brightness);
    log_indented!("Temperature: {:.3}", levels.temperature);
}
