//! `simulate`: run refresh cycles over a fast-forward clock.
//!
//! The simulated time source jumps by exactly the slept duration, so a day
//! of refreshes completes instantly while the log shows the simulated time
//! of every change.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use super::{Session, log_levels};
use crate::time_source::{self, SimulatedTimeSource};
use crate::zone::RefreshOutcome;

/// Refresh every `step_minutes` from `start_time` to `end_time`, both
/// inclusive.
pub fn handle_simulate_command(
    start_time: &str,
    end_time: &str,
    step_minutes: u32,
    config_dir: Option<&str>,
) -> Result<()> {
    let start = time_source::parse_datetime(start_time)
        .map_err(|e| anyhow::anyhow!("Invalid start time: {}", e))?;
    let end = time_source::parse_datetime(end_time)
        .map_err(|e| anyhow::anyhow!("Invalid end time: {}", e))?;
    if end <= start {
        anyhow::bail!("End time must be after start time");
    }
    if step_minutes == 0 {
        anyhow::bail!("Step must be at least one minute");
    }

    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start, end)));
    if !time_source::is_simulated() {
        anyhow::bail!("A time source was already installed, cannot simulate");
    }

    let mut session = Session::open(config_dir)?;
    log_block_start!("Simulating {start_time} to {end_time}, every {step_minutes} minutes");

    let step = Duration::from_secs(u64::from(step_minutes) * 60);
    let mut cycles = 0usize;
    let mut changes = 0usize;
    loop {
        cycles += 1;
        match session.refresh()? {
            RefreshOutcome::Changed(_) => changes += 1,
            RefreshOutcome::Unchanged(_) => {}
            RefreshOutcome::Fallback => log_debug!("Fallback applied"),
        }
        if time_source::simulation_ended() {
            break;
        }
        time_source::sleep(step);
    }

    log_block_start!("Simulation complete: {cycles} refreshes, {changes} changes");
    log_levels(session.host.levels());
    Ok(())
}
