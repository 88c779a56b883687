//! `at` and the default command: compute the levels for one instant.

use anyhow::{Context, Result};

use super::{Session, log_levels};
use crate::schedule::TimeOfDay;
use crate::zone::{RefreshOutcome, ZoneHost};

/// Refresh once at `time` today, in the zone's timezone.
pub fn handle_at_command(time: &str, config_dir: Option<&str>) -> Result<()> {
    let time: TimeOfDay = time
        .parse()
        .with_context(|| format!("Invalid time {time:?}, expected HH:MM"))?;

    let mut session = Session::open(config_dir)?;
    let instant = session.host.instant_today(time)?;
    session.host.pin_clock(instant);
    run_once(&mut session)
}

/// Refresh once at the current time.
pub fn handle_now_command(config_dir: Option<&str>) -> Result<()> {
    let mut session = Session::open(config_dir)?;
    let instant = session.host.now();
    session.host.pin_clock(instant);
    run_once(&mut session)
}

fn run_once(session: &mut Session) -> Result<()> {
    log_block_start!("Levels at {}", session.host.now().format("%Y-%m-%d %H:%M %:z"));
    match session.refresh()? {
        RefreshOutcome::Fallback => {
            log_decorated!("No interpolable schedule for this mode, fallback applied");
        }
        RefreshOutcome::Unchanged(_) | RefreshOutcome::Changed(_) => {}
    }
    log_levels(session.host.levels());
    Ok(())
}
