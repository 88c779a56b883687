//! `validate`: check a schedule string without touching any zone.

use anyhow::Result;

use crate::schedule::parse;

/// Report whether `raw` is an acceptable schedule. Returns the verdict so
/// the caller can pick the exit code.
pub fn handle_validate_command(raw: &str) -> Result<bool> {
    log_block_start!("Validating schedule");
    match parse::check(raw) {
        Ok(()) => {
            let schedule = parse::parse(raw)?;
            log_info!("Schedule accepted ({} anchors)", schedule.len());
            for anchor in schedule.anchors() {
                log_indented!(
                    "{}  brightness {}  temperature {}",
                    anchor.time,
                    anchor.brightness,
                    anchor.temperature
                );
            }
            if !schedule.is_empty() && !schedule.is_interpolable() {
                log_warning!("A single anchor cannot be interpolated; the fallback will apply");
            }
            Ok(true)
        }
        Err(e) => {
            log_error!("Schedule rejected: {e:#}");
            Ok(false)
        }
    }
}
