//! Finding the anchors that bracket a time of day.
//!
//! Lookups binary-search the sorted anchor times and wrap around both ends,
//! so a time before the first anchor belongs to the interval that started
//! with yesterday's last anchor, and a time after the last anchor is heading
//! for tomorrow's first one.

use super::{Anchor, Schedule, TimeOfDay};

fn search(schedule: &Schedule, time: TimeOfDay) -> Result<usize, usize> {
    schedule.anchors().binary_search_by_key(&time, |anchor| anchor.time)
}

/// The latest anchor at or before `time`, wrapping to the last anchor when
/// `time` precedes all of them.
pub fn find_previous(schedule: &Schedule, time: TimeOfDay) -> Option<&Anchor> {
    let anchors = schedule.anchors();
    match search(schedule, time) {
        Ok(exact) => anchors.get(exact),
        Err(0) => anchors.last(),
        Err(insert_at) => anchors.get(insert_at - 1),
    }
}

/// The earliest anchor strictly after `time`, wrapping to the first anchor
/// when no anchor is later.
///
/// An anchor exactly at `time` is skipped: it is the previous anchor, so the
/// pair returned by [`bracket`] never repeats an anchor.
pub fn find_next(schedule: &Schedule, time: TimeOfDay) -> Option<&Anchor> {
    let anchors = schedule.anchors();
    let index = match search(schedule, time) {
        Ok(exact) => exact + 1,
        Err(insert_at) => insert_at,
    };
    anchors.get(index).or_else(|| anchors.first())
}

/// Previous and next anchor around `time`, or `None` when the schedule has
/// fewer than two anchors.
pub fn bracket(schedule: &Schedule, time: TimeOfDay) -> Option<(&Anchor, &Anchor)> {
    if !schedule.is_interpolable() {
        return None;
    }
    Some((find_previous(schedule, time)?, find_next(schedule, time)?))
}
