//! Daylight progress used by circadian channel values.
//!
//! The engine only sees the [`SunPosition`] trait: a function from an instant
//! to the fraction of daylight reached, or no signal at all while the sun is
//! down. [`SolarCurve`] is the implementation the binary uses, either from
//! geographic coordinates or from fixed sunrise and sunset times.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// Source of daytime progress for an instant.
///
/// `Ok(Some(p))` with `p` in `(0, 1]` is a positive signal, `1` at solar noon.
/// `Ok(None)` (or a non-positive value) means the sun is down.
pub trait SunPosition {
    fn percentage_at(&self, at: DateTime<FixedOffset>) -> Result<Option<f64>>;
}

impl<F> SunPosition for F
where
    F: Fn(DateTime<FixedOffset>) -> Result<Option<f64>>,
{
    fn percentage_at(&self, at: DateTime<FixedOffset>) -> Result<Option<f64>> {
        self(at)
    }
}

/// Parabolic daylight curve between sunrise and sunset.
#[derive(Debug, Clone, PartialEq)]
pub enum SolarCurve {
    /// Sunrise and sunset computed for the instant's date at these coordinates.
    Geo { latitude: f64, longitude: f64 },
    /// Same wall-clock sunrise and sunset every day.
    Manual { sunrise: NaiveTime, sunset: NaiveTime },
}

impl SolarCurve {
    /// Sunrise and sunset on the instant's local date, in the instant's offset.
    pub fn daylight_window(
        &self,
        at: DateTime<FixedOffset>,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let date = at.date_naive();
        let offset = *at.offset();
        match self {
            SolarCurve::Geo {
                latitude,
                longitude,
            } => {
                let coord = Coordinates::new(*latitude, *longitude).ok_or_else(|| {
                    anyhow::anyhow!("Invalid coordinates: {latitude:.4}, {longitude:.4}")
                })?;
                let solar_day = SolarDay::new(coord, date);
                let sunrise = solar_day.event_time(SolarEvent::Sunrise);
                let sunset = solar_day.event_time(SolarEvent::Sunset);
                Ok((sunrise.with_timezone(&offset), sunset.with_timezone(&offset)))
            }
            SolarCurve::Manual { sunrise, sunset } => Ok((
                local_instant(date, *sunrise, offset)?,
                local_instant(date, *sunset, offset)?,
            )),
        }
    }
}

fn local_instant(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>> {
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .with_context(|| format!("No single local instant for {date} {time}"))
}

impl SunPosition for SolarCurve {
    fn percentage_at(&self, at: DateTime<FixedOffset>) -> Result<Option<f64>> {
        let (sunrise, sunset) = self.daylight_window(at)?;
        if sunset <= sunrise || at < sunrise || at >= sunset {
            return Ok(None);
        }

        let half_day = (sunset - sunrise).num_seconds() as f64 / 2.0;
        let noon = sunrise + (sunset - sunrise) / 2;
        let from_noon = (at - noon).num_seconds() as f64 / half_day;
        Ok(Some((1.0 - from_noon * from_noon).clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn manual() -> SolarCurve {
        SolarCurve::Manual {
            sunrise: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            sunset: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 6, 21, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_manual_curve_peaks_at_noon() {
        let p = manual().percentage_at(at(12, 0)).unwrap().unwrap();
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_manual_curve_is_symmetric() {
        let curve = manual();
        let morning = curve.percentage_at(at(9, 0)).unwrap().unwrap();
        let afternoon = curve.percentage_at(at(15, 0)).unwrap().unwrap();
        assert!((morning - 0.75).abs() < 1e-9);
        assert!((morning - afternoon).abs() < 1e-9);
    }

    #[test]
    fn test_manual_curve_has_no_signal_at_night() {
        let curve = manual();
        assert_eq!(curve.percentage_at(at(5, 59)).unwrap(), None);
        assert_eq!(curve.percentage_at(at(18, 0)).unwrap(), None);
        assert_eq!(curve.percentage_at(at(23, 0)).unwrap(), None);
    }

    #[test]
    fn test_geo_curve_daylight_in_summer_afternoon() {
        // Amsterdam around the solstice, local summer time
        let curve = SolarCurve::Geo {
            latitude: 52.37,
            longitude: 4.90,
        };
        let afternoon = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 6, 21, 14, 0, 0)
            .unwrap();
        let midnight = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 6, 21, 0, 30, 0)
            .unwrap();

        let p = curve.percentage_at(afternoon).unwrap().unwrap();
        assert!(p > 0.8 && p <= 1.0, "p = {p}");
        assert_eq!(curve.percentage_at(midnight).unwrap(), None);
    }

    #[test]
    fn test_geo_curve_rejects_invalid_coordinates() {
        let curve = SolarCurve::Geo {
            latitude: 123.0,
            longitude: 0.0,
        };
        assert!(curve.percentage_at(at(12, 0)).is_err());
    }

    #[test]
    fn test_closure_implements_sun_position() {
        let constant = |_at: DateTime<FixedOffset>| -> Result<Option<f64>> { Ok(Some(0.5)) };
        assert_eq!(constant.percentage_at(at(3, 0)).unwrap(), Some(0.5));
    }
}
