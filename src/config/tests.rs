use super::validation::validate_config;
use super::*;
use crate::logger::Log;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

const TIMING: &str = r#"{"06:00":{"brightness":"0.1","temperature":"0.9"},"12:00":{"brightness":"1.0","temperature":"0.1"}}"#;

fn write_config(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_defaults_when_file_missing() {
    Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();

    let config = load(Some(temp_dir.path())).unwrap();

    assert_eq!(config.mode, Some(Mode::Adaptive));
    assert_eq!(config.fade_duration, Some(DEFAULT_FADE_DURATION));
    assert_eq!(config.timing.as_deref(), Some(""));
    assert_eq!(config.sunrise.as_deref(), Some(DEFAULT_SUNRISE));
    assert!(!temp_dir.path().join(CONFIG_FILE_NAME).exists());
}

#[test]
fn test_config_load_full_file() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        &format!(
            r#"
mode = "night"
fade_duration = 45
timing = '{TIMING}'
min_brightness = 0.2
max_brightness = 0.9
latitude = 52.37
longitude = 4.90
timezone = "Europe/Amsterdam"
"#
        ),
    );

    let config = load_from_path(&path).unwrap();

    assert_eq!(config.mode, Some(Mode::Night));
    assert_eq!(config.fade_duration, Some(45.0));
    assert_eq!(config.schedule(ScheduleKind::Adaptive), TIMING);
    assert_eq!(config.schedule(ScheduleKind::Night), "");
    assert_eq!(config.min_brightness, Some(0.2));
    assert_eq!(
        config.solar_curve().unwrap(),
        SolarCurve::Geo {
            latitude: 52.37,
            longitude: 4.90
        }
    );
    assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Europe::Amsterdam));
}

#[test]
fn test_config_rejects_unknown_field() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "brightness_curve = 3\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_config_rejects_invalid_schedule() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"timing = '{"25:00":{"brightness":"0.5","temperature":"0.5"}}'"#,
    );

    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid timing schedule"));
}

#[test]
fn test_validation_level_ranges() {
    let mut config = Config {
        max_brightness: Some(1.2),
        ..Config::default()
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("max_brightness"));

    config.max_brightness = Some(0.3);
    config.min_brightness = Some(0.5);
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("cannot be greater"));

    config.min_brightness = Some(0.3);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_validation_fade_duration_limits() {
    let mut config = Config {
        fade_duration: Some(1440.0),
        ..Config::default()
    };
    assert!(validate_config(&config).is_ok());

    config.fade_duration = Some(-1.0);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_validation_daylight_settings() {
    let half_coordinates = Config {
        latitude: Some(40.0),
        ..Config::default()
    };
    assert!(validate_config(&half_coordinates).is_err());

    let bad_latitude = Config {
        latitude: Some(95.0),
        longitude: Some(0.0),
        ..Config::default()
    };
    assert!(validate_config(&bad_latitude).is_err());

    let inverted = Config {
        sunrise: Some("20:00:00".to_string()),
        sunset: Some("07:00:00".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&inverted).is_err());

    let bad_format = Config {
        sunrise: Some("6am".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&bad_format).is_err());
}

#[test]
fn test_validation_rejects_unknown_timezone() {
    let config = Config {
        timezone: Some("Mars/Olympus_Mons".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_manual_solar_curve_from_defaults() {
    let mut config = Config::default();
    config.apply_defaults();
    assert_eq!(
        config.solar_curve().unwrap(),
        SolarCurve::Manual {
            sunrise: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            sunset: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        }
    );
}

#[test]
#[serial]
fn test_config_path_follows_xdg_config_home() {
    let temp_dir = tempdir().unwrap();

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let path = get_config_path(None);

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert_eq!(
        path.unwrap(),
        temp_dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    );
}

#[test]
fn test_config_path_with_custom_dir() {
    let dir = std::path::Path::new("/tmp/zones");
    assert_eq!(
        get_config_path(Some(dir)).unwrap(),
        dir.join(CONFIG_FILE_NAME)
    );
}
