//! Defaults, validation limits and fixed names used across the crate.

use crate::zone::Mode;

// ═══ Configuration Defaults ═══
// Used when the configuration file leaves a field out

pub const DEFAULT_MODE: Mode = Mode::Adaptive;
pub const DEFAULT_FADE_DURATION: f64 = 30.0; // minutes
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 0.1;
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 1.0;
pub const DEFAULT_NOON_TEMPERATURE: f64 = 0.0; // coolest
pub const DEFAULT_SUNSET_TEMPERATURE: f64 = 1.0; // warmest
pub const DEFAULT_NIGHT_BRIGHTNESS: f64 = 0.1;
pub const DEFAULT_NIGHT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_SUNRISE: &str = "06:00:00";
pub const DEFAULT_SUNSET: &str = "19:00:00";
pub const DEFAULT_SIMULATION_STEP: u32 = 15; // minutes

// ═══ Validation Limits ═══

pub const MINIMUM_FADE_DURATION: f64 = 0.0;
pub const MAXIMUM_FADE_DURATION: f64 = MINUTES_PER_DAY as f64;
pub const MINIMUM_LEVEL: f64 = 0.0;
pub const MAXIMUM_LEVEL: f64 = 1.0;

// ═══ Schedule Format ═══

pub const MINUTES_PER_DAY: u32 = 24 * 60;
/// Channel value that defers to the sun-position curve.
pub const CIRCADIAN_VALUE: &str = "circadian";
/// Localization key reported when a schedule setting is rejected.
pub const TIMING_ERROR_KEY: &str = "json_timing_error";

// ═══ Host Names ═══

pub const SETTING_TIMING: &str = "timing";
pub const SETTING_NIGHT_TIMING: &str = "night_timing";
pub const SETTING_FADE_DURATION: &str = "fade_duration";
pub const CAPABILITY_DIM: &str = "dim";
pub const CAPABILITY_TEMPERATURE: &str = "light_temperature";

// ═══ Files ═══

pub const CONFIG_DIR_NAME: &str = "circadian-zone";
pub const CONFIG_FILE_NAME: &str = "circadian-zone.toml";

// ═══ Exit Codes ═══

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
