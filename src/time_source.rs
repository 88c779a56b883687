//! Clock abstraction for real and simulated time.
//!
//! The binary reads "now" through this module so the `simulate` command can
//! replace the wall clock with a fast-forward clock that only advances when
//! the caller sleeps. The engine itself never reads the clock: hosts resolve
//! "now" and hand it in.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the duration, or advance the simulated clock by it.
    fn sleep(&self, duration: StdDuration);

    fn is_simulated(&self) -> bool;

    /// Whether a simulation has reached its end time. Always false for real time.
    fn is_ended(&self) -> bool {
        false
    }
}

pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Fast-forward clock: time jumps by exactly the slept duration, capped at
/// the end of the simulation window.
pub struct SimulatedTimeSource {
    end_time: DateTime<Local>,
    current: Mutex<DateTime<Local>>,
}

impl SimulatedTimeSource {
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>) -> Self {
        Self {
            end_time,
            current: Mutex::new(start_time.min(end_time)),
        }
    }

    fn current_time(&self) -> DateTime<Local> {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.current_time()
    }

    fn sleep(&self, duration: StdDuration) {
        let step = ChronoDuration::from_std(duration).unwrap_or(ChronoDuration::MAX);
        let mut guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let advanced = guard.checked_add_signed(step).unwrap_or(self.end_time);
        *guard = advanced.min(self.end_time);
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current_time() >= self.end_time
    }
}

/// Install the global time source. Only the first call has an effect.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

pub fn now() -> DateTime<Local> {
    source().now()
}

pub fn sleep(duration: StdDuration) {
    source().sleep(duration)
}

pub fn is_simulated() -> bool {
    source().is_simulated()
}

pub fn simulation_ended() -> bool {
    source().is_ended()
}

/// Parse a local datetime in the format `YYYY-MM-DD HH:MM:SS`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}
