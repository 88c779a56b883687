//! Structured logging with box-drawing output.
//!
//! Every macro in this module writes one visually prefixed line through
//! [`write_output`]. The box-drawing layout keeps related messages grouped:
//!
//! - **`log_block_start!`** opens a new block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`** continues the current block (`┣ message`).
//! - **`log_indented!`** nests details under the previous line (`┃   message`).
//! - **`log_pipe!`** inserts an empty `┃` spacer line.
//! - **`log_version!`** prints the startup header, **`log_end!`** the final `╹`.
//! - **`log_info!`**, **`log_warning!`**, **`log_error!`**, **`log_debug!`** print
//!   a colored `[LEVEL]` tag. Debug lines are dropped unless debug output was
//!   switched on with [`Log::set_debug`].
//!
//! While a simulated time source is installed, each line carries a
//! `[HH:MM:SS]` prefix with the simulated wall clock.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Global switches for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all output. Tests switch logging off to keep their
    /// output readable.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Timestamp prefix shown while the clock is simulated, empty otherwise.
    pub fn timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Write a fully formatted log line. Public for macro access.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Shared expansion for the line-based macros: `$layout` receives the
/// timestamp prefix and the rendered message.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($layout:literal, $($arg:tt)+) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::timestamp_prefix();
            let message = format!($($arg)+);
            $crate::logger::write_output(&format!($layout, prefix = prefix, message = message));
        }
    }};
}

/// Continue the current block with a `┣` line.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┣ {message}\n", $($arg)+)
    };
}

/// Nest a detail line under the previous message.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┃   {message}\n", $($arg)+)
    };
}

/// Open a new block of related messages.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┃\n{prefix}┣ {message}\n", $($arg)+)
    };
}

/// Insert an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_line!("{prefix}┃{message}\n", "")
    };
}

/// Print the startup header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_line!(
            "{prefix}┏ circadian-zone v{message} ━━╸\n",
            "{}",
            env!("CARGO_PKG_VERSION")
        )
    };
}

/// Print the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_line!("{prefix}╹{message}\n", "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┣[\x1b[32mINFO\x1b[0m] {message}\n", $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {message}\n", $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┣[\x1b[31mERROR\x1b[0m] {message}\n", $($arg)+)
    };
}

/// Print an error and close the log, for failures that end the process.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {
        $crate::__log_line!("{prefix}┃\n{prefix}┗[\x1b[31mERROR\x1b[0m] {message}\n", $($arg)+)
    };
}

/// Operational detail, only shown with `--debug`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!("{prefix}┣[\x1b[36mDEBUG\x1b[0m] {message}\n", $($arg)+)
        }
    };
}
