//! Entry point for the `circadian-zone` binary.
//!
//! Parses the command line, then hands off to the matching command in the
//! library. Errors are printed through the logger and turn into a failing
//! exit code.

use anyhow::Result;

use circadian_zone::args::{self, CliAction, ParsedArgs};
use circadian_zone::commands;
use circadian_zone::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use circadian_zone::logger::Log;
use circadian_zone::{log_end, log_error_exit, log_version};

fn main() {
    let action = ParsedArgs::from_env().action;

    let code = match run(action) {
        Ok(code) => code,
        Err(e) => {
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::Now {
            debug_enabled,
            config_dir,
        } => {
            start(debug_enabled);
            commands::at::handle_now_command(config_dir.as_deref())?;
            log_end!();
            Ok(EXIT_SUCCESS)
        }
        CliAction::Validate {
            debug_enabled,
            schedule,
        } => {
            start(debug_enabled);
            let accepted = commands::validate::handle_validate_command(&schedule)?;
            log_end!();
            Ok(if accepted { EXIT_SUCCESS } else { EXIT_FAILURE })
        }
        CliAction::At {
            debug_enabled,
            config_dir,
            time,
        } => {
            start(debug_enabled);
            commands::at::handle_at_command(&time, config_dir.as_deref())?;
            log_end!();
            Ok(EXIT_SUCCESS)
        }
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            start_time,
            end_time,
            step_minutes,
        } => {
            start(debug_enabled);
            commands::simulate::handle_simulate_command(
                &start_time,
                &end_time,
                step_minutes,
                config_dir.as_deref(),
            )?;
            log_end!();
            Ok(EXIT_SUCCESS)
        }
    }
}

fn start(debug_enabled: bool) {
    Log::set_debug(debug_enabled);
    log_version!();
}
