//! Command-line argument parsing.
//!
//! Global flags (`--config`, `--debug`, `--help`, `--version`) may appear
//! anywhere; the first bare word selects the command and the words after it
//! are its arguments.

use crate::common::constants::DEFAULT_SIMULATION_STEP;

/// What the binary was asked to do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Compute levels for the current time
    Now {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Check a schedule string
    Validate {
        debug_enabled: bool,
        schedule: String,
    },
    /// Compute levels for a time today
    At {
        debug_enabled: bool,
        config_dir: Option<String>,
        time: String,
    },
    /// Run refresh cycles over a simulated clock
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        start_time: String,
        end_time: String,
        step_minutes: u32,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse the program arguments. The first item is the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParsedArgs {
            action: parse_action(args),
        }
    }

    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_action<I, S>(args: I) -> CliAction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut debug_enabled = false;
    let mut config_dir: Option<String> = None;
    let mut words: Vec<String> = Vec::new();

    let mut iter = args.into_iter().skip(1).map(|s| s.as_ref().to_string());
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return CliAction::ShowHelp,
            "--version" | "-V" | "-v" => return CliAction::ShowVersion,
            "--debug" | "-d" => debug_enabled = true,
            "--config" | "-c" => match iter.next() {
                Some(dir) => config_dir = Some(dir),
                None => {
                    log_warning!("Missing directory for --config");
                    return CliAction::ShowHelpDueToError;
                }
            },
            // A schedule JSON never starts with '-', but a lone "-" is a word
            flag if flag.starts_with('-') && flag.len() > 1 => {
                log_warning!("Unknown argument: {}", flag);
                return CliAction::ShowHelpDueToError;
            }
            _ => words.push(arg),
        }
    }

    let Some((command, rest)) = words.split_first() else {
        return CliAction::Now {
            debug_enabled,
            config_dir,
        };
    };

    match (command.as_str(), rest) {
        ("validate" | "v", [schedule]) => CliAction::Validate {
            debug_enabled,
            schedule: schedule.clone(),
        },
        ("at" | "a", [time]) => CliAction::At {
            debug_enabled,
            config_dir,
            time: time.clone(),
        },
        ("simulate" | "s", [start, end, step @ ..]) if step.len() <= 1 => {
            let step_minutes = match step.first().map(|s| s.parse::<u32>()) {
                None => DEFAULT_SIMULATION_STEP,
                Some(Ok(minutes)) if minutes > 0 => minutes,
                Some(_) => {
                    log_warning!("Step must be a positive number of minutes");
                    return CliAction::ShowHelpDueToError;
                }
            };
            CliAction::Simulate {
                debug_enabled,
                config_dir,
                start_time: start.clone(),
                end_time: end.clone(),
                step_minutes,
            }
        }
        ("validate" | "v" | "at" | "a" | "simulate" | "s", _) => {
            log_warning!("Wrong number of arguments for '{}'", command);
            show_command_usage(command);
            CliAction::ShowHelpDueToError
        }
        (unknown, _) => {
            log_warning!("Unknown command: {}", unknown);
            CliAction::ShowHelpDueToError
        }
    }
}

/// Brief usage line for a command, used with argument errors.
pub fn show_command_usage(command: &str) {
    match command {
        "validate" | "v" => log_block_start!("Usage: circadian-zone validate '<json>'"),
        "at" | "a" => log_block_start!("Usage: circadian-zone at <HH:MM>"),
        "simulate" | "s" => log_block_start!(
            "Usage: circadian-zone simulate '<YYYY-MM-DD HH:MM:SS>' '<YYYY-MM-DD HH:MM:SS>' [step-minutes]"
        ),
        _ => log_block_start!("Usage: circadian-zone [OPTIONS] [COMMAND]"),
    }
}

pub fn display_version_info() {
    log_version!();
    log_end!();
}

pub fn display_help() {
    log_version!();
    log_block_start!("Usage: circadian-zone [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Read circadian-zone.toml from <dir>");
    log_indented!("-d, --debug            Show detailed diagnostic output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("(none)                 Show brightness and temperature for now");
    log_indented!("at, a <HH:MM>          Show brightness and temperature at a time today");
    log_indented!("simulate, s <start> <end> [step]");
    log_indented!("                       Refresh every [step] minutes between two datetimes");
    log_indented!("validate, v <json>     Check a schedule string");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Log;

    fn action(args: &[&str]) -> CliAction {
        Log::set_enabled(false);
        ParsedArgs::parse(args.iter().copied()).action
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(
            action(&["circadian-zone"]),
            CliAction::Now {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn test_parse_debug_and_config_anywhere() {
        assert_eq!(
            action(&["circadian-zone", "at", "-d", "19:45", "--config", "/tmp/zones"]),
            CliAction::At {
                debug_enabled: true,
                config_dir: Some("/tmp/zones".to_string()),
                time: "19:45".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(action(&["circadian-zone", "--help"]), CliAction::ShowHelp);
        assert_eq!(action(&["circadian-zone", "at", "-h"]), CliAction::ShowHelp);
        assert_eq!(action(&["circadian-zone", "-V"]), CliAction::ShowVersion);
        assert_eq!(action(&["circadian-zone", "--version"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_validate() {
        let json = r#"{"07:00":{"brightness":"0.5","temperature":"0.5"}}"#;
        assert_eq!(
            action(&["circadian-zone", "validate", json]),
            CliAction::Validate {
                debug_enabled: false,
                schedule: json.to_string(),
            }
        );
        assert_eq!(
            action(&["circadian-zone", "validate"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_simulate_step() {
        assert_eq!(
            action(&[
                "circadian-zone",
                "simulate",
                "2026-03-01 06:00:00",
                "2026-03-01 22:00:00"
            ]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                start_time: "2026-03-01 06:00:00".to_string(),
                end_time: "2026-03-01 22:00:00".to_string(),
                step_minutes: DEFAULT_SIMULATION_STEP,
            }
        );
        assert_eq!(
            action(&["circadian-zone", "s", "2026-03-01 06:00:00", "2026-03-01 22:00:00", "5"]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                start_time: "2026-03-01 06:00:00".to_string(),
                end_time: "2026-03-01 22:00:00".to_string(),
                step_minutes: 5,
            }
        );
        assert_eq!(
            action(&["circadian-zone", "s", "2026-03-01 06:00:00", "2026-03-01 22:00:00", "0"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(action(&["circadian-zone", "--bogus"]), CliAction::ShowHelpDueToError);
        assert_eq!(action(&["circadian-zone", "dance"]), CliAction::ShowHelpDueToError);
        assert_eq!(action(&["circadian-zone", "--config"]), CliAction::ShowHelpDueToError);
        assert_eq!(action(&["circadian-zone", "at", "10:00", "11:00"]), CliAction::ShowHelpDueToError);
    }
}
