//! Command-line parsing.
//!
//! Option names are matched case-insensitively and processed left to right;
//! help stops parsing wherever it appears. Anything clap doesn't recognise is
//! reported back as [`Invocation::UnknownArgument`] rather than as an error.

use crate::config::ConfigError;
use crate::constants::{APP_NAME, BIN_NAME, DEFAULT_PERIOD_MINUTES, MAX_PERIOD_MINUTES};
use clap::error::{ContextKind, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};

const ABOUT: &str = "Play a 19kHz (basically inaudible) tone, on a regular period, in an effort to keep
your external audio output device (soundbar, amplifier, speakers) awake";

/// Keep an external amplifier or soundbar out of standby
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = BIN_NAME,
    version,
    about = ABOUT,
    before_help = format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")),
    args_override_self = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Show this help and exit
    #[arg(short = 'h', long = "help", visible_alias = "info", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Verbose output, eg a message every time a tone is produced
    #[arg(short, long)]
    pub verbose: bool,

    /// Test mode, plays an AUDIBLE (1kHz) tone
    #[arg(short, long)]
    pub test: bool,

    /// Period between tones, in minutes (at most one week)
    #[arg(
        short,
        long,
        value_name = "MINUTES",
        default_value_t = DEFAULT_PERIOD_MINUTES,
        value_parser = clap::value_parser!(u64).range(1..=MAX_PERIOD_MINUTES),
        allow_negative_numbers = true
    )]
    pub period: u64,

    /// Times to be active, eg 08:30-17:30 for 8:30am to 5:30pm
    #[arg(short, long, value_name = "HH:mm-HH:mm", allow_hyphen_values = true)]
    pub between: Option<String>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Args),
    Help,
    UnknownArgument(String),
}

impl Invocation {
    pub fn verbose(&self) -> bool {
        matches!(self, Invocation::Run(args) if args.verbose)
    }
}

/// Parse arguments, not including the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv = std::iter::once(BIN_NAME.to_string()).chain(args.into_iter().map(normalize_flag));

    match Args::try_parse_from(argv) {
        Ok(args) => Ok(Invocation::Run(args)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Invocation::Help)
            }
            ErrorKind::UnknownArgument => {
                let arg = err
                    .get(ContextKind::InvalidArg)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                Ok(Invocation::UnknownArgument(arg))
            }
            _ => Err(ConfigError::InvalidArgument(describe(&err))),
        },
    }
}

/// Rendered usage text, including the application name and version.
pub fn help_text() -> String {
    Args::command().render_help().to_string()
}

/// Lowercase anything that looks like an option so `-P` and `--PERIOD` work.
/// Values don't start with a dash (negative numbers aside), so they pass
/// through untouched.
fn normalize_flag<S: Into<String>>(arg: S) -> String {
    let arg = arg.into();
    if arg.starts_with('-') {
        arg.to_lowercase()
    } else {
        arg
    }
}

fn describe(err: &clap::Error) -> String {
    let arg = err
        .get(ContextKind::InvalidArg)
        .map(ToString::to_string)
        .unwrap_or_default();

    if arg.starts_with("--period") {
        format!(
            "--period requires a positive integer value of at most {}",
            MAX_PERIOD_MINUTES
        )
    } else if arg.starts_with("--between") {
        "--between requires a value in HH:mm-HH:mm format".to_string()
    } else {
        let rendered = err.to_string();
        let first_line = rendered.lines().next().unwrap_or_default();
        first_line.trim_start_matches("error: ").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_normalize_flag_only_touches_options() {
        assert_eq!(normalize_flag("--PERIOD"), "--period");
        assert_eq!(normalize_flag("-V"), "-v");
        assert_eq!(normalize_flag("Abc"), "Abc");
        assert_eq!(normalize_flag("09:00-18:00"), "09:00-18:00");
    }

    #[test]
    fn test_help_text_mentions_every_option() {
        let help = help_text();
        assert!(help.contains(APP_NAME));
        // clap renders visible aliases with or without dashes depending on version
        for option in ["--verbose", "--test", "--period", "--between", "--help", "info"] {
            assert!(help.contains(option), "help text should mention {}", option);
        }
    }

    #[test]
    fn test_invocation_verbose() {
        let run = parse_args(["-v"]).unwrap();
        assert!(run.verbose());
        assert!(!Invocation::Help.verbose());
    }
}
