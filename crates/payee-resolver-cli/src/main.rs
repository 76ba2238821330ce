mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use payee_resolver::ResolverError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "payee-resolver - map raw statement payees to real merchant names

Usage:
  payee-resolver <command>

Start here:
  payee-resolver resolve \"7-ELEVEN 23020 SEATTLE WA\"
  payee-resolver batch --help
  payee-resolver model
";

const TOP_LEVEL_HELP: &str = "payee-resolver — map raw statement payees to real merchant names

USAGE: payee-resolver [--corpus <PATH>] <command>

Resolve payees:
  payee-resolver resolve <payee>                          Resolve one raw payee string
  payee-resolver batch <input.csv>                        Resolve a CSV column into resolved_payees.csv
  payee-resolver batch <input.csv> --output <path>        Choose where the resolved CSV is written

Inspect the cluster stage:
  payee-resolver model                                    Show clusters fitted from the training corpus

Options for every command:
  --json                                                  Machine-readable output
  --corpus <path>                                         Fit clusters from a newline-delimited corpus
                                                          (default: PAYEE_RESOLVER_CORPUS, then bundled)

Logging goes to stderr. Set RUST_LOG=debug to trace each resolution stage.
";

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER));

    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return Err(handle_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);
    log::debug!("dispatching command: {:?}", cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            log::debug!("command failed: code={}", error.code);
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests are successes; everything else clap rejects is
/// a user error rendered in the requested output mode.
fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        _ => {
            let parse_error = parse_error_with_command_hint(
                &strip_clap_boilerplate(&err.to_string()),
                command_from_args(raw_args),
            );
            if output::print_failure(&parse_error, infer_requested_output_mode(raw_args)).is_err()
            {
                return ExitCode::from(2);
            }
            ExitCode::from(1)
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing Usage line and "For more information" hint so the
/// "What to do next" section is the only guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_start_matches("error: ").trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find_map(|value| match value.as_str() {
            "resolve" => Some("resolve"),
            "batch" => Some("batch"),
            "model" => Some("model"),
            _ => None,
        })
}

fn parse_error_with_command_hint(clean_message: &str, command: Option<&str>) -> ResolverError {
    let mut error = ResolverError::invalid_argument(clean_message, command);
    if command == Some("resolve") {
        error.recovery_steps.insert(
            0,
            "Quote payees that contain spaces: `payee-resolver resolve \"SHELL OIL 123\"`."
                .to_string(),
        );
    }
    error
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ResolverError) -> ExitCode {
    if error.is_user_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}
