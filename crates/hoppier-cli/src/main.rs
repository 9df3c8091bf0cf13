mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use hoppier_client::ClientError;
use stdout_io::write_stdout_text;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HOPPIER_LOG";

const ROOT_HELP: &str = "Hoppier - card spend ledger

Usage:
  hoppier <command>

Start here:
  hoppier transactions
  hoppier totals --currency cad
  hoppier check --help
";

const TOP_LEVEL_HELP: &str = "Hoppier - card spend ledger

USAGE: hoppier <command> [--data-dir <path>] [--json]

Browse spend:
  hoppier transactions                                    First page of the transaction history
  hoppier transactions --page 2 --page-size 8             Any page, 8 or 11 rows at a time
  hoppier totals                                          Card holders ranked by total spend

Switch currency:
  hoppier transactions --currency cad                     Amounts converted at 1 USD = 1.25 CAD
  hoppier totals --currency cad

Check your data:
  hoppier check                                           Record counts, totals cross-check, issues
  hoppier check --help                                    Expected files and fields

Data is read from --data-dir, then HOPPIER_DATA_DIR, then ~/.hoppier.
Set HOPPIER_LOG=debug to trace each load.
";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second subscriber can only come from a test harness; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint);
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);
    debug!(command = cli.command.name(), ?mode, "dispatching");

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing usage and "For more information" lines so the
/// "What to do next" section is the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))
        .and_then(|value| match value.as_str() {
            "transactions" => Some("transactions"),
            "totals" => Some("totals"),
            "check" => Some("check"),
            _ => None,
        })
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(error.code.as_str(), "fetch_failed" | "cycle_superseded")
}
