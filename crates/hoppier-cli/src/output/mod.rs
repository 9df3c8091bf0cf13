mod check_text;
mod error_text;
mod format;
mod json;
mod mode;
mod totals_text;
mod transactions_text;

use std::io;

use hoppier_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "transactions" => transactions_text::render_transactions(&success.data),
        "totals" => totals_text::render_totals(&success.data),
        "check" => check_text::render_check(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
