use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::records::RecordKind;

pub(crate) const DATA_HELP_COMMAND: &str = "hoppier check --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `hoppier {cmd} --help` for usage."),
            None => "Run `hoppier --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn source_not_found(dir: &Path, kind: RecordKind) -> Self {
        let location = dir.display().to_string();
        let stem = kind.file_stem();
        Self::new(
            "source_not_found",
            &format!("No {stem} records found in `{location}`."),
            vec![
                format!("Add `{stem}.json` or `{stem}.csv` to `{location}`."),
                "Or pass `--data-dir <path>` / set `HOPPIER_DATA_DIR` to the directory holding users, merchants, and transactions.".to_string(),
            ],
        )
        .with_data(json!({
            "data_dir": location,
            "record_set": kind.as_str(),
        }))
    }

    pub fn source_conflict(dir: &Path, kind: RecordKind) -> Self {
        let location = dir.display().to_string();
        let stem = kind.file_stem();
        Self::new(
            "source_conflict",
            &format!("Both `{stem}.json` and `{stem}.csv` exist in `{location}`."),
            vec![format!(
                "Keep exactly one of `{stem}.json` or `{stem}.csv` in `{location}`."
            )],
        )
        .with_data(json!({
            "data_dir": location,
            "record_set": kind.as_str(),
        }))
    }

    pub fn source_format_invalid(path: &Path, kind: RecordKind, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_format_invalid",
            &format!("Could not read {} records from `{location}`: {detail}", kind.as_str()),
            vec![
                "Provide a top-level JSON array of objects, or CSV with a header row.".to_string(),
                format!("Run `{DATA_HELP_COMMAND}` to review the expected fields."),
            ],
        )
        .with_data(json!({
            "path": location,
            "record_set": kind.as_str(),
        }))
    }

    pub fn source_schema_mismatch(
        path: &Path,
        kind: RecordKind,
        required_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_schema_mismatch",
            &format!(
                "CSV headers in `{location}` do not include every required {} field.",
                kind.as_str()
            ),
            vec![
                "Include all required headers; extra headers are ignored.".to_string(),
                format!("Run `{DATA_HELP_COMMAND}` to review the expected fields."),
            ],
        )
        .with_data(json!({
            "path": location,
            "record_set": kind.as_str(),
            "required_headers": required_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn fetch_failed(kind: RecordKind, detail: &str) -> Self {
        Self::new(
            "fetch_failed",
            &format!("Reading {} records failed: {detail}", kind.as_str()),
            vec!["Retry the command once the data source is reachable.".to_string()],
        )
        .with_data(json!({
            "record_set": kind.as_str(),
        }))
    }

    pub fn cycle_superseded(cycle_id: &str) -> Self {
        Self::new(
            "cycle_superseded",
            &format!("Aggregate cycle `{cycle_id}` was superseded by a newer refresh."),
            vec!["Read the current snapshot or refresh again.".to_string()],
        )
        .with_data(json!({
            "cycle_id": cycle_id,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn data_dir_unresolved(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "data_dir_unresolved",
            &format!("Cannot resolve data directory `{location}`: {detail}"),
            vec![
                "Pass `--data-dir <path>` or set `HOPPIER_DATA_DIR` to a readable directory."
                    .to_string(),
            ],
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
