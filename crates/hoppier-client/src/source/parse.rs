use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::records::RecordKind;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// One source record, reduced to the fields its record set knows about.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRow {
    pub(crate) row: i64,
    values: HashMap<&'static str, String>,
}

impl RawRow {
    /// Trimmed value, `None` when absent, null, or blank.
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

pub(crate) const fn field_names(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::User => &["cardId", "firstName", "lastName"],
        RecordKind::Merchant => &["networkId", "name"],
        RecordKind::Transaction => &[
            "id",
            "date",
            "cardId",
            "merchantNetworkId",
            "amountInUSDCents",
        ],
    }
}

pub(crate) const fn required_headers(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::User => &["cardId", "firstName", "lastName"],
        RecordKind::Merchant => &["networkId", "name"],
        RecordKind::Transaction => &["id", "cardId", "merchantNetworkId", "amountInUSDCents"],
    }
}

pub(crate) fn parse_records(
    content: &str,
    format: SourceFormat,
    kind: RecordKind,
    path: &Path,
) -> ClientResult<Vec<RawRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::source_format_invalid(
            path,
            kind,
            "the file is empty",
        ));
    }

    match format {
        SourceFormat::Json => parse_json_array(trimmed, kind, path),
        SourceFormat::Csv => parse_csv(trimmed, kind, path),
    }
}

fn parse_json_array(content: &str, kind: RecordKind, path: &Path) -> ClientResult<Vec<RawRow>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|error| {
        ClientError::source_format_invalid(path, kind, &format!("invalid JSON ({error})"))
    })?;

    let Some(items) = unwrap_payload(&parsed, kind).and_then(Value::as_array) else {
        return Err(ClientError::source_format_invalid(
            path,
            kind,
            "JSON input must be a top-level array of objects",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(ClientError::source_format_invalid(
                path,
                kind,
                "JSON array entries must all be objects",
            ));
        };

        let mut values = HashMap::new();
        for name in field_names(kind) {
            if let Some(value) = read_optional_string(object.get(*name)) {
                values.insert(*name, value);
            }
        }
        rows.push(RawRow {
            row: (index as i64) + 1,
            values,
        });
    }

    Ok(rows)
}

/// Accepts either a bare array or a GraphQL-style `{"data": {"<set>": [...]}}`
/// response body.
fn unwrap_payload(value: &Value, kind: RecordKind) -> Option<&Value> {
    if value.is_array() {
        return Some(value);
    }
    value.get("data")?.get(kind.file_stem())
}

fn parse_csv(content: &str, kind: RecordKind, path: &Path) -> ClientResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::source_format_invalid(path, kind, "CSV header row is unreadable"))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let required = required_headers(kind);
    if !required
        .iter()
        .all(|name| headers.iter().any(|header| header == name))
    {
        return Err(ClientError::source_schema_mismatch(
            path,
            kind,
            required.iter().map(|name| name.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = field_names(kind)
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .position(|header| header == name)
                .map(|index| (*name, index))
        })
        .collect::<Vec<(&'static str, usize)>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|_| {
            ClientError::source_format_invalid(path, kind, "CSV rows are malformed or not UTF-8")
        })?;

        let values = index_by_name
            .iter()
            .filter_map(|(name, index)| record.get(*index).map(|value| (*name, value.to_string())))
            .collect::<HashMap<&'static str, String>>();
        rows.push(RawRow {
            row: (row_index as i64) + 1,
            values,
        });
    }

    Ok(rows)
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    // Number's Display keeps integers exact ("1000") and floats as written.
    Some(current.to_string())
}
