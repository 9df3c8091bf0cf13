use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, render_table_or_blocks, terminal_width};

const ISSUE_COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "Severity",
        align: Align::Left,
    },
    Column {
        name: "Record",
        align: Align::Left,
    },
    Column {
        name: "Row",
        align: Align::Right,
    },
    Column {
        name: "Issue",
        align: Align::Left,
    },
    Column {
        name: "Details",
        align: Align::Left,
    },
];

pub fn render_check(data: &Value) -> io::Result<String> {
    let counts = data
        .get("counts")
        .ok_or_else(|| io::Error::other("check output requires counts"))?;
    let conservation = data
        .get("conservation")
        .ok_or_else(|| io::Error::other("check output requires conservation"))?;
    let issues = data
        .get("issues")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("check output requires issues"))?;

    let number = |value: &Value, key: &str| {
        value
            .get(key)
            .map(Value::to_string)
            .unwrap_or_else(|| "0".to_string())
    };

    let mut lines = vec![
        format!(
            "Data directory: {}",
            data.get("data_dir").and_then(Value::as_str).unwrap_or("")
        ),
        String::new(),
        "Records:".to_string(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Users:", number(counts, "users")),
            ("Merchants:", number(counts, "merchants")),
            ("Transactions:", number(counts, "transactions")),
            ("Priced:", number(counts, "priced_transactions")),
            ("Card holders:", number(counts, "card_holders")),
        ],
        2,
    ));

    let balanced = conservation.get("balanced").and_then(Value::as_bool) == Some(true);
    lines.push(String::new());
    lines.push("Totals cross-check:".to_string());
    lines.extend(key_value_rows(
        &[
            (
                "Transaction cents:",
                number(conservation, "transaction_usd_cents"),
            ),
            (
                "Card holder cents:",
                number(conservation, "user_total_usd_cents"),
            ),
            (
                "Result:",
                if balanced { "balanced" } else { "MISMATCH" }.to_string(),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    if issues.is_empty() {
        lines.push("No data issues found.".to_string());
        return Ok(lines.join("\n"));
    }

    lines.push(format!("Issues ({}):", issues.len()));
    let rows = issues
        .iter()
        .map(|issue| {
            let text = |key: &str| {
                issue
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            vec![
                text("severity"),
                text("record"),
                number(issue, "row"),
                text("kind"),
                text("message"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(
        &ISSUE_COLUMNS,
        &rows,
        terminal_width(),
        "Issue",
    ));

    Ok(lines.join("\n"))
}
