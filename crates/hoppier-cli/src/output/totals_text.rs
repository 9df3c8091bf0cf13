use std::io;

use serde_json::Value;

use super::format::{Align, Column, render_table_or_blocks, terminal_width};
use super::transactions_text::issue_footer;

const COLUMNS: [Column<'static>; 3] = [
    Column {
        name: "Rank",
        align: Align::Right,
    },
    Column {
        name: "Card holder",
        align: Align::Left,
    },
    Column {
        name: "Total",
        align: Align::Right,
    },
];

pub fn render_totals(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("totals output requires rows"))?;
    let code = data
        .pointer("/currency/code")
        .and_then(Value::as_str)
        .unwrap_or("USD");

    if rows.is_empty() {
        let mut lines = vec!["No card holder totals yet.".to_string()];
        lines.extend(issue_footer(data));
        return Ok(lines.join("\n"));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("rank")
                    .and_then(Value::as_u64)
                    .map(|rank| rank.to_string())
                    .unwrap_or_default(),
                row.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                row.get("total")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Total spend by card holder ({code}):"), String::new()];
    lines.extend(render_table_or_blocks(
        &COLUMNS,
        &table_rows,
        terminal_width(),
        "Card holder",
    ));
    lines.extend(issue_footer(data));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_totals;

    #[test]
    fn renders_ranked_rows() {
        let data = json!({
            "currency": { "code": "USD", "index": 0, "conversion_rate": 1.25 },
            "rows": [
                { "rank": 1, "card_id": "B", "name": "Sam Ray", "total_cents": 900.0, "total": "$9.00" },
                { "rank": 2, "card_id": "A", "name": "Jo Lee", "total_cents": 300.0, "total": "$3.00" }
            ],
            "issues": { "total": 2, "excluded_records": 1 }
        });

        let rendered = render_totals(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let lines = text.lines().collect::<Vec<&str>>();
            assert_eq!(lines[0], "Total spend by card holder (USD):");
            assert!(lines[3].contains("Sam Ray") && lines[3].ends_with("$9.00"));
            assert!(lines[4].contains("Jo Lee") && lines[4].ends_with("$3.00"));
            assert!(text.ends_with("2 data issues found. Run `hoppier check` for details."));
        }
    }

    #[test]
    fn empty_totals_render_a_short_notice() {
        let data = json!({ "rows": [], "issues": { "total": 0, "excluded_records": 0 } });
        let rendered = render_totals(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert_eq!(text, "No card holder totals yet.");
        }
    }
}
