use std::io;

use serde_json::Value;

use super::format::{Align, Column, render_table_or_blocks, terminal_width};

const COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "ID",
        align: Align::Left,
    },
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Card holder",
        align: Align::Left,
    },
    Column {
        name: "Merchant",
        align: Align::Left,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
];

pub fn render_transactions(data: &Value) -> io::Result<String> {
    let page = data
        .get("page")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("transactions output requires page"))?;
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("transactions output requires rows"))?;
    let code = data
        .pointer("/currency/code")
        .and_then(Value::as_str)
        .unwrap_or("USD");

    let count = |key: &str| page.get(key).and_then(Value::as_u64).unwrap_or(0);
    let page_number = count("page_index") + 1;
    let page_count = count("page_count");
    let total_rows = count("total_rows");

    if total_rows == 0 {
        let mut lines = vec!["No transactions found.".to_string()];
        lines.extend(issue_footer(data));
        return Ok(lines.join("\n"));
    }

    if rows.is_empty() {
        return Ok(format!(
            "Page {page_number} is past the last page ({page_count}).\n\n\
             Run `hoppier transactions --page {page_count}` to see the final page."
        ));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            ["id", "date", "card_holder", "merchant", "amount"]
                .iter()
                .map(|key| cell(row, key))
                .collect::<Vec<String>>()
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Transactions ({code}), page {page_number} of {page_count}:"),
        String::new(),
    ];
    lines.extend(render_table_or_blocks(
        &COLUMNS,
        &table_rows,
        terminal_width(),
        "Transaction",
    ));
    lines.push(String::new());
    lines.push(format!(
        "Showing {}–{} of {total_rows}.",
        count("first_row"),
        count("last_row")
    ));

    if page.get("has_next").and_then(Value::as_bool) == Some(true) {
        lines.push(format!(
            "Next page: hoppier transactions --page {} --page-size {} --currency {}",
            page_number + 1,
            count("page_size"),
            code.to_ascii_lowercase()
        ));
    }
    lines.extend(issue_footer(data));

    Ok(lines.join("\n"))
}

pub(super) fn issue_footer(data: &Value) -> Vec<String> {
    let total = data
        .pointer("/issues/total")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if total == 0 {
        return Vec::new();
    }
    let noun = if total == 1 { "issue" } else { "issues" };
    vec![
        String::new(),
        format!("{total} data {noun} found. Run `hoppier check` for details."),
    ]
}

fn cell(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_transactions;

    fn page(index: u64, count: u64, total: u64, has_next: bool) -> serde_json::Value {
        json!({
            "page_index": index,
            "page_size": 8,
            "total_rows": total,
            "page_count": count,
            "first_row": index * 8 + 1,
            "last_row": (index * 8 + 8).min(total),
            "has_previous": index > 0,
            "has_next": has_next,
        })
    }

    #[test]
    fn renders_page_table_with_navigation_hint() {
        let data = json!({
            "currency": { "code": "CAD", "index": 1, "conversion_rate": 1.25 },
            "page": page(0, 2, 9, true),
            "rows": [
                {
                    "id": "1",
                    "date": "Jan 5th 2021",
                    "amount": "$12.50",
                    "card_holder": "Jo Lee",
                    "merchant": "Shop",
                    "unavailable": false
                }
            ],
            "issues": { "total": 0, "excluded_records": 0 }
        });

        let rendered = render_transactions(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Transactions (CAD), page 1 of 2:"));
            assert!(text.contains("Jan 5th 2021"));
            assert!(text.contains("$12.50"));
            assert!(text.contains("Showing 1–8 of 9."));
            assert!(text.contains("hoppier transactions --page 2 --page-size 8 --currency cad"));
            assert!(!text.contains("data issue"));
        }
    }

    #[test]
    fn out_of_range_page_points_back_to_the_last_page() {
        let data = json!({
            "currency": { "code": "USD", "index": 0, "conversion_rate": 1.25 },
            "page": page(4, 2, 9, false),
            "rows": [],
            "issues": { "total": 1, "excluded_records": 0 }
        });

        let rendered = render_transactions(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Page 5 is past the last page (2)."));
            assert!(text.contains("--page 2"));
        }
    }

    #[test]
    fn missing_rows_is_an_output_error() {
        let rendered = render_transactions(&json!({ "page": {} }));
        assert!(rendered.is_err());
    }
}
