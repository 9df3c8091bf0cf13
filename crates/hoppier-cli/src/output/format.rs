use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const DEFAULT_WIDTH: usize = 120;
const MIN_WIDTH: usize = 40;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_WIDTH);
    cmp::max(from_env, MIN_WIDTH)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_len(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{}  {value}", pad_right(label, label_width)))
        .collect()
}

/// Renders a table, or labelled blocks when the table is wider than `max_width`.
///
/// Cells are never truncated.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width = INDENT
        + widths.iter().sum::<usize>()
        + COLUMN_GAP * columns.len().saturating_sub(1);
    if table_width > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .fold(display_len(column.name), cmp::max)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => pad_right(value, *width),
                Align::Right => pad_left(value, *width),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_len(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {}  {value}", pad_right(label, label_width)));
        }
    }

    output
}

// Width in chars; names may carry accents.
fn display_len(value: &str) -> usize {
    value.chars().count()
}

fn pad_right(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_len(value));
    format!("{value}{}", " ".repeat(fill))
}

fn pad_left(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_len(value));
    format!("{}{value}", " ".repeat(fill))
}
