use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses the timestamp shapes seen from the transaction feed.
///
/// RFC 3339 values keep the calendar date of their own offset. A bare run of
/// digits is read as epoch milliseconds.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        let millis = trimmed.parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(millis).map(|value| value.date_naive());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.date_naive());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.date());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Renders `Jan 5th 2021`.
pub fn format_display_date(date: &NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {day}{} {}",
        date.format("%b"),
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
