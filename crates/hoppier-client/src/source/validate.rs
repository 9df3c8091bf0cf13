use tracing::warn;

use crate::aggregate::{IssueKind, RecordIssue};
use crate::records::{Merchant, RawAmount, RecordKind, Transaction, User};
use crate::source::SourceBatch;
use crate::source::parse::RawRow;

pub(crate) fn users_from_rows(rows: Vec<RawRow>) -> SourceBatch<User> {
    collect_batch(rows, RecordKind::User, |row, issues| {
        let card_id = require(row, RecordKind::User, "cardId", issues)?;
        Some(User {
            card_id,
            first_name: row.field("firstName").unwrap_or_default().to_string(),
            last_name: row.field("lastName").unwrap_or_default().to_string(),
        })
    })
}

pub(crate) fn merchants_from_rows(rows: Vec<RawRow>) -> SourceBatch<Merchant> {
    collect_batch(rows, RecordKind::Merchant, |row, issues| {
        let network_id = require(row, RecordKind::Merchant, "networkId", issues)?;
        Some(Merchant {
            network_id,
            name: row.field("name").unwrap_or_default().to_string(),
        })
    })
}

pub(crate) fn transactions_from_rows(rows: Vec<RawRow>) -> SourceBatch<Transaction> {
    collect_batch(rows, RecordKind::Transaction, |row, issues| {
        let id = require(row, RecordKind::Transaction, "id", issues);
        let card_id = require(row, RecordKind::Transaction, "cardId", issues);
        let merchant_network_id =
            require(row, RecordKind::Transaction, "merchantNetworkId", issues);

        Some(Transaction {
            id: id?,
            date: row.field("date").map(str::to_string),
            card_id: card_id?,
            merchant_network_id: merchant_network_id?,
            amount_in_usd_cents: RawAmount::parse(row.field("amountInUSDCents")),
        })
    })
}

fn collect_batch<T, F>(rows: Vec<RawRow>, kind: RecordKind, mut build: F) -> SourceBatch<T>
where
    F: FnMut(&RawRow, &mut Vec<RecordIssue>) -> Option<T>,
{
    let mut records = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();

    for row in &rows {
        let mut row_issues = Vec::new();
        match build(row, &mut row_issues) {
            Some(record) if row_issues.is_empty() => records.push(record),
            _ => {
                warn!(
                    record_set = kind.as_str(),
                    row = row.row,
                    "source record skipped: required field missing"
                );
                issues.extend(row_issues);
            }
        }
    }

    SourceBatch { records, issues }
}

fn require(
    row: &RawRow,
    kind: RecordKind,
    field: &str,
    issues: &mut Vec<RecordIssue>,
) -> Option<String> {
    let value = row.field(field).map(str::to_string);
    if value.is_none() {
        issues.push(
            RecordIssue::new(
                IssueKind::MissingRequiredField,
                kind,
                row.row,
                format!("{field} must be present and non-empty."),
            )
            .with_field(field),
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{merchants_from_rows, transactions_from_rows, users_from_rows};
    use crate::aggregate::IssueKind;
    use crate::records::{RawAmount, RecordKind};
    use crate::source::parse::{SourceFormat, parse_records};

    #[test]
    fn users_without_card_id_are_skipped_and_reported() {
        let rows = parse_records(
            r#"[{"cardId": "A", "firstName": "Jo", "lastName": "Lee"}, {"firstName": "No", "lastName": "Card"}]"#,
            SourceFormat::Json,
            RecordKind::User,
            Path::new("users.json"),
        );
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            let batch = users_from_rows(rows);
            assert_eq!(batch.records.len(), 1);
            assert_eq!(batch.records[0].display_name(), "Jo Lee");
            assert_eq!(batch.issues.len(), 1);
            assert_eq!(batch.issues[0].kind, IssueKind::MissingRequiredField);
            assert_eq!(batch.issues[0].row, 2);
            assert_eq!(batch.issues[0].field.as_deref(), Some("cardId"));
        }
    }

    #[test]
    fn merchant_name_defaults_to_empty() {
        let rows = parse_records(
            "networkId,name\nM1,\n",
            SourceFormat::Csv,
            RecordKind::Merchant,
            Path::new("merchants.csv"),
        );
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            let batch = merchants_from_rows(rows);
            assert_eq!(batch.records.len(), 1);
            assert_eq!(batch.records[0].name, "");
            assert!(batch.issues.is_empty());
        }
    }

    #[test]
    fn transaction_reports_every_missing_identifier() {
        let rows = parse_records(
            r#"[{"amountInUSDCents": 100}]"#,
            SourceFormat::Json,
            RecordKind::Transaction,
            Path::new("transactions.json"),
        );
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            let batch = transactions_from_rows(rows);
            assert!(batch.records.is_empty());
            let fields = batch
                .issues
                .iter()
                .filter_map(|issue| issue.field.clone())
                .collect::<Vec<String>>();
            assert_eq!(fields, vec!["id", "cardId", "merchantNetworkId"]);
        }
    }

    #[test]
    fn transaction_keeps_bad_amounts_for_the_aggregator() {
        let rows = parse_records(
            "id,date,cardId,merchantNetworkId,amountInUSDCents\n1,2021-01-05,A,M1,12.50\n2,,A,M1,\n",
            SourceFormat::Csv,
            RecordKind::Transaction,
            Path::new("transactions.csv"),
        );
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            let batch = transactions_from_rows(rows);
            assert_eq!(batch.records.len(), 2);
            assert_eq!(
                batch.records[0].amount_in_usd_cents,
                RawAmount::Invalid("12.50".to_string())
            );
            assert_eq!(batch.records[1].amount_in_usd_cents, RawAmount::Missing);
            assert_eq!(batch.records[1].date, None);
        }
    }
}
