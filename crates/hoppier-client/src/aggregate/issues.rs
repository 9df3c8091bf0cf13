use serde::Serialize;

use crate::records::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingRequiredField,
    MissingAmount,
    InvalidAmount,
    MissingUserReference,
    MissingMerchantReference,
    DuplicateCardId,
    DuplicateNetworkId,
    DuplicateTransactionId,
    TotalOutOfRange,
}

impl IssueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::MissingAmount => "missing_amount",
            Self::InvalidAmount => "invalid_amount",
            Self::MissingUserReference => "missing_user_reference",
            Self::MissingMerchantReference => "missing_merchant_reference",
            Self::DuplicateCardId => "duplicate_card_id",
            Self::DuplicateNetworkId => "duplicate_network_id",
            Self::DuplicateTransactionId => "duplicate_transaction_id",
            Self::TotalOutOfRange => "total_out_of_range",
        }
    }

    /// Whether the affected record was left out of the derived indexes.
    ///
    /// A `TotalOutOfRange` transaction keeps its own amount but is left out of
    /// its card holder's total.
    pub const fn excludes_record(self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField
                | Self::MissingAmount
                | Self::InvalidAmount
                | Self::TotalOutOfRange
        )
    }

    pub const fn severity(self) -> IssueSeverity {
        if self.excludes_record() {
            IssueSeverity::Error
        } else {
            IssueSeverity::Warning
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// One per-record problem found while loading or aggregating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub record: RecordKind,
    /// 1-based position within its record set.
    pub row: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl RecordIssue {
    pub fn new(kind: IssueKind, record: RecordKind, row: i64, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            record,
            row,
            key: None,
            field: None,
            message,
            received: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_received(mut self, received: &str) -> Self {
        self.received = Some(received.to_string());
        self
    }
}
