use serde::Serialize;

use crate::money::MAX_EXACT_USD_CENTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    User,
    Merchant,
    Transaction,
}

impl RecordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Merchant => "merchant",
            Self::Transaction => "transaction",
        }
    }

    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Merchant => "merchants",
            Self::Transaction => "transactions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub card_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Merchant {
    pub network_id: String,
    pub name: String,
}

/// Amount as delivered by the source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RawAmount {
    Cents(i64),
    Invalid(String),
    Missing,
}

impl RawAmount {
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|candidate| !candidate.is_empty()) else {
            return Self::Missing;
        };

        let cents = match raw.parse::<i64>() {
            Ok(cents) => Some(cents),
            Err(_) => raw
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite() && number.fract() == 0.0)
                .filter(|number| number.abs() <= MAX_EXACT_USD_CENTS as f64)
                .map(|number| number as i64),
        };

        match cents {
            Some(cents) if cents.unsigned_abs() <= MAX_EXACT_USD_CENTS.unsigned_abs() => {
                Self::Cents(cents)
            }
            _ => Self::Invalid(raw.to_string()),
        }
    }

    pub fn cents(&self) -> Option<i64> {
        match self {
            Self::Cents(value) => Some(*value),
            Self::Invalid(_) | Self::Missing => None,
        }
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Cents(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub date: Option<String>,
    pub card_id: String,
    pub merchant_network_id: String,
    pub amount_in_usd_cents: RawAmount,
}
