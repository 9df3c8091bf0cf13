use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Serialize, Serializer};

use crate::{ClientError, ClientResult};

/// Fixed USD → secondary currency factor.
pub const CONVERSION_RATE: f64 = 1.25;

/// Largest USD magnitude whose converted value is still exact in `f64`
/// (`2^53 / CONVERSION_RATE`, truncated).
pub const MAX_EXACT_USD_CENTS: i64 = 7_205_759_403_792_793;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Cad,
}

impl Currency {
    pub const fn index(self) -> usize {
        match self {
            Self::Usd => 0,
            Self::Cad => 1,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cad => "CAD",
        }
    }

    pub fn from_index(index: usize) -> ClientResult<Self> {
        match index {
            0 => Ok(Self::Usd),
            1 => Ok(Self::Cad),
            _ => Err(ClientError::invalid_argument(&format!(
                "currency index must be 0 (USD) or 1 (CAD); got {index}"
            ))),
        }
    }

    pub fn parse(value: &str) -> ClientResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "usd" | "0" => Ok(Self::Usd),
            "cad" | "1" => Ok(Self::Cad),
            other => Err(ClientError::invalid_argument(&format!(
                "currency must be one of: usd, cad; got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One minor-unit amount in both currencies.
///
/// `secondary_cents` is always `usd_cents * CONVERSION_RATE`. The rate is a
/// multiple of 0.25, so sums of converted values stay exact in `f64` and no
/// rounding happens until [`format_cents`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoneyPair {
    usd_cents: i64,
    secondary_cents: f64,
}

impl MoneyPair {
    pub fn from_usd_cents(usd_cents: i64) -> Self {
        Self {
            usd_cents,
            secondary_cents: usd_cents as f64 * CONVERSION_RATE,
        }
    }

    pub fn usd_cents(&self) -> i64 {
        self.usd_cents
    }

    pub fn secondary_cents(&self) -> f64 {
        self.secondary_cents
    }

    pub fn amount(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.usd_cents as f64,
            Currency::Cad => self.secondary_cents,
        }
    }

    pub fn formatted(&self, currency: Currency) -> String {
        format_cents(self.amount(currency))
    }

    /// Component-wise sum, or `None` once the USD side leaves the exact range.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let usd_cents = self
            .usd_cents
            .checked_add(other.usd_cents)
            .filter(|sum| sum.unsigned_abs() <= MAX_EXACT_USD_CENTS.unsigned_abs())?;
        Some(Self {
            usd_cents,
            secondary_cents: self.secondary_cents + other.secondary_cents,
        })
    }
}

impl Add for MoneyPair {
    type Output = Self;

    /// Saturates instead of overflowing; use [`MoneyPair::checked_add`] to detect it.
    fn add(self, other: Self) -> Self {
        self.checked_add(other).unwrap_or_else(|| {
            Self::from_usd_cents(self.usd_cents.saturating_add(other.usd_cents))
        })
    }
}

impl AddAssign for MoneyPair {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Serialize for MoneyPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.usd_cents, self.secondary_cents).serialize(serializer)
    }
}

/// Renders minor units as `$x.xx`, rounding half-cents away from zero.
pub fn format_cents(cents: f64) -> String {
    let whole = cents.round();
    // Saturating cast; finite amounts here are far below u64::MAX.
    let units = whole.abs() as u64;
    let sign = if whole < 0.0 && units > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", units / 100, units % 100)
}

#[cfg(test)]
mod tests {
    use super::{CONVERSION_RATE, Currency, MAX_EXACT_USD_CENTS, MoneyPair, format_cents};

    #[test]
    fn pair_converts_with_fixed_rate() {
        let pair = MoneyPair::from_usd_cents(1000);
        assert_eq!(pair.usd_cents(), 1000);
        assert_eq!(pair.secondary_cents(), 1250.0);
    }

    #[test]
    fn addition_keeps_conversion_exact() {
        let mut total = MoneyPair::default();
        for cents in [1, 3, 7, 999, 12_345, -42] {
            total += MoneyPair::from_usd_cents(cents);
        }
        assert_eq!(total.usd_cents(), 13_313);
        assert_eq!(
            total.secondary_cents(),
            total.usd_cents() as f64 * CONVERSION_RATE
        );
    }

    #[test]
    fn checked_add_stops_at_the_exact_range() {
        let top = MoneyPair::from_usd_cents(MAX_EXACT_USD_CENTS);
        assert!(top.checked_add(MoneyPair::from_usd_cents(1)).is_none());
        assert!(
            MoneyPair::from_usd_cents(i64::MAX)
                .checked_add(MoneyPair::from_usd_cents(1))
                .is_none()
        );

        let sum = top.checked_add(MoneyPair::from_usd_cents(-1));
        assert_eq!(sum.map(|pair| pair.usd_cents()), Some(MAX_EXACT_USD_CENTS - 1));
        assert_eq!(
            top.secondary_cents(),
            MAX_EXACT_USD_CENTS as f64 * CONVERSION_RATE
        );
    }

    #[test]
    fn plain_addition_saturates_instead_of_panicking() {
        let total = MoneyPair::from_usd_cents(i64::MAX) + MoneyPair::from_usd_cents(1);
        assert_eq!(total.usd_cents(), i64::MAX);
    }

    #[test]
    fn currency_selects_component() {
        let pair = MoneyPair::from_usd_cents(1500);
        assert_eq!(pair.formatted(Currency::Usd), "$15.00");
        assert_eq!(pair.formatted(Currency::Cad), "$18.75");
    }

    #[test]
    fn currency_parses_names_and_indexes() {
        assert!(matches!(Currency::parse("USD"), Ok(Currency::Usd)));
        assert!(matches!(Currency::parse("cad"), Ok(Currency::Cad)));
        assert!(matches!(Currency::parse("1"), Ok(Currency::Cad)));
        assert!(matches!(Currency::from_index(0), Ok(Currency::Usd)));

        let invalid = Currency::from_index(2);
        assert!(invalid.is_err());
        if let Err(error) = invalid {
            assert_eq!(error.code, "invalid_argument");
        }
        assert!(Currency::parse("eur").is_err());
    }

    #[test]
    fn format_rounds_only_at_display_time() {
        assert_eq!(format_cents(1.25), "$0.01");
        assert_eq!(format_cents(625.0), "$6.25");
        assert_eq!(format_cents(0.0), "$0.00");
        assert_eq!(format_cents(-1250.0), "-$12.50");
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(format_cents(12.5), "$0.13");
        assert_eq!(format_cents(62.5), "$0.63");
        assert_eq!(format_cents(1262.5), "$12.63");
        assert_eq!(format_cents(-12.5), "-$0.13");
        assert_eq!(MoneyPair::from_usd_cents(10).formatted(Currency::Cad), "$0.13");
    }

    #[test]
    fn amounts_that_round_to_zero_have_no_sign() {
        assert_eq!(format_cents(-0.25), "$0.00");
        assert_eq!(format_cents(-0.0), "$0.00");
    }

    #[test]
    fn pair_serializes_as_ordered_pair() {
        let value = serde_json::to_value(MoneyPair::from_usd_cents(500));
        assert!(value.is_ok());
        if let Ok(json) = value {
            assert_eq!(json, serde_json::json!([500, 625.0]));
        }
    }
}
