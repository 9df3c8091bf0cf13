use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hoppier_client::Currency;
use hoppier_client::view::{ALLOWED_PAGE_SIZES, PageSize};

pub fn parse_currency(value: &str) -> Result<Currency, String> {
    Currency::parse(value).map_err(|error| error.message)
}

pub fn parse_page_size(value: &str) -> Result<PageSize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|_| page_size_message(value))?;
    PageSize::new(parsed).map_err(|_| page_size_message(value))
}

fn page_size_message(value: &str) -> String {
    let allowed = ALLOWED_PAGE_SIZES
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(" or ");
    format!("page size must be {allowed}; got `{value}`")
}

/// Page numbers on the command line start at 1.
pub fn parse_page_number(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("page must be a whole number of 1 or more; got `{value}`")),
    }
}

/// Extended help shown after `hoppier check --help`.
pub const DATA_FILES_AFTER_HELP: &str = "\
Data directory:
  Resolved from --data-dir, then HOPPIER_DATA_DIR, then ~/.hoppier.
  It must hold exactly one of <name>.json or <name>.csv for each of
  users, merchants, and transactions.

  Accepted formats:
    JSON: a top-level array of objects, or {\"data\": {\"<name>\": [...]}}
    CSV:  one header row with the field names below; extra columns are ignored

users:
  cardId (required)        Identifier transactions point at
  firstName, lastName      Joined with a space for display

merchants:
  networkId (required)     Identifier transactions point at
  name                     Display name

transactions:
  id (required)            Transaction identifier
  date                     ISO 8601 date or timestamp, or epoch milliseconds
  cardId (required)        Card holder reference
  merchantNetworkId (required)
                           Merchant reference
  amountInUSDCents         Whole number of US cents; may be negative

Records with a missing or non-integer amount are listed by `hoppier check`
and shown as `unavailable`. References with no matching record render as
`Unknown`.
";

#[derive(Debug, Parser)]
#[command(
    name = "hoppier",
    version,
    about = "card spend ledger: transaction history and per-user totals",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one page of the transaction history
    Transactions {
        /// Page to show, starting at 1
        #[arg(long, default_value = "1", value_parser = parse_page_number)]
        page: usize,
        /// Rows per page: 8 or 11
        #[arg(long, default_value = "11", value_parser = parse_page_size)]
        page_size: PageSize,
        /// Display currency: usd or cad
        #[arg(long, default_value = "usd", value_parser = parse_currency)]
        currency: Currency,
        /// Directory holding users, merchants, and transactions files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Rank card holders by total spend
    Totals {
        /// Display currency: usd or cad
        #[arg(long, default_value = "usd", value_parser = parse_currency)]
        currency: Currency,
        /// Directory holding users, merchants, and transactions files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Summarize the loaded records and list every data issue
    #[command(after_long_help = DATA_FILES_AFTER_HELP)]
    Check {
        /// Directory holding users, merchants, and transactions files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn json(&self) -> bool {
        match self {
            Self::Transactions { json, .. } | Self::Totals { json, .. } | Self::Check { json, .. } => {
                *json
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transactions { .. } => "transactions",
            Self::Totals { .. } => "totals",
            Self::Check { .. } => "check",
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
