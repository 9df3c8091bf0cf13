use hoppier_client::commands;
use hoppier_client::commands::check::CheckRunOptions;
use hoppier_client::commands::totals::TotalsRunOptions;
use hoppier_client::commands::transactions::TransactionsRunOptions;
use hoppier_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Transactions {
            page,
            page_size,
            currency,
            data_dir,
            json: _,
        } => commands::transactions::run_with_options(TransactionsRunOptions {
            currency: *currency,
            page_index: page.saturating_sub(1),
            page_size: *page_size,
            data_dir: data_dir.as_deref(),
        }),
        Commands::Totals {
            currency, data_dir, ..
        } => commands::totals::run_with_options(TotalsRunOptions {
            currency: *currency,
            data_dir: data_dir.as_deref(),
        }),
        Commands::Check { data_dir, .. } => commands::check::run_with_options(CheckRunOptions {
            data_dir: data_dir.as_deref(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::dispatch;
    use crate::cli::parse_from;

    fn write_fixture(dir: &std::path::Path) {
        let users = json!([{ "cardId": "A", "firstName": "Jo", "lastName": "Lee" }]);
        let merchants = json!([{ "networkId": "M1", "name": "Shop" }]);
        let transactions = json!([
            { "id": 1, "date": "2021-01-05", "cardId": "A", "merchantNetworkId": "M1", "amountInUSDCents": 1000 },
            { "id": 2, "date": "2021-01-06", "cardId": "A", "merchantNetworkId": "M1", "amountInUSDCents": 500 }
        ]);
        assert!(fs::write(dir.join("users.json"), users.to_string()).is_ok());
        assert!(fs::write(dir.join("merchants.json"), merchants.to_string()).is_ok());
        assert!(fs::write(dir.join("transactions.json"), transactions.to_string()).is_ok());
    }

    #[test]
    fn dispatches_to_expected_command_names() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            write_fixture(dir.path());
            let data_dir = dir.path().display().to_string();

            for expected_command in ["transactions", "totals", "check"] {
                let parsed = parse_from(["hoppier", expected_command, "--data-dir", &data_dir]);
                assert!(parsed.is_ok());
                if let Ok(cli) = parsed {
                    let response = dispatch(&cli);
                    assert!(response.is_ok());
                    if let Ok(success) = response {
                        assert_eq!(success.command, expected_command);
                    }
                }
            }
        }
    }

    #[test]
    fn page_number_is_converted_to_a_zero_based_index() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            write_fixture(dir.path());
            let data_dir = dir.path().display().to_string();

            let parsed = parse_from([
                "hoppier",
                "transactions",
                "--page",
                "2",
                "--page-size",
                "8",
                "--data-dir",
                &data_dir,
            ]);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli);
                assert!(response.is_ok());
                if let Ok(success) = response {
                    assert_eq!(success.data["page"]["page_index"], json!(1));
                    assert_eq!(success.data["rows"], json!([]));
                }
            }
        }
    }
}
