use std::fs;
use std::path::{Path, PathBuf};

use hoppier_client::{ClientResult, SuccessEnvelope};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn temp_data_dir(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&data_dir)?;
    Ok((dir, data_dir))
}

pub fn write_json(dir: &Path, name: &str, rows: &[Value]) {
    let body = serde_json::to_string_pretty(rows);
    assert!(body.is_ok());
    if let Ok(text) = body {
        assert!(fs::write(dir.join(name), text).is_ok());
    }
}

pub fn write_text(dir: &Path, name: &str, body: &str) {
    assert!(fs::write(dir.join(name), body).is_ok());
}

pub fn user(card_id: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "cardId": card_id,
        "firstName": first_name,
        "lastName": last_name,
    })
}

pub fn merchant(network_id: &str, name: &str) -> Value {
    json!({
        "networkId": network_id,
        "name": name,
    })
}

pub fn transaction(id: i64, date: &str, card_id: &str, merchant: &str, cents: Value) -> Value {
    json!({
        "id": id,
        "date": date,
        "cardId": card_id,
        "merchantNetworkId": merchant,
        "amountInUSDCents": cents,
    })
}

/// Writes the worked example: one user, one merchant, two transactions.
pub fn write_worked_example(dir: &Path) {
    write_json(dir, "users.json", &[user("A", "Jo", "Lee")]);
    write_json(dir, "merchants.json", &[merchant("M1", "Shop")]);
    write_json(
        dir,
        "transactions.json",
        &[
            transaction(1, "2021-01-05T10:00:00.000Z", "A", "M1", json!(1000)),
            transaction(2, "2021-01-06T10:00:00.000Z", "A", "M1", json!(500)),
        ],
    );
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}
