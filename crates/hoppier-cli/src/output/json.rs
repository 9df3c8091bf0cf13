use std::io;

use hoppier_client::contracts::envelope::failure_from_error;
use hoppier_client::{ClientError, SuccessEnvelope};
use serde::Serialize;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use hoppier_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    #[test]
    fn success_json_keeps_the_full_envelope() {
        let payload = SuccessEnvelope {
            ok: true,
            command: "totals".to_string(),
            version: "0.1.0".to_string(),
            cycle_id: "cyc_1".to_string(),
            data: json!({ "rows": [] }),
        };

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["command"], "totals");
                assert_eq!(value["cycle_id"], "cyc_1");
                assert_eq!(value["data"]["rows"], json!([]));
            }
        }
    }

    #[test]
    fn error_json_uses_universal_shape() {
        let error = ClientError::new("source_not_found", "missing", vec!["add files".to_string()]);
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(false));
                assert_eq!(value["error"]["code"], "source_not_found");
                assert_eq!(value["error"]["recovery_steps"][0], "add files");
                assert!(value.get("data").is_none());
            }
        }
    }
}
