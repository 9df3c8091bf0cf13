use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    /// Aggregate cycle the data was projected from.
    pub cycle_id: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn success<T>(command: &str, cycle_id: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        cycle_id: cycle_id.to_string(),
        data: json_data,
    })
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope {
        ok: false,
        error: ErrorContract {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        },
        data: error.data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{failure_from_error, success};
    use crate::ClientError;

    #[test]
    fn success_wraps_payload_with_cycle() {
        let envelope = success("totals", "cyc_1", json!({ "rows": [] }));
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            assert!(value.ok);
            assert_eq!(value.command, "totals");
            assert_eq!(value.cycle_id, "cyc_1");
            assert_eq!(value.data["rows"], json!([]));
        }
    }

    #[test]
    fn failure_carries_error_data() {
        let error = ClientError::invalid_argument_for_command("bad", Some("totals"));
        let envelope = failure_from_error(&error);
        assert!(!envelope.ok);
        assert_eq!(envelope.error.code, "invalid_argument");
        assert!(envelope.data.is_some());
    }
}
