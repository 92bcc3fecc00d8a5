use std::io;

use serde::Serialize;
use shopdash_client::contracts::envelope::failure_from_error;
use shopdash_client::{ClientError, SuccessEnvelope};

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
    use serde_json::{Value, json};
    use shopdash_client::{ClientError, SuccessEnvelope};

    use super::{render_error_json, render_success_json};

    #[test]
    fn success_json_is_the_full_envelope() {
        let payload = SuccessEnvelope {
            ok: true,
            command: "target show".to_string(),
            version: "v1".to_string(),
            data: json!({ "targets": { "daily": 30000 } }),
        };

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["command"], json!("target show"));
                assert_eq!(value["data"]["targets"]["daily"], json!(30000));
            }
        }
    }

    #[test]
    fn error_json_carries_code_and_recovery_steps() {
        let error = ClientError::record_not_found("sale", "sale_missing");
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(false));
                assert_eq!(value["error"]["code"], json!("record_not_found"));
                assert!(value["error"]["recovery_steps"].is_array());
                assert_eq!(value["data"]["id"], json!("sale_missing"));
            }
        }
    }
}
