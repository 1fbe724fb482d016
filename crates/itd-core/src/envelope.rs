//! Response envelope handling.
//!
//! The API wraps some payloads as `{"data": ...}` and all failures as
//! `{"error": {...}}`. Only a top-level object with exactly one of those
//! keys is unwrapped; anything else is decoded as-is.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, DecodeError};

/// Strip a single-key `data` / `error` wrapper.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.len() == 1 && (map.contains_key("data") || map.contains_key("error")) =>
        {
            let key = if map.contains_key("data") { "data" } else { "error" };
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Parse a response body and decode it into `T` after unwrapping.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(DecodeError::Json)?
    };
    decode_value(value)
}

/// Decode an already-parsed value into `T` after unwrapping.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(unwrap_envelope(value)).map_err(|source| DecodeError::Schema {
        schema: std::any::type_name::<T>(),
        source,
    })
}

/// Extract a structured error from `{"error": {...}}`.
///
/// Returns `None` unless the `error` member is present, truthy and shaped
/// like an error envelope.
pub fn parse_error_envelope(value: &Value) -> Option<ApiError> {
    let error = value.as_object()?.get("error")?;
    if !is_truthy(error) {
        return None;
    }
    serde_json::from_value(error.clone()).ok()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn data_wrapper_decodes_like_bare_object() {
        let wrapped: Item = decode(r#"{"data": {"id": "x"}}"#).unwrap();
        let bare: Item = decode(r#"{"id": "x"}"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn multi_key_object_is_left_intact() {
        let value = json!({"data": {"id": "x"}, "meta": {"total": 1}});
        assert_eq!(unwrap_envelope(value.clone()), value);
    }

    #[test]
    fn other_single_key_is_left_intact() {
        let value = json!({"post": {"id": "x"}});
        assert_eq!(unwrap_envelope(value.clone()), value);
    }

    #[test]
    fn error_envelope_is_extracted() {
        let value = json!({"error": {"code": "NOT_FOUND", "message": "Post not found"}});
        let err = parse_error_envelope(&value).unwrap();
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "Post not found");
    }

    #[test]
    fn falsy_error_is_not_an_envelope() {
        assert!(parse_error_envelope(&json!({"error": null, "id": "x"})).is_none());
        assert!(parse_error_envelope(&json!({"error": false})).is_none());
        assert!(parse_error_envelope(&json!({"id": "x"})).is_none());
    }

    #[test]
    fn schema_mismatch_names_target_type() {
        let err = decode::<Item>(r#"{"name": "x"}"#).unwrap_err();
        match err {
            DecodeError::Schema { schema, .. } => assert!(schema.ends_with("Item")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_a_json_error() {
        assert!(matches!(
            decode::<Item>("<html>"),
            Err(DecodeError::Json(_))
        ));
    }
}
