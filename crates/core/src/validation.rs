//! Payload validation.
//!
//! Request bodies arrive as loose JSON. They are shaped into a candidate document (defaults
//! filled in, server-owned keys stripped or overwritten) and then decoded into the typed
//! model. Decoding *is* the schema check: required fields, blank text and out-of-range
//! numbers all fail there, and the failing field path is reported back to the caller.

use crate::{ClinicError, ClinicResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Decodes `value` into `T`, turning any mismatch into a [`ClinicError::Validation`] that
/// names the failing field, e.g. `patient validation failed at healthConcerns.main: ...`.
pub fn decode<T: DeserializeOwned>(what: &str, value: Value) -> ClinicResult<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        ClinicError::Validation(format!("{what} validation failed at {path}: {source}"))
    })
}

/// Requires the payload to be a JSON object.
pub fn into_object(what: &str, value: Value) -> ClinicResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ClinicError::Validation(format!(
            "{what} payload must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Converts a stored document back into a JSON object so a patch can be laid over it.
pub fn to_object<T: Serialize>(doc: &T) -> ClinicResult<Map<String, Value>> {
    match serde_json::to_value(doc).map_err(ClinicError::Serialization)? {
        Value::Object(map) => Ok(map),
        _ => Err(ClinicError::Validation(
            "document did not serialize to an object".into(),
        )),
    }
}

/// Copies every key of `patch` accepted by `accept` into `target`, overwriting what is there.
///
/// Keys that are absent from the patch are left alone; this is what gives updates their
/// "only the fields you send change" behaviour.
pub fn overlay(
    target: &mut Map<String, Value>,
    patch: Map<String, Value>,
    accept: impl Fn(&str) -> bool,
) {
    for (key, value) in patch {
        if accept(&key) {
            target.insert(key, value);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Inner {
        main: clinic_types::NonEmptyText,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Outer {
        #[allow(dead_code)]
        health_concerns: Inner,
    }

    #[test]
    fn decode_reports_nested_field_path() {
        let err = decode::<Outer>("patient", json!({"healthConcerns": {"main": "  "}}))
            .expect_err("blank main concern must fail");

        let msg = err.to_string();
        assert!(msg.starts_with("patient validation failed at healthConcerns.main"));
        assert!(msg.contains("Text cannot be empty"));
    }

    #[test]
    fn decode_reports_missing_field_at_root() {
        let err = decode::<Outer>("patient", json!({})).expect_err("missing field must fail");

        assert_eq!(
            err.to_string(),
            "patient validation failed at <root>: missing field `healthConcerns`"
        );
    }

    #[test]
    fn into_object_rejects_arrays() {
        let err = into_object("medicine", json!([1, 2])).expect_err("array is not an object");
        assert!(matches!(err, ClinicError::Validation(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn overlay_only_touches_accepted_keys() {
        let mut target = json!({"a": 1, "b": 2}).as_object().cloned().unwrap();
        let patch = json!({"b": 20, "c": 30}).as_object().cloned().unwrap();

        overlay(&mut target, patch, |k| k != "c");

        assert_eq!(Value::Object(target), json!({"a": 1, "b": 20}));
    }
}
