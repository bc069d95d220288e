//! Small utilities shared by the services.

use crate::{ClinicError, ClinicResult};
use chrono::{DateTime, Utc};
use clinic_uuid::RecordId;
use serde_json::{Map, Value};

/// Parses a record id taken from a request path.
///
/// # Errors
///
/// Returns [`ClinicError::InvalidId`] naming `kind` if `raw` is not a canonical record id.
pub fn parse_record_id(kind: &'static str, raw: &str) -> ClinicResult<RecordId> {
    RecordId::parse(raw).map_err(|source| ClinicError::InvalidId { kind, source })
}

pub(crate) fn json_value<T: serde::Serialize>(value: T) -> ClinicResult<Value> {
    serde_json::to_value(value).map_err(ClinicError::Serialization)
}

pub(crate) fn stamp(doc: &mut Map<String, Value>, key: &str, at: DateTime<Utc>) -> ClinicResult<()> {
    doc.insert(key.to_string(), json_value(at)?);
    Ok(())
}

/// True if `key` is missing, `null` or a blank string.
pub(crate) fn is_blank(doc: &Map<String, Value>, key: &str) -> bool {
    match doc.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_record_id_names_the_kind() {
        let err = parse_record_id("patient", "123").unwrap_err();
        assert!(matches!(err, ClinicError::InvalidId { kind: "patient", .. }));
        assert!(err.to_string().starts_with("invalid patient id"));

        let id = RecordId::new();
        assert_eq!(parse_record_id("patient", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn is_blank_covers_missing_null_and_whitespace() {
        let doc = json!({"a": null, "b": "  ", "c": "x", "d": 0});
        let doc = doc.as_object().unwrap();

        assert!(is_blank(doc, "a"));
        assert!(is_blank(doc, "b"));
        assert!(is_blank(doc, "missing"));
        assert!(!is_blank(doc, "c"));
        assert!(!is_blank(doc, "d"));
    }
}
