use super::prescription::MedicineGroup;
use clinic_types::NonEmptyText;
use clinic_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fields a caller may set on a follow-up. Everything else in an add or update
/// payload is ignored.
pub const FOLLOW_UP_FIELDS: [&str; 7] = [
    "date",
    "notes",
    "pastHistory",
    "visitObservation",
    "previousAppointment",
    "medicines",
    "overallSuggestion",
];

/// Which earlier prescription a visit was repeated from.
///
/// On the wire this is `"none"`, `"initial"` (the intake prescription) or the `date` of an
/// earlier follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatSource {
    Fresh,
    Initial,
    Visit(String),
}

impl RepeatSource {
    pub const FRESH_LABEL: &'static str = "none";
    pub const INITIAL_LABEL: &'static str = "initial";

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" | Self::FRESH_LABEL => RepeatSource::Fresh,
            Self::INITIAL_LABEL => RepeatSource::Initial,
            date => RepeatSource::Visit(date.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RepeatSource::Fresh => Self::FRESH_LABEL,
            RepeatSource::Initial => Self::INITIAL_LABEL,
            RepeatSource::Visit(date) => date,
        }
    }
}

impl Serialize for RepeatSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RepeatSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(RepeatSource::from_label(&label))
    }
}

/// A dated visit embedded in a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Visit date as entered. Not required to be unique.
    #[schema(value_type = String)]
    pub date: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub previous_appointment: Option<RepeatSource>,
    #[serde(default)]
    pub medicines: Vec<MedicineGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_suggestion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeat_source_labels() {
        assert_eq!(RepeatSource::from_label("none"), RepeatSource::Fresh);
        assert_eq!(RepeatSource::from_label(""), RepeatSource::Fresh);
        assert_eq!(RepeatSource::from_label("initial"), RepeatSource::Initial);
        assert_eq!(
            RepeatSource::from_label("2024-01-01"),
            RepeatSource::Visit("2024-01-01".into())
        );
        assert_eq!(RepeatSource::Visit("2024-01-01".into()).label(), "2024-01-01");
    }

    #[test]
    fn follow_up_without_previous_appointment_is_valid() {
        let id = RecordId::new();
        let follow_up: FollowUp = serde_json::from_value(json!({
            "_id": id.to_string(),
            "date": "2024-01-01",
            "previousAppointment": null
        }))
        .unwrap();

        assert_eq!(follow_up.id, id);
        assert_eq!(follow_up.previous_appointment, None);
        assert!(follow_up.medicines.is_empty());

        let back = serde_json::to_value(&follow_up).unwrap();
        assert_eq!(back, json!({"_id": id.to_string(), "date": "2024-01-01", "medicines": []}));
    }

    #[test]
    fn blank_date_is_rejected() {
        let result = serde_json::from_value::<FollowUp>(json!({
            "_id": RecordId::new().to_string(),
            "date": " "
        }));
        assert!(result.is_err());
    }
}
