use super::follow_up::FollowUp;
use super::prescription::{assign_group_ids, MedicineGroup};
use crate::constants::{DEFAULT_MARITAL_STATUS, PATIENT_FILENAME};
use crate::store::Document;
use chrono::{DateTime, Utc};
use clinic_types::{lenient, NonEmptyText};
use clinic_uuid::RecordId;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Keys owned by the server. They are never taken from a create or update payload.
pub const SERVER_OWNED_FIELDS: [&str; 4] = ["_id", "followUps", "createdAt", "updatedAt"];

/// Complaints recorded at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthConcerns {
    /// The presenting complaint.
    #[schema(value_type = String)]
    pub main: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_history: Option<String>,
    #[serde(default)]
    pub additional: Vec<String>,
}

/// A patient record: intake details, the intake prescription and every follow-up visit.
///
/// Follow-ups are stored in the order they were added. Display order is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[serde(deserialize_with = "lenient::required")]
    pub age: u32,
    #[schema(value_type = String)]
    pub gender: NonEmptyText,
    #[schema(value_type = String)]
    pub phone_number: NonEmptyText,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Date of the intake visit, `YYYY-MM-DD`.
    #[schema(value_type = String)]
    pub p_main_date: NonEmptyText,
    #[serde(
        default = "default_marital_status",
        deserialize_with = "marital_status_or_default"
    )]
    pub marital_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub husband_age: Option<u32>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub has_children: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub child_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_study: Option<String>,
    pub health_concerns: HealthConcerns,
    /// Intake prescription.
    #[serde(default)]
    pub medicines: Vec<MedicineGroup>,
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_suggestion: Option<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

fn default_marital_status() -> String {
    DEFAULT_MARITAL_STATUS.to_string()
}

/// `null` or blank text means the status was never filled in.
fn marital_status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_marital_status))
}

impl Patient {
    pub fn follow_up(&self, id: RecordId) -> Option<&FollowUp> {
        self.follow_ups.iter().find(|f| f.id == id)
    }

    pub(crate) fn follow_up_position(&self, id: RecordId) -> Option<usize> {
        self.follow_ups.iter().position(|f| f.id == id)
    }

    /// Issues ids to every medicine group (intake and follow-ups) that lacks one.
    pub(crate) fn assign_group_ids(&mut self) {
        assign_group_ids(&mut self.medicines);
        for follow_up in &mut self.follow_ups {
            assign_group_ids(&mut follow_up.medicines);
        }
    }
}

impl Document for Patient {
    const KIND: &'static str = "Patient";
    const FILE_NAME: &'static str = PATIENT_FILENAME;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intake() -> serde_json::Value {
        json!({
            "_id": RecordId::new().to_string(),
            "name": "A",
            "age": "30",
            "gender": "Female",
            "phoneNumber": "555",
            "pMainDate": "2024-01-01",
            "healthConcerns": {"main": "pain"},
            "weight": 61,
            "childAge": "",
            "createdAt": "2024-01-01T09:00:00Z",
            "updatedAt": "2024-01-01T09:00:00Z"
        })
    }

    #[test]
    fn decodes_intake_with_defaults() {
        let patient: Patient = serde_json::from_value(intake()).unwrap();

        assert_eq!(patient.age, 30);
        assert_eq!(patient.marital_status, "Unmarried");
        assert_eq!(patient.weight.as_deref(), Some("61"));
        assert_eq!(patient.child_age, None);
        assert!(!patient.has_children);
        assert!(patient.follow_ups.is_empty());
        assert!(patient.health_concerns.additional.is_empty());
    }

    #[test]
    fn null_status_and_children_flag_take_defaults() {
        let mut value = intake();
        value["maritalStatus"] = json!(null);
        value["hasChildren"] = json!(null);

        let patient: Patient = serde_json::from_value(value).unwrap();

        assert_eq!(patient.marital_status, "Unmarried");
        assert!(!patient.has_children);
    }

    #[test]
    fn missing_main_concern_is_rejected() {
        let mut value = intake();
        value["healthConcerns"] = json!({"physical": "back"});

        let err = serde_json::from_value::<Patient>(value).unwrap_err();
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let patient: Patient = serde_json::from_value(intake()).unwrap();
        let value = serde_json::to_value(&patient).unwrap();

        assert_eq!(value["phoneNumber"], "555");
        assert_eq!(value["maritalStatus"], "Unmarried");
        assert_eq!(value["followUps"], json!([]));
        assert!(value.get("childAge").is_none());
        assert!(value.get("_id").is_some());
    }
}
