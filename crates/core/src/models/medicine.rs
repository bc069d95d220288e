use crate::constants::MEDICINE_FILENAME;
use crate::store::Document;
use chrono::{DateTime, Utc};
use clinic_types::NonEmptyText;
use clinic_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Keys a medicine payload can never set.
pub const SERVER_OWNED_FIELDS: [&str; 4] = ["id", "_id", "createdAt", "updatedAt"];

/// The fixed set of remedy categories the catalog is organised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum MedicineCategory {
    Uncertainty,
    Oversensitive,
    Fear,
    Loneliness,
    Overcare,
    #[serde(rename = "Lack of interest")]
    LackOfInterest,
    Despair,
    Emergency,
    Uncategorized,
}

impl MedicineCategory {
    /// The eight real categories in display order.
    pub const KNOWN: [MedicineCategory; 8] = [
        MedicineCategory::Uncertainty,
        MedicineCategory::Oversensitive,
        MedicineCategory::Fear,
        MedicineCategory::Loneliness,
        MedicineCategory::Overcare,
        MedicineCategory::LackOfInterest,
        MedicineCategory::Despair,
        MedicineCategory::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MedicineCategory::Uncertainty => "Uncertainty",
            MedicineCategory::Oversensitive => "Oversensitive",
            MedicineCategory::Fear => "Fear",
            MedicineCategory::Loneliness => "Loneliness",
            MedicineCategory::Overcare => "Overcare",
            MedicineCategory::LackOfInterest => "Lack of interest",
            MedicineCategory::Despair => "Despair",
            MedicineCategory::Emergency => "Emergency",
            MedicineCategory::Uncategorized => "Uncategorized",
        }
    }

    /// Matches a stored category string, ignoring case and surrounding whitespace.
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        Self::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(MedicineCategory::Uncategorized)
    }
}

impl std::fmt::Display for MedicineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry. Prescriptions copy its name; nothing links back to it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    /// Stored as entered; see [`Medicine::category`] for the classified value.
    #[serde(rename = "category")]
    #[schema(value_type = String)]
    pub category_label: NonEmptyText,
    #[schema(value_type = String)]
    pub one_liner: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Inline encoded images (data URLs).
    #[serde(default)]
    pub images: Vec<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    pub fn category(&self) -> MedicineCategory {
        MedicineCategory::classify(self.category_label.as_str())
    }
}

impl Document for Medicine {
    const KIND: &'static str = "Medicine";
    const FILE_NAME: &'static str = MEDICINE_FILENAME;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(MedicineCategory::classify("fear"), MedicineCategory::Fear);
        assert_eq!(
            MedicineCategory::classify(" LACK OF INTEREST "),
            MedicineCategory::LackOfInterest
        );
        assert_eq!(
            MedicineCategory::classify("Cold"),
            MedicineCategory::Uncategorized
        );
    }

    #[test]
    fn serializes_id_without_underscore() {
        let medicine: Medicine = serde_json::from_value(json!({
            "id": RecordId::new().to_string(),
            "name": "Arnica",
            "category": "Emergency",
            "oneLiner": "for shocks",
            "createdAt": "2024-01-01T09:00:00Z",
            "updatedAt": "2024-01-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(medicine.category(), MedicineCategory::Emergency);

        let value = serde_json::to_value(&medicine).unwrap();
        assert!(value.get("_id").is_none());
        assert_eq!(value["category"], "Emergency");
        assert_eq!(value["images"], json!([]));
    }
}
