//! Prescription building blocks shared by intake and follow-up visits.
//!
//! A prescription is a list of [`MedicineGroup`]s ("bottles"). Each group carries the
//! names of its sub-medicines by value: nothing here points at the medicine catalog, so
//! editing or deleting a catalog entry never rewrites a past prescription.
//!
//! Form-only flags sent by the authoring UI (`isEditing`, `showReason`, `showSuggestion`)
//! are not part of these types and are dropped on decode.

use clinic_types::{lenient, BottleNumber};
use clinic_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a group's sub-medicine rows were seeded from.
///
/// Stored as the `mainCategory` string: `""` for a custom group, `"Main"`/`"Main2"` for the
/// blank seven-slot layouts, anything else is the name of the bunch that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSource {
    #[default]
    Custom,
    Main,
    Main2,
    Bunch(String),
}

impl GroupSource {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" => GroupSource::Custom,
            "Main" => GroupSource::Main,
            "Main2" => GroupSource::Main2,
            other => GroupSource::Bunch(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GroupSource::Custom => "",
            GroupSource::Main => "Main",
            GroupSource::Main2 => "Main2",
            GroupSource::Bunch(name) => name,
        }
    }

    /// True for the sources that seed blank, editable slots.
    pub fn is_main(&self) -> bool {
        matches!(self, GroupSource::Main | GroupSource::Main2)
    }
}

impl Serialize for GroupSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for GroupSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(GroupSource::from_label(label.as_deref().unwrap_or_default()))
    }
}

/// One remedy inside a group. Only the name and the reason are durable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct SubMedicine {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SubMedicine {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: None,
        }
    }
}

/// Dosage timing shared by every sub-medicine in a group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Timings {
    #[serde(default, deserialize_with = "lenient::text")]
    pub am: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pm: String,
    /// Frequency, kept as the text the clinician typed.
    #[serde(default, deserialize_with = "lenient::text")]
    pub freq: String,
}

/// A "bottle": several sub-medicines dispensed together with shared timing instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineGroup {
    /// Stable group id. Issued by the server when the client does not send one.
    #[serde(default)]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<u8>, minimum = 1, maximum = 3)]
    pub bottle_number: Option<BottleNumber>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bottle_size: Option<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub main_category: GroupSource,
    #[serde(default)]
    pub sub_medicines: Vec<SubMedicine>,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Gives every group without an id a fresh one. Existing ids are kept as they are.
pub(crate) fn assign_group_ids(groups: &mut [MedicineGroup]) {
    for group in groups.iter_mut().filter(|g| g.id.trim().is_empty()) {
        group.id = RecordId::new().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_form_payload_and_drops_ui_flags() {
        let group: MedicineGroup = serde_json::from_value(json!({
            "id": "k3j9x0a1b",
            "bottleNumber": "2",
            "bottleSize": "30ml",
            "mainCategory": "Main",
            "subMedicines": [
                {"name": "Arnica", "reason": "bruising", "showReason": true, "isEditing": false}
            ],
            "timings": {"am": "1", "pm": 0, "freq": 3},
            "suggestion": "after food",
            "showSuggestion": true
        }))
        .unwrap();

        assert_eq!(group.bottle_number.map(BottleNumber::get), Some(2));
        assert_eq!(group.main_category, GroupSource::Main);
        assert_eq!(group.timings.pm, "0");
        assert_eq!(group.timings.freq, "3");

        let back = serde_json::to_value(&group).unwrap();
        assert_eq!(
            back["subMedicines"],
            json!([{"name": "Arnica", "reason": "bruising"}])
        );
        assert!(back.get("showSuggestion").is_none());
    }

    #[test]
    fn rejects_bottle_number_out_of_range() {
        let err = serde_json::from_value::<MedicineGroup>(json!({"bottleNumber": 4}))
            .expect_err("bottle 4 does not exist");
        assert!(err.to_string().contains("bottle number must be 1, 2 or 3"));
    }

    #[test]
    fn group_source_round_trips_through_labels() {
        for (label, source) in [
            ("", GroupSource::Custom),
            ("Main", GroupSource::Main),
            ("Main2", GroupSource::Main2),
            ("Fever set", GroupSource::Bunch("Fever set".into())),
        ] {
            assert_eq!(GroupSource::from_label(label), source);
            assert_eq!(source.label(), label);
        }

        let from_null: GroupSource = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(from_null, GroupSource::Custom);
    }

    #[test]
    fn assign_group_ids_fills_only_blank_ids() {
        let mut groups = vec![
            MedicineGroup {
                id: "keep-me".into(),
                ..Default::default()
            },
            MedicineGroup::default(),
        ];

        assign_group_ids(&mut groups);

        assert_eq!(groups[0].id, "keep-me");
        assert!(RecordId::is_canonical(&groups[1].id));
    }
}
