use super::medicine::Medicine;
use crate::constants::BUNCH_FILENAME;
use crate::store::Document;
use crate::{ClinicError, ClinicResult};
use chrono::{DateTime, Utc};
use clinic_types::NonEmptyText;
use clinic_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named preset of catalog medicines, as stored.
///
/// `medicine_ids` is not kept in sync with the catalog: deleting a medicine leaves its id
/// here, and it is simply skipped when the bunch is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bunch {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: NonEmptyText,
    #[serde(default)]
    pub medicine_ids: Vec<RecordId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Bunch {
    const KIND: &'static str = "Bunch";
    const FILE_NAME: &'static str = BUNCH_FILENAME;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// A bunch with its medicine ids replaced by the medicines themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BunchView {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[serde(rename = "medicineIds")]
    pub medicines: Vec<Medicine>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl BunchView {
    /// Names of the bunch's medicines, in bunch order.
    pub fn medicine_names(&self) -> Vec<String> {
        self.medicines
            .iter()
            .map(|m| m.name.as_str().to_string())
            .collect()
    }
}

/// Body of a bunch create or update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BunchInput {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Option<NonEmptyText>,
    /// Medicine ids, or medicine objects carrying `_id`/`id`.
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub selected_medicine_ids: Option<Vec<MedicineRef>>,
}

/// A medicine reference as sent by a client: either the raw id or a (possibly populated)
/// medicine object carrying `_id` or `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MedicineRef {
    Id(String),
    Object {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl MedicineRef {
    fn raw(&self) -> &str {
        match self {
            MedicineRef::Id(id) | MedicineRef::Object { id } => id,
        }
    }

    /// Normalises the reference to a bare record id.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] if the id is not a record id.
    pub fn to_id(&self) -> ClinicResult<RecordId> {
        RecordId::parse(self.raw().trim()).map_err(|e| {
            ClinicError::Validation(format!("bunch validation failed at selectedMedicineIds: {e}"))
        })
    }
}

/// Normalises a list of references, failing on the first malformed one.
pub fn normalize_medicine_refs(refs: &[MedicineRef]) -> ClinicResult<Vec<RecordId>> {
    refs.iter().map(MedicineRef::to_id).collect()
}
