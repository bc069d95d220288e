//! Bunches: named presets of catalog medicines used to seed a prescription group.
//!
//! A bunch stores medicine ids only. Responses are populated with the medicines those ids
//! point at; ids whose medicine has since been deleted are skipped, never repaired.

use super::medicines::MedicineService;
use crate::config::CoreConfig;
use crate::models::{normalize_medicine_refs, Bunch, BunchInput, BunchView};
use crate::store::DocumentStore;
use crate::validation::decode;
use crate::{ClinicError, ClinicResult};
use chrono::Utc;
use clinic_uuid::RecordId;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct BunchService {
    store: DocumentStore<Bunch>,
    medicines: MedicineService,
}

impl BunchService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: DocumentStore::new(cfg.bunches_dir()),
            medicines: MedicineService::new(cfg),
        }
    }

    /// Creates a bunch from `{name, selectedMedicineIds}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] if the name is missing or blank, or if any entry
    /// of `selectedMedicineIds` is not a record id.
    pub fn create(&self, payload: Value) -> ClinicResult<BunchView> {
        let input: BunchInput = decode("bunch", payload)?;
        let name = input.name.ok_or_else(|| {
            ClinicError::Validation("bunch validation failed at name: missing field `name`".into())
        })?;
        let medicine_ids = match input.selected_medicine_ids.as_deref() {
            Some(refs) => normalize_medicine_refs(refs)?,
            None => Vec::new(),
        };

        let now = Utc::now();
        let bunch = Bunch {
            id: RecordId::new(),
            name,
            medicine_ids,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(&bunch)?;

        tracing::info!("created bunch {} ({})", bunch.id, bunch.name);
        Ok(self.populate(bunch))
    }

    /// Lists every bunch, newest first, populated.
    pub fn list(&self) -> Vec<BunchView> {
        let mut bunches = self.store.list();
        bunches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        bunches.into_iter().map(|b| self.populate(b)).collect()
    }

    /// Renames a bunch and/or replaces its medicines. Fields that are not sent are kept.
    pub fn update(&self, id: RecordId, payload: Value) -> ClinicResult<BunchView> {
        let input: BunchInput = decode("bunch", payload)?;
        let mut bunch = self
            .store
            .load(id)?
            .ok_or(ClinicError::NotFound("Bunch"))?;

        if let Some(refs) = input.selected_medicine_ids.as_deref() {
            bunch.medicine_ids = normalize_medicine_refs(refs)?;
        }
        if let Some(name) = input.name {
            bunch.name = name;
        }
        bunch.updated_at = Utc::now();
        self.store.save(&bunch)?;

        tracing::info!("updated bunch {}", bunch.id);
        Ok(self.populate(bunch))
    }

    pub fn delete(&self, id: RecordId) -> ClinicResult<()> {
        if !self.store.remove(id)? {
            return Err(ClinicError::NotFound("Bunch"));
        }
        tracing::info!("deleted bunch {}", id);
        Ok(())
    }

    /// Medicines that are gone or unreadable are skipped, like damaged documents in a listing.
    fn populate(&self, bunch: Bunch) -> BunchView {
        let mut medicines = Vec::with_capacity(bunch.medicine_ids.len());
        for id in &bunch.medicine_ids {
            match self.medicines.find(*id) {
                Ok(Some(medicine)) => medicines.push(medicine),
                Ok(None) => tracing::debug!("bunch {} refers to missing medicine {}", bunch.id, id),
                Err(e) => tracing::warn!("bunch {} skips unreadable medicine {}: {}", bunch.id, id, e),
            }
        }

        BunchView {
            id: bunch.id,
            name: bunch.name,
            medicines,
            created_at: bunch.created_at,
            updated_at: bunch.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MEDICINES_DIR_NAME, MEDICINE_FILENAME};
    use crate::models::Medicine;
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        medicines: MedicineService,
        bunches: BunchService,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = Arc::new(CoreConfig::new(temp_dir.path().to_path_buf()).unwrap());
        Fixture {
            medicines: MedicineService::new(cfg.clone()),
            bunches: BunchService::new(cfg),
            _temp_dir: temp_dir,
        }
    }

    fn medicine(fx: &Fixture, name: &str) -> Medicine {
        fx.medicines
            .create(json!({"name": name, "category": "Despair", "oneLiner": "x"}))
            .unwrap()
    }

    #[test]
    fn create_populates_medicines_in_order() {
        let fx = fixture();
        let a = medicine(&fx, "Arnica");
        let b = medicine(&fx, "Belladonna");

        let view = fx
            .bunches
            .create(json!({
                "name": "Fever set",
                "selectedMedicineIds": [b.id.to_string(), {"_id": a.id.to_string()}]
            }))
            .expect("create should succeed");

        assert_eq!(view.name.as_str(), "Fever set");
        assert_eq!(view.medicine_names(), ["Belladonna", "Arnica"]);
    }

    #[test]
    fn create_requires_a_name() {
        let fx = fixture();

        let err = fx
            .bunches
            .create(json!({"selectedMedicineIds": []}))
            .expect_err("name is required");

        assert!(matches!(err, ClinicError::Validation(_)));
        assert!(fx.bunches.list().is_empty());
    }

    #[test]
    fn malformed_medicine_id_is_rejected() {
        let fx = fixture();

        let err = fx
            .bunches
            .create(json!({"name": "Bad", "selectedMedicineIds": ["abc"]}))
            .unwrap_err();

        assert!(matches!(err, ClinicError::Validation(_)));
    }

    #[test]
    fn deleted_medicines_are_skipped_when_populating() {
        let fx = fixture();
        let a = medicine(&fx, "Arnica");
        let b = medicine(&fx, "Belladonna");
        let view = fx
            .bunches
            .create(json!({"name": "Set", "selectedMedicineIds": [a.id.to_string(), b.id.to_string()]}))
            .unwrap();

        fx.medicines.delete(a.id).unwrap();

        let listed = fx.bunches.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, view.id);
        assert_eq!(listed[0].medicine_names(), ["Belladonna"]);
    }

    #[test]
    fn unreadable_medicines_are_skipped_when_populating() {
        let fx = fixture();
        let a = medicine(&fx, "Arnica");
        let b = medicine(&fx, "Belladonna");
        fx.bunches
            .create(json!({"name": "Set", "selectedMedicineIds": [a.id.to_string(), b.id.to_string()]}))
            .unwrap();

        let damaged = a
            .id
            .sharded_dir(&fx._temp_dir.path().join(MEDICINES_DIR_NAME))
            .join(MEDICINE_FILENAME);
        std::fs::write(&damaged, "").unwrap();

        let listed = fx.bunches.list();
        assert_eq!(listed[0].medicine_names(), ["Belladonna"]);

        let created = fx
            .bunches
            .create(json!({"name": "Again", "selectedMedicineIds": [a.id.to_string()]}))
            .expect("a damaged medicine must not fail the bunch");
        assert!(created.medicines.is_empty());
    }

    #[test]
    fn update_changes_only_sent_fields() {
        let fx = fixture();
        let a = medicine(&fx, "Arnica");
        let b = medicine(&fx, "Belladonna");
        let created = fx
            .bunches
            .create(json!({"name": "Set", "selectedMedicineIds": [a.id.to_string()]}))
            .unwrap();

        let renamed = fx
            .bunches
            .update(created.id, json!({"name": "Renamed"}))
            .unwrap();
        assert_eq!(renamed.name.as_str(), "Renamed");
        assert_eq!(renamed.medicine_names(), ["Arnica"]);

        let refilled = fx
            .bunches
            .update(
                created.id,
                json!({"selectedMedicineIds": [serde_json::to_value(&b).unwrap()]}),
            )
            .unwrap();
        assert_eq!(refilled.name.as_str(), "Renamed");
        assert_eq!(refilled.medicine_names(), ["Belladonna"]);
    }

    #[test]
    fn list_is_newest_first() {
        let fx = fixture();
        let first = fx.bunches.create(json!({"name": "One"})).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = fx.bunches.create(json!({"name": "Two"})).unwrap();

        let ids: Vec<_> = fx.bunches.list().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn unknown_bunch_is_not_found() {
        let fx = fixture();
        let id = RecordId::new();

        assert!(matches!(
            fx.bunches.update(id, json!({"name": "x"})),
            Err(ClinicError::NotFound("Bunch"))
        ));
        assert!(matches!(fx.bunches.delete(id), Err(ClinicError::NotFound("Bunch"))));
    }
}
