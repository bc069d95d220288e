//! Medicine catalog.
//!
//! Catalog entries are reference data for authoring. Prescriptions copy a medicine's name
//! when it is picked, so editing or deleting an entry here never touches a patient record.

use super::helpers::{json_value, stamp};
use crate::config::CoreConfig;
use crate::models::{Medicine, MEDICINE_SERVER_FIELDS};
use crate::store::DocumentStore;
use crate::validation::{decode, into_object, overlay, to_object};
use crate::{ClinicError, ClinicResult};
use chrono::Utc;
use clinic_uuid::RecordId;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct MedicineService {
    store: DocumentStore<Medicine>,
}

impl MedicineService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: DocumentStore::new(cfg.medicines_dir()),
        }
    }

    /// Adds a catalog entry. `name`, `category` and `oneLiner` are required.
    pub fn create(&self, payload: Value) -> ClinicResult<Medicine> {
        let mut doc = into_object("medicine", payload)?;
        for key in MEDICINE_SERVER_FIELDS {
            doc.remove(key);
        }

        let now = Utc::now();
        doc.insert("id".into(), json_value(RecordId::new())?);
        stamp(&mut doc, "createdAt", now)?;
        stamp(&mut doc, "updatedAt", now)?;

        let medicine: Medicine = decode("medicine", Value::Object(doc))?;
        self.store.insert(&medicine)?;

        tracing::info!("created medicine {} ({})", medicine.id, medicine.name);
        Ok(medicine)
    }

    /// Lists the catalog sorted by name.
    pub fn list(&self) -> Vec<Medicine> {
        let mut medicines = self.store.list();
        medicines.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        medicines
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<Medicine> {
        self.find(id)?.ok_or(ClinicError::NotFound("Medicine"))
    }

    /// Like [`Self::get`], but a missing medicine is `None` rather than an error.
    pub fn find(&self, id: RecordId) -> ClinicResult<Option<Medicine>> {
        self.store.load(id)
    }

    /// Merges the fields present in `payload` into the stored entry and re-validates it.
    pub fn update(&self, id: RecordId, payload: Value) -> ClinicResult<Medicine> {
        let patch = into_object("medicine", payload)?;
        let existing = self.get(id)?;

        let mut doc = to_object(&existing)?;
        overlay(&mut doc, patch, |key| !MEDICINE_SERVER_FIELDS.contains(&key));
        stamp(&mut doc, "updatedAt", Utc::now())?;

        let medicine: Medicine = decode("medicine", Value::Object(doc))?;
        self.store.save(&medicine)?;

        tracing::info!("updated medicine {}", medicine.id);
        Ok(medicine)
    }

    pub fn delete(&self, id: RecordId) -> ClinicResult<()> {
        if !self.store.remove(id)? {
            return Err(ClinicError::NotFound("Medicine"));
        }
        tracing::info!("deleted medicine {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicineCategory;
    use serde_json::json;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> MedicineService {
        let cfg = CoreConfig::new(temp_dir.path().to_path_buf()).unwrap();
        MedicineService::new(Arc::new(cfg))
    }

    fn entry(name: &str) -> Value {
        json!({
            "name": name,
            "category": "Fear",
            "oneLiner": "for fright",
            "images": ["data:image/png;base64,AAAA"]
        })
    }

    #[test]
    fn create_then_get() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);

        let created = svc.create(entry("Aconite")).expect("create should succeed");

        assert_eq!(created.category(), MedicineCategory::Fear);
        assert_eq!(created.images.len(), 1);
        assert_eq!(svc.get(created.id).unwrap(), created);
    }

    #[test]
    fn create_requires_one_liner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);

        let err = svc
            .create(json!({"name": "Aconite", "category": "Fear"}))
            .expect_err("oneLiner is required");

        assert!(matches!(err, ClinicError::Validation(_)));
        assert!(err.to_string().contains("oneLiner"));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        for name in ["Sulphur", "Arnica", "Ignatia"] {
            svc.create(entry(name)).unwrap();
        }

        let names: Vec<_> = svc.list().into_iter().map(|m| m.name.into_inner()).collect();
        assert_eq!(names, ["Arnica", "Ignatia", "Sulphur"]);
    }

    #[test]
    fn update_merges_and_keeps_identity() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let created = svc.create(entry("Aconite")).unwrap();

        let updated = svc
            .update(
                created.id,
                json!({"id": RecordId::new().to_string(), "shortDescription": "sudden fear"}),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.short_description.as_deref(), Some("sudden fear"));
        assert_eq!(updated.images, created.images);
    }

    #[test]
    fn delete_and_missing_entries() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let created = svc.create(entry("Aconite")).unwrap();

        svc.delete(created.id).unwrap();

        assert_eq!(svc.find(created.id).unwrap(), None);
        assert!(matches!(svc.get(created.id), Err(ClinicError::NotFound("Medicine"))));
        assert!(matches!(svc.delete(created.id), Err(ClinicError::NotFound("Medicine"))));
    }
}
