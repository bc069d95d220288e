//! Patient records.
//!
//! A patient is one JSON document holding the intake details, the intake prescription and
//! every follow-up visit. Creating and updating both go through the same path: the payload
//! is shaped into a candidate document and decoded into [`Patient`], so the validation rules
//! live in the model and nowhere else.
//!
//! ## Update semantics
//!
//! Every top-level key present in an update payload replaces the stored value; keys that
//! are absent keep their stored value. The merged document is validated as a whole, so an
//! update cannot leave a record that would fail intake. `_id`, `followUps` and the
//! timestamps are server-owned and cannot be changed here; follow-ups have their own
//! service in [`crate::repositories::follow_ups`].

use super::helpers::{is_blank, json_value, stamp};
use crate::config::CoreConfig;
use crate::models::{Patient, PATIENT_SERVER_FIELDS};
use crate::store::DocumentStore;
use crate::validation::{decode, into_object, overlay, to_object};
use crate::{ClinicError, ClinicResult};
use chrono::Utc;
use clinic_uuid::RecordId;
use serde_json::Value;
use std::sync::Arc;

/// Service for patient records.
#[derive(Clone, Debug)]
pub struct PatientService {
    store: DocumentStore<Patient>,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: DocumentStore::new(cfg.patients_dir()),
        }
    }

    /// Registers a new patient from an intake payload.
    ///
    /// `maritalStatus` defaults to `"Unmarried"` and `pMainDate` to today's date (UTC) when
    /// they are missing or blank. The new record always starts without follow-ups, and any
    /// medicine group without an id is issued one.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] if a required field (`name`, `age`, `gender`,
    /// `phoneNumber`, `healthConcerns.main`) is missing or blank, or any field has the wrong
    /// shape. Storage errors are passed through.
    pub fn create(&self, payload: Value) -> ClinicResult<Patient> {
        let mut doc = into_object("patient", payload)?;
        for key in PATIENT_SERVER_FIELDS {
            doc.remove(key);
        }
        if is_blank(&doc, "maritalStatus") {
            doc.remove("maritalStatus");
        }

        let now = Utc::now();
        if is_blank(&doc, "pMainDate") {
            doc.insert(
                "pMainDate".into(),
                Value::String(now.date_naive().to_string()),
            );
        }
        doc.insert("_id".into(), json_value(RecordId::new())?);
        doc.insert("followUps".into(), Value::Array(Vec::new()));
        stamp(&mut doc, "createdAt", now)?;
        stamp(&mut doc, "updatedAt", now)?;

        let mut patient: Patient = decode("patient", Value::Object(doc))?;
        patient.assign_group_ids();
        self.store.insert(&patient)?;

        tracing::info!("created patient {}", patient.id);
        Ok(patient)
    }

    /// Lists every patient, newest first.
    pub fn list(&self) -> Vec<Patient> {
        let mut patients = self.store.list();
        patients.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        patients
    }

    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if there is no patient with this id.
    pub fn get(&self, id: RecordId) -> ClinicResult<Patient> {
        self.store
            .load(id)?
            .ok_or(ClinicError::NotFound("Patient"))
    }

    /// Merges `payload` into the stored patient. See the module docs for the merge rules.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] for an unknown patient and
    /// [`ClinicError::Validation`] if the merged record is invalid. Nothing is written in
    /// either case.
    pub fn update(&self, id: RecordId, payload: Value) -> ClinicResult<Patient> {
        let patch = into_object("patient", payload)?;
        let existing = self.get(id)?;

        let mut doc = to_object(&existing)?;
        overlay(&mut doc, patch, |key| !PATIENT_SERVER_FIELDS.contains(&key));
        stamp(&mut doc, "updatedAt", Utc::now())?;

        let mut patient: Patient = decode("patient", Value::Object(doc))?;
        patient.assign_group_ids();
        self.store.save(&patient)?;

        tracing::info!("updated patient {}", patient.id);
        Ok(patient)
    }

    /// Deletes a patient together with all of its follow-ups.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if there is no patient with this id.
    pub fn delete(&self, id: RecordId) -> ClinicResult<()> {
        if !self.store.remove(id)? {
            return Err(ClinicError::NotFound("Patient"));
        }
        tracing::info!("deleted patient {}", id);
        Ok(())
    }

    pub(crate) fn store(&self) -> &DocumentStore<Patient> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> PatientService {
        let cfg = CoreConfig::new(temp_dir.path().to_path_buf()).expect("config should build");
        PatientService::new(Arc::new(cfg))
    }

    fn intake() -> Value {
        json!({
            "name": "A",
            "age": 30,
            "gender": "Female",
            "phoneNumber": "555",
            "healthConcerns": {"main": "pain"}
        })
    }

    #[test]
    fn create_applies_defaults_and_starts_without_follow_ups() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);

        let patient = svc.create(intake()).expect("create should succeed");

        assert!(patient.follow_ups.is_empty());
        assert_eq!(patient.marital_status, "Unmarried");
        assert_eq!(
            patient.p_main_date.as_str(),
            Utc::now().date_naive().to_string()
        );
        assert_eq!(patient.created_at, patient.updated_at);

        let stored = svc.get(patient.id).expect("patient should be stored");
        assert_eq!(stored, patient);
    }

    #[test]
    fn create_keeps_explicit_main_date_and_marital_status() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let mut payload = intake();
        payload["pMainDate"] = json!("2023-05-06");
        payload["maritalStatus"] = json!("Married");

        let patient = svc.create(payload).unwrap();

        assert_eq!(patient.p_main_date.as_str(), "2023-05-06");
        assert_eq!(patient.marital_status, "Married");
    }

    #[test]
    fn create_ignores_server_owned_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let forced_id = RecordId::new();
        let mut payload = intake();
        payload["_id"] = json!(forced_id.to_string());
        payload["followUps"] = json!([{"_id": RecordId::new().to_string(), "date": "2020-01-01"}]);

        let patient = svc.create(payload).unwrap();

        assert_ne!(patient.id, forced_id);
        assert!(patient.follow_ups.is_empty());
    }

    #[test]
    fn create_requires_main_health_concern() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let mut payload = intake();
        payload["healthConcerns"] = json!({"main": "   "});

        let err = svc.create(payload).expect_err("blank main concern must fail");

        assert!(matches!(err, ClinicError::Validation(_)));
        assert!(err.to_string().contains("healthConcerns.main"));
        assert!(svc.list().is_empty(), "nothing should be stored");
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);

        for field in ["name", "age", "gender", "phoneNumber"] {
            let mut payload = intake();
            payload.as_object_mut().unwrap().remove(field);
            let err = svc.create(payload).expect_err("missing field must fail");
            assert!(
                err.to_string().contains(field),
                "error for {field} should name it: {err}"
            );
        }
    }

    #[test]
    fn create_issues_group_ids_and_rejects_bad_bottles() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let mut payload = intake();
        payload["medicines"] = json!([{"bottleNumber": 1, "subMedicines": [{"name": "Arnica"}]}]);

        let patient = svc.create(payload).unwrap();
        assert!(RecordId::is_canonical(&patient.medicines[0].id));

        let mut payload = intake();
        payload["medicines"] = json!([{"bottleNumber": 0}]);
        let err = svc.create(payload).expect_err("bottle 0 must fail");
        assert!(err.to_string().contains("bottleNumber"));
    }

    #[test]
    fn list_returns_newest_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let first = svc.create(intake()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = svc.create(intake()).unwrap();

        let ids: Vec<_> = svc.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn update_overwrites_sent_fields_and_preserves_the_rest() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let mut payload = intake();
        payload["address"] = json!("12 High St");
        let created = svc.create(payload).unwrap();

        let updated = svc
            .update(
                created.id,
                json!({"name": "B", "_id": RecordId::new().to_string(), "followUps": []}),
            )
            .expect("update should succeed");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name.as_str(), "B");
        assert_eq!(updated.address.as_deref(), Some("12 High St"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(svc.get(created.id).unwrap(), updated);
    }

    #[test]
    fn update_accepts_null_marital_status_and_children_flag() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let mut payload = intake();
        payload["maritalStatus"] = json!("Married");
        payload["hasChildren"] = json!(true);
        let created = svc.create(payload).unwrap();

        let updated = svc
            .update(
                created.id,
                json!({"maritalStatus": null, "hasChildren": null}),
            )
            .expect("null values should be accepted");

        assert_eq!(updated.marital_status, "Unmarried");
        assert!(!updated.has_children);
    }

    #[test]
    fn invalid_update_leaves_record_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let created = svc.create(intake()).unwrap();

        let err = svc
            .update(created.id, json!({"gender": ""}))
            .expect_err("blank gender must fail");

        assert!(matches!(err, ClinicError::Validation(_)));
        assert_eq!(svc.get(created.id).unwrap(), created);
    }

    #[test]
    fn unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let id = RecordId::new();

        assert!(matches!(svc.get(id), Err(ClinicError::NotFound("Patient"))));
        assert!(matches!(
            svc.update(id, json!({"name": "x"})),
            Err(ClinicError::NotFound("Patient"))
        ));
        assert!(matches!(svc.delete(id), Err(ClinicError::NotFound("Patient"))));
    }

    #[test]
    fn delete_removes_the_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let svc = service(&temp_dir);
        let created = svc.create(intake()).unwrap();

        svc.delete(created.id).expect("delete should succeed");

        assert!(svc.list().is_empty());
        assert!(matches!(svc.get(created.id), Err(ClinicError::NotFound(_))));
    }
}
