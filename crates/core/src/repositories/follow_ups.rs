//! Follow-up visits embedded in a patient record.
//!
//! A follow-up is addressed by `(patient id, follow-up id)`. It is never stored on its own:
//! every operation loads the parent patient, changes its `followUps` list and writes the
//! whole patient back, and every operation returns the full parent patient.
//!
//! Only the seven follow-up fields ([`FOLLOW_UP_FIELDS`]) are read from a payload.
//! `previousAppointment` is optional.

use super::helpers::json_value;
use super::patients::PatientService;
use crate::config::CoreConfig;
use crate::models::{FollowUp, Patient, FOLLOW_UP_FIELDS};
use crate::validation::{decode, into_object, overlay, to_object};
use crate::{ClinicError, ClinicResult};
use chrono::Utc;
use clinic_uuid::RecordId;
use serde_json::{Map, Value};
use std::sync::Arc;

const WHAT: &str = "follow-up";

/// Service for the follow-up lifecycle of a patient.
#[derive(Clone, Debug)]
pub struct FollowUpService {
    patients: PatientService,
}

impl FollowUpService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            patients: PatientService::new(cfg),
        }
    }

    /// Appends a new visit to the patient's follow-ups.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] for an unknown patient and
    /// [`ClinicError::Validation`] if the visit has no `date` or a malformed prescription.
    pub fn add_follow_up(&self, patient_id: RecordId, payload: Value) -> ClinicResult<Patient> {
        let patch = into_object(WHAT, payload)?;
        let mut patient = self.patients.get(patient_id)?;

        let mut doc = Map::new();
        overlay(&mut doc, patch, accepts);
        doc.insert("_id".into(), json_value(RecordId::new())?);
        let follow_up: FollowUp = decode(WHAT, Value::Object(doc))?;

        tracing::info!("added follow-up {} to patient {}", follow_up.id, patient.id);
        patient.follow_ups.push(follow_up);
        self.commit(patient)
    }

    /// Overwrites the fields present in `payload` on one follow-up, in place.
    ///
    /// Fields that are not sent keep their stored value, and the other follow-ups are left
    /// exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if either the patient or the follow-up does not
    /// exist, and [`ClinicError::Validation`] if the updated visit is invalid.
    pub fn update_follow_up(
        &self,
        patient_id: RecordId,
        follow_up_id: RecordId,
        payload: Value,
    ) -> ClinicResult<Patient> {
        let patch = into_object(WHAT, payload)?;
        let mut patient = self.patients.get(patient_id)?;
        let position = Self::locate(&patient, follow_up_id)?;

        let mut doc = to_object(&patient.follow_ups[position])?;
        overlay(&mut doc, patch, accepts);
        let updated: FollowUp = decode(WHAT, Value::Object(doc))?;

        patient.follow_ups[position] = updated;
        tracing::info!("updated follow-up {} of patient {}", follow_up_id, patient.id);
        self.commit(patient)
    }

    /// Removes exactly one follow-up.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if either the patient or the follow-up does not
    /// exist; the record is not written in that case.
    pub fn delete_follow_up(
        &self,
        patient_id: RecordId,
        follow_up_id: RecordId,
    ) -> ClinicResult<Patient> {
        let mut patient = self.patients.get(patient_id)?;
        let position = Self::locate(&patient, follow_up_id)?;

        patient.follow_ups.remove(position);
        tracing::info!("deleted follow-up {} of patient {}", follow_up_id, patient.id);
        self.commit(patient)
    }

    fn locate(patient: &Patient, follow_up_id: RecordId) -> ClinicResult<usize> {
        patient
            .follow_up_position(follow_up_id)
            .ok_or(ClinicError::NotFound("Follow-up record"))
    }

    fn commit(&self, mut patient: Patient) -> ClinicResult<Patient> {
        patient.assign_group_ids();
        patient.updated_at = Utc::now();
        self.patients.store().save(&patient)?;
        Ok(patient)
    }
}

fn accepts(key: &str) -> bool {
    FOLLOW_UP_FIELDS.contains(&key)
}
