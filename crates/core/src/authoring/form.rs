use super::draft::PrescriptionDraft;
use super::{AuthoringError, AuthoringResult};
use crate::models::{FollowUp, MedicineGroup, Patient, RepeatSource};
use chrono::NaiveDate;
use clinic_uuid::RecordId;
use serde::Serialize;

/// The follow-up visit form: free-text fields, the repeat selection and the prescription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpForm {
    pub date: String,
    pub notes: String,
    pub past_history: String,
    pub visit_observation: String,
    pub overall_suggestion: String,
    pub repeat: RepeatSource,
    pub prescription: PrescriptionDraft,
    editing: Option<RecordId>,
}

/// What the form sends to add or update a follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPayload {
    pub date: String,
    pub notes: String,
    pub previous_appointment: RepeatSource,
    pub past_history: String,
    pub visit_observation: String,
    pub medicines: Vec<MedicineGroup>,
    pub overall_suggestion: String,
}

impl FollowUpPayload {
    /// # Errors
    ///
    /// Returns the serialisation error if a field cannot be represented as JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl FollowUpForm {
    /// A blank form for a new visit dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            notes: String::new(),
            past_history: String::new(),
            visit_observation: String::new(),
            overall_suggestion: String::new(),
            repeat: RepeatSource::Fresh,
            prescription: PrescriptionDraft::new(),
            editing: None,
        }
    }

    /// Opens an existing visit for editing. Group ids are kept so a save updates the same
    /// bottles.
    pub fn edit(follow_up: &FollowUp) -> Self {
        Self {
            date: follow_up.date.as_str().to_string(),
            notes: follow_up.notes.clone().unwrap_or_default(),
            past_history: follow_up.past_history.clone().unwrap_or_default(),
            visit_observation: follow_up.visit_observation.clone().unwrap_or_default(),
            overall_suggestion: follow_up.overall_suggestion.clone().unwrap_or_default(),
            repeat: follow_up
                .previous_appointment
                .clone()
                .unwrap_or(RepeatSource::Fresh),
            prescription: PrescriptionDraft::from_groups(&follow_up.medicines),
            editing: Some(follow_up.id),
        }
    }

    /// The follow-up being edited, or `None` for a new visit.
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    /// Records the repeat selection and copies that prescription into the draft.
    ///
    /// Returns `false` if `source` names a date with no matching visit; the draft is then
    /// left as it was, but the selection is still recorded.
    pub fn select_repeat(&mut self, source: RepeatSource, patient: &Patient) -> bool {
        let applied = self.prescription.repeat_from(&source, patient);
        self.repeat = source;
        applied
    }

    /// Builds the payload for the follow-up service.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::MissingDate`] if the date is blank.
    pub fn payload(&self) -> AuthoringResult<FollowUpPayload> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(AuthoringError::MissingDate);
        }

        Ok(FollowUpPayload {
            date: date.to_string(),
            notes: self.notes.clone(),
            previous_appointment: self.repeat.clone(),
            past_history: self.past_history.clone(),
            visit_observation: self.visit_observation.clone(),
            medicines: self.prescription.to_medicines(),
            overall_suggestion: self.overall_suggestion.clone(),
        })
    }
}
