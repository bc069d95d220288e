//! Stored document shapes.
//!
//! Field names follow the JSON wire format (camelCase, `_id` for patients, follow-ups and
//! bunches, `id` for medicines) so a stored file and an API response look the same.

mod bunch;
mod follow_up;
mod medicine;
mod patient;
mod prescription;

pub use bunch::{normalize_medicine_refs, Bunch, BunchInput, BunchView, MedicineRef};
pub use follow_up::{FollowUp, RepeatSource, FOLLOW_UP_FIELDS};
pub use medicine::{Medicine, MedicineCategory};
pub use patient::{HealthConcerns, Patient};
pub use prescription::{GroupSource, MedicineGroup, SubMedicine, Timings};

pub(crate) use medicine::SERVER_OWNED_FIELDS as MEDICINE_SERVER_FIELDS;
pub(crate) use patient::SERVER_OWNED_FIELDS as PATIENT_SERVER_FIELDS;
