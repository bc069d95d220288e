//! Prescription authoring.
//!
//! This is the state behind the intake and follow-up forms: a list of draft medicine
//! groups, each seeded from a source (custom, one of the "Main" layouts, or a bunch), with
//! rows that can be edited freely afterwards. Drafts carry presentation flags
//! (`is_editing`, `show_reason`, `show_suggestion`) that never reach a payload.
//!
//! Everything here is local, synchronous and owned by one caller. Nothing is persisted
//! until a payload built by [`FollowUpForm::payload`] is sent to the follow-up service.

mod catalog;
mod draft;
mod form;
mod history;

pub use catalog::{group_by_category, CategoryShelf};
pub use draft::{GroupDraft, PrescriptionDraft, SubMedicineRow};
pub use form::{FollowUpForm, FollowUpPayload};
pub use history::{repeat_options, visits_by_date_desc, RepeatOption};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("no medicine group with id '{0}'")]
    UnknownGroup(String),
    #[error("group '{group}' has no row {index}")]
    UnknownRow { group: String, index: usize },
    #[error("a follow-up needs a date")]
    MissingDate,
}

pub type AuthoringResult<T> = std::result::Result<T, AuthoringError>;
