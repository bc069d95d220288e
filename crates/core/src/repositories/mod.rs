//! Services over the document store.
//!
//! Each service owns the store for one kind of top-level document and is cheap to clone.
//! Follow-ups have no store of their own; [`follow_ups::FollowUpService`] works through the
//! patient documents.

pub mod bunches;
pub mod follow_ups;
pub mod helpers;
pub mod medicines;
pub mod patients;
