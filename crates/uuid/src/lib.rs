//! Record identifiers and sharded-path utilities.
//!
//! Every stored document (patient, medicine, bunch) and every embedded follow-up visit is
//! addressed by a [`RecordId`]: a random v4 UUID rendered in *canonical* form, **32
//! lowercase hexadecimal characters** with no hyphens.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Identifiers arriving from outside (URL path segments, request bodies) must already be
//! canonical; [`RecordId::parse`] rejects anything else instead of normalising it.
//!
//! ## Sharded directory layout
//! For a canonical id `u`, a document lives under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `clinic_data/patients/55/0e/550e8400e29b41d4a716446655440000/patient.json`

mod record_id;

pub use record_id::RecordId;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid record id: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
