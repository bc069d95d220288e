//! # Clinic Core
//!
//! Core business logic for the clinic case-records service.
//!
//! This crate contains pure data operations and file/folder management:
//! - Patient records with embedded follow-up visits and prescriptions
//! - The medicine catalog and bunch presets
//! - Sharded JSON document storage under the configured data directory
//! - Prescription authoring state used to build follow-up payloads
//!
//! **No API concerns**: HTTP servers, routing and response shapes belong in `api-rest`
//! or `api-shared`.

pub mod authoring;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;
pub mod validation;

pub use clinic_types::{BottleNumber, NonEmptyText};
pub use clinic_uuid::RecordId;
pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};
pub use repositories::bunches::BunchService;
pub use repositories::follow_ups::FollowUpService;
pub use repositories::helpers::parse_record_id;
pub use repositories::medicines::MedicineService;
pub use repositories::patients::PatientService;
