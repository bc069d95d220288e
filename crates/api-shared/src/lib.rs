//! # API Shared
//!
//! Wire types shared by the REST crate, its tests and any other API front end.
//!
//! Contains:
//! - Small response bodies (`MessageRes`, `ErrorRes`)
//! - The `HealthService` used by the health endpoint
//!
//! Record shapes (patients, medicines, bunches) are the core models themselves and live in
//! `clinic-core`.

pub mod health;
pub mod responses;

pub use health::{HealthRes, HealthService};
pub use responses::{ErrorRes, MessageRes};
