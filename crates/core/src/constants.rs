//! Constants used throughout the clinic core crate.
//!
//! Directory and file names for the on-disk document layout live here so that the store,
//! the services and the tests all agree on them.

/// Default directory for clinic data when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "clinic_data";

/// Directory name for patient documents.
pub const PATIENTS_DIR_NAME: &str = "patients";

/// Directory name for medicine catalog documents.
pub const MEDICINES_DIR_NAME: &str = "medicines";

/// Directory name for bunch (preset) documents.
pub const BUNCHES_DIR_NAME: &str = "bunches";

/// Filename for a stored patient document.
pub const PATIENT_FILENAME: &str = "patient.json";

/// Filename for a stored medicine document.
pub const MEDICINE_FILENAME: &str = "medicine.json";

/// Filename for a stored bunch document.
pub const BUNCH_FILENAME: &str = "bunch.json";

/// Marital status recorded when intake does not provide one.
pub const DEFAULT_MARITAL_STATUS: &str = "Unmarried";

/// Number of blank rows seeded when a group is switched to a "Main" source.
pub const MAIN_SLOT_COUNT: usize = 7;

/// Bottle size offered for a newly added group.
pub const DEFAULT_BOTTLE_SIZE: &str = "15ml";
