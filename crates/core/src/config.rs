//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{BUNCHES_DIR_NAME, DEFAULT_DATA_DIR, MEDICINES_DIR_NAME, PATIENTS_DIR_NAME};
use crate::{ClinicError, ClinicResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at `data_dir`.
    ///
    /// The directory does not have to exist yet; see [`CoreConfig::ensure_layout`].
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidConfig`] if `data_dir` exists but is not a directory.
    pub fn new(data_dir: PathBuf) -> ClinicResult<Self> {
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(ClinicError::InvalidConfig(format!(
                "data directory is not a directory: {}",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn patients_dir(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_DIR_NAME)
    }

    pub fn medicines_dir(&self) -> PathBuf {
        self.data_dir.join(MEDICINES_DIR_NAME)
    }

    pub fn bunches_dir(&self) -> PathBuf {
        self.data_dir.join(BUNCHES_DIR_NAME)
    }

    /// Creates the data directory and one sub-directory per document kind.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::StorageDirCreation`] if any directory cannot be created.
    pub fn ensure_layout(&self) -> ClinicResult<()> {
        for dir in [self.patients_dir(), self.medicines_dir(), self.bunches_dir()] {
            fs::create_dir_all(&dir).map_err(ClinicError::StorageDirCreation)?;
        }
        Ok(())
    }
}

/// Resolve the data directory from an optional environment value.
///
/// `None` or a blank value falls back to [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
