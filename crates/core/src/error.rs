use clinic_uuid::IdError;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    /// A payload failed schema validation. The message is safe to show to the caller.
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid {kind} id: {source}")]
    InvalidId {
        kind: &'static str,
        #[source]
        source: IdError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete record: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
}

impl ClinicError {
    /// True for errors caused by the request itself rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClinicError::Validation(_) | ClinicError::NotFound(_) | ClinicError::InvalidId { .. }
        )
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
