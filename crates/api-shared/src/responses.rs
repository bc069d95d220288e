use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A plain confirmation, e.g. `{"message": "Deleted"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned with every 4xx and 5xx response.
///
/// The text is sent under both `error` and `message`; existing clients read one or the
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    pub message: String,
}

impl ErrorRes {
    pub fn new(text: impl Into<String>) -> Self {
        let message = text.into();
        Self {
            error: message.clone(),
            message,
        }
    }
}
