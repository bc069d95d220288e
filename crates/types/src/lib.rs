//! Validated primitive types shared by the clinic crates.
//!
//! Everything here is checked at construction (and therefore at deserialisation), so a
//! value that made it into a model struct can be trusted without re-validating it.

pub mod lenient;

mod bottle;
mod text;

pub use bottle::BottleNumber;
pub use text::NonEmptyText;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors raised when a numeric field cannot be accepted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NumberError {
    #[error("expected a whole, non-negative number, got '{0}'")]
    NotWhole(String),

    #[error("bottle number must be 1, 2 or 3, got {0}")]
    BottleOutOfRange(u64),

    #[error("number {0} is too large")]
    TooLarge(u64),
}
