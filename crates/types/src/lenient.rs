//! Lenient decoding of form values.
//!
//! Intake forms post numbers either as JSON numbers or as the raw text typed into an input
//! (`"30"`, `"1"`). Both are accepted as long as they denote a whole, non-negative value.
//! For optional fields a blank string counts as "not provided". The reverse also happens:
//! text fields such as a dose frequency sometimes arrive as numbers, see [`text`].
//!
//! Use with `#[serde(deserialize_with = "...")]`:
//!
//! ```
//! #[derive(serde::Deserialize)]
//! struct Intake {
//!     #[serde(deserialize_with = "clinic_types::lenient::required")]
//!     age: u32,
//!     #[serde(default, deserialize_with = "clinic_types::lenient::optional")]
//!     child_age: Option<u32>,
//! }
//!
//! let intake: Intake = serde_json::from_str(r#"{"age": "30", "child_age": ""}"#).unwrap();
//! assert_eq!(intake.age, 30);
//! assert_eq!(intake.child_age, None);
//! ```

use crate::NumberError;
use serde::{de, Deserialize, Deserializer};

/// A value that can be built from a whole, non-negative number.
pub trait FromWholeNumber: Sized {
    fn from_whole(n: u64) -> Result<Self, NumberError>;
}

impl FromWholeNumber for u32 {
    fn from_whole(n: u64) -> Result<Self, NumberError> {
        u32::try_from(n).map_err(|_| NumberError::TooLarge(n))
    }
}

impl FromWholeNumber for u8 {
    fn from_whole(n: u64) -> Result<Self, NumberError> {
        u8::try_from(n).map_err(|_| NumberError::TooLarge(n))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Whole(u64),
    Fractional(f64),
    Text(String),
}

impl Loose {
    fn is_blank(&self) -> bool {
        matches!(self, Loose::Text(s) if s.trim().is_empty())
    }

    fn to_whole(&self) -> Result<u64, NumberError> {
        match self {
            Loose::Whole(n) => Ok(*n),
            Loose::Fractional(f) => {
                float_to_whole(*f).ok_or_else(|| NumberError::NotWhole(f.to_string()))
            }
            Loose::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<u64>() {
                    return Ok(n);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(float_to_whole)
                    .ok_or_else(|| NumberError::NotWhole(s.clone()))
            }
        }
    }
}

fn float_to_whole(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

pub(crate) fn decode<T: FromWholeNumber>(n: u64) -> Result<T, NumberError> {
    T::from_whole(n)
}

/// Deserialises a required number that may arrive as a JSON number or numeric text.
pub fn required<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromWholeNumber,
{
    let loose = Loose::deserialize(deserializer)?;
    let whole = loose.to_whole().map_err(de::Error::custom)?;
    decode(whole).map_err(de::Error::custom)
}

/// Deserialises an optional number; `null` and blank text both yield `None`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromWholeNumber,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(loose) if loose.is_blank() => Ok(None),
        Some(loose) => {
            let whole = loose.to_whole().map_err(de::Error::custom)?;
            decode(whole).map(Some).map_err(de::Error::custom)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Whole(u64),
    Signed(i64),
    Fractional(f64),
}

impl LooseText {
    fn into_string(self) -> String {
        match self {
            LooseText::Text(s) => s,
            LooseText::Whole(n) => n.to_string(),
            LooseText::Signed(n) => n.to_string(),
            LooseText::Fractional(f) => f.to_string(),
        }
    }
}

/// Deserialises free text that a form may have posted as a number (`"freq": 3`).
///
/// `null` becomes the empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?
        .map(LooseText::into_string)
        .unwrap_or_default())
}

/// Like [`text`], but keeps `null` as `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?.map(LooseText::into_string))
}

/// `null` counts as "not provided": the field takes its type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
