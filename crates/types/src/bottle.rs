use crate::lenient::{self, FromWholeNumber};
use crate::NumberError;

/// Which of the (at most three) bottles a medicine group is dispensed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BottleNumber(u8);

impl BottleNumber {
    pub const FIRST: BottleNumber = BottleNumber(1);
    pub const MAX: u8 = 3;

    /// # Errors
    ///
    /// Returns [`NumberError::BottleOutOfRange`] unless `n` is 1, 2 or 3.
    pub fn new(n: u8) -> Result<Self, NumberError> {
        if (1..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(NumberError::BottleOutOfRange(u64::from(n)))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for BottleNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for BottleNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromWholeNumber for BottleNumber {
    fn from_whole(n: u64) -> Result<Self, NumberError> {
        let small = u8::try_from(n).map_err(|_| NumberError::BottleOutOfRange(n))?;
        BottleNumber::new(small)
    }
}

impl serde::Serialize for BottleNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for BottleNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        lenient::required(deserializer)
    }
}
