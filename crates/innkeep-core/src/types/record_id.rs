//! Record identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ValidationError};

/// A record identifier, unique within one collection.
///
/// Serialized as a bare JSON integer.
///
/// # Example
///
/// ```
/// use innkeep_core::RecordId;
///
/// let id: RecordId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.checked_next(), Some(RecordId::new(43)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` if the id space is exhausted.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self).map_err(|e| {
            ValidationError::InvalidId {
                value: s.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
