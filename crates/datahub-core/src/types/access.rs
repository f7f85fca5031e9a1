//! Viewer access levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Permission tier a viewer holds on a resource.
///
/// Ordered by privilege: `None < Read < Write < Admin`. On the wire the
/// backend encodes levels as integers `-1..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum AccessLevel {
    /// No access.
    None,
    /// Can list and download.
    Read,
    /// Can create, edit and delete items.
    Write,
    /// Full control including deleting folders and changing access.
    Admin,
}

impl AccessLevel {
    /// Every level in ascending order.
    pub const ALL: [AccessLevel; 4] = [Self::None, Self::Read, Self::Write, Self::Admin];

    /// Check if this level grants at least the given level.
    pub fn has_at_least(self, required: AccessLevel) -> bool {
        self >= required
    }

    /// Return the level as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Admin => "ADMIN",
        }
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::None
    }
}

impl From<AccessLevel> for i8 {
    fn from(level: AccessLevel) -> i8 {
        match level {
            AccessLevel::None => -1,
            AccessLevel::Read => 0,
            AccessLevel::Write => 1,
            AccessLevel::Admin => 2,
        }
    }
}

impl TryFrom<i8> for AccessLevel {
    type Error = AppError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::None),
            0 => Ok(Self::Read),
            1 => Ok(Self::Write),
            2 => Ok(Self::Admin),
            _ => Err(AppError::validation(format!("Invalid access level: {value}"))),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!("Invalid access level: '{s}'"))),
        }
    }
}
