//! Domain primitives: RollNo, SearchField.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique integer identifier of a student; the primary key of `students`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNo(pub i64);

impl RollNo {
    /// Create a RollNo from an integer.
    pub fn new(value: i64) -> Self {
        RollNo(value)
    }

    /// Get the underlying integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for RollNo {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(RollNo)
            .map_err(|_| AppError::Validation(format!("roll number must be an integer, got '{}'", s.trim())))
    }
}

impl std::fmt::Display for RollNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column a student search is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    RollNo,
    Email,
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rollno" => Ok(SearchField::RollNo),
            "email" => Ok(SearchField::Email),
            other => Err(AppError::Validation(format!(
                "invalid search option '{}', choose 'rollno' or 'email'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchField::RollNo => write!(f, "rollno"),
            SearchField::Email => write!(f, "email"),
        }
    }
}
