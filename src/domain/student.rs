//! Student record type.

use super::primitives::RollNo;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format the console accepts for dates of birth.
pub const DOB_INPUT_FORMAT: &str = "%d-%m-%Y";

/// Column order of the `students` table, also used as the export header.
pub const STUDENT_COLUMNS: [&str; 8] = [
    "rollno", "name", "email", "gender", "contact", "dob", "address", "course",
];

/// A student row. Field order matches `STUDENT_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub rollno: RollNo,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub contact: String,
    pub dob: NaiveDate,
    pub address: String,
    pub course: String,
}

/// Every student field except the roll number.
///
/// Update replaces all of these at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub contact: String,
    pub dob: NaiveDate,
    pub address: String,
    pub course: String,
}

impl Student {
    /// Assemble a student from its roll number and fields.
    pub fn new(rollno: RollNo, fields: StudentFields) -> Self {
        Student {
            rollno,
            name: fields.name,
            email: fields.email,
            gender: fields.gender,
            contact: fields.contact,
            dob: fields.dob,
            address: fields.address,
            course: fields.course,
        }
    }

    /// Split off the mutable fields.
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            contact: self.contact.clone(),
            dob: self.dob,
            address: self.address.clone(),
            course: self.course.clone(),
        }
    }
}

/// Parse a `DD-MM-YYYY` date of birth.
///
/// # Errors
/// Returns `AppError::Validation` for text that is not a real calendar date
/// in that format.
pub fn parse_dob(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), DOB_INPUT_FORMAT).map_err(|_| {
        AppError::Validation(format!(
            "date of birth must be DD-MM-YYYY, got '{}'",
            input.trim()
        ))
    })
}
