//! Domain types for student records.
//!
//! This module provides:
//! - The `Student` record and its mutable `StudentFields`
//! - Domain primitives: `RollNo`, `SearchField`
//! - Date-of-birth parsing for the `DD-MM-YYYY` console format

pub mod primitives;
pub mod student;

pub use primitives::{RollNo, SearchField};
pub use student::{parse_dob, Student, StudentFields, DOB_INPUT_FORMAT, STUDENT_COLUMNS};
