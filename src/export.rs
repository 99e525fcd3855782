//! CSV serialization of student records.

use crate::domain::{Student, STUDENT_COLUMNS};
use std::io::Write;
use std::path::Path;

/// Write a header row and one line per student.
///
/// The header is written even when `students` is empty.
pub fn write_students<W: Write>(writer: W, students: &[Student]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(STUDENT_COLUMNS)?;
    for student in students {
        wtr.serialize(student)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the students into it.
pub fn write_students_to_path(path: &Path, students: &[Student]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_students(std::io::BufWriter::new(file), students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_dob, RollNo};

    fn student(rollno: i64, name: &str, address: &str) -> Student {
        Student {
            rollno: RollNo::new(rollno),
            name: name.to_string(),
            email: format!("{}@x.com", rollno),
            gender: "F".to_string(),
            contact: "555".to_string(),
            dob: parse_dob("01-02-2000").unwrap(),
            address: address.to_string(),
            course: "CS".to_string(),
        }
    }

    fn render(students: &[Student]) -> String {
        let mut buf = Vec::new();
        write_students(&mut buf, students).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_export_has_header_only() {
        assert_eq!(
            render(&[]),
            "rollno,name,email,gender,contact,dob,address,course\n"
        );
    }

    #[test]
    fn test_row_layout_matches_header() {
        let out = render(&[student(101, "Jane", "Main St")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "101,Jane,101@x.com,F,555,2000-02-01,Main St,CS");
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let out = render(&[student(1, "Doe, Jane", "12 \"Elm\" St")]);
        assert!(out.contains("\"Doe, Jane\""));
        assert!(out.contains("\"12 \"\"Elm\"\" St\""));
    }

    #[test]
    fn test_written_rows_read_back() {
        let students = vec![student(1, "Doe, Jane", "Main St"), student(2, "Bo", "Elm")];
        let out = render(&students);

        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let read: Vec<Student> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(read, students);
    }
}
