//! Student record operations.

use super::Repository;
use crate::domain::{RollNo, SearchField, Student, StudentFields};
use crate::error::{is_unique_violation, AppError};
use crate::export;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

fn student_from_row(row: &SqliteRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        rollno: RollNo::new(row.try_get("rollno")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        gender: row.try_get("gender")?,
        contact: row.try_get("contact")?,
        dob: row.try_get("dob")?,
        address: row.try_get("address")?,
        course: row.try_get("course")?,
    })
}

impl Repository {
    /// Insert a new student.
    ///
    /// Uniqueness of the roll number is enforced by the primary key; the
    /// constraint violation is reported as a duplicate.
    ///
    /// # Errors
    /// Returns `AppError::DuplicateKey` if the roll number already exists.
    pub async fn add_student(&self, student: &Student) -> Result<(), AppError> {
        let mut tx = self.session.begin().await?;
        let inserted = sqlx::query(
            r#"
            INSERT INTO students (rollno, name, email, gender, contact, dob, address, course)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(student.rollno.as_i64())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.gender)
        .bind(&student.contact)
        .bind(student.dob)
        .bind(&student.address)
        .bind(&student.course)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::DuplicateKey(format!(
                    "roll number {} already exists",
                    student.rollno
                )))
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        info!(rollno = student.rollno.as_i64(), "student added");
        Ok(())
    }

    /// Replace every field of an existing student except its roll number.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no student has this roll number.
    pub async fn update_student(
        &self,
        rollno: RollNo,
        fields: &StudentFields,
    ) -> Result<(), AppError> {
        let mut tx = self.session.begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE students
            SET name = ?, email = ?, gender = ?, contact = ?, dob = ?, address = ?, course = ?
            WHERE rollno = ?
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.gender)
        .bind(&fields.contact)
        .bind(fields.dob)
        .bind(&fields.address)
        .bind(&fields.course)
        .bind(rollno.as_i64())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("roll number {}", rollno)));
        }

        tx.commit().await?;
        info!(rollno = rollno.as_i64(), "student updated");
        Ok(())
    }

    /// Delete a student by roll number.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no student has this roll number.
    pub async fn delete_student(&self, rollno: RollNo) -> Result<(), AppError> {
        let mut tx = self.session.begin().await?;
        let result = sqlx::query("DELETE FROM students WHERE rollno = ?")
            .bind(rollno.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("roll number {}", rollno)));
        }

        tx.commit().await?;
        info!(rollno = rollno.as_i64(), "student deleted");
        Ok(())
    }

    /// Look up a student by roll number.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_student(&self, rollno: RollNo) -> Result<Option<Student>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT rollno, name, email, gender, contact, dob, address, course
            FROM students
            WHERE rollno = ?
            "#,
        )
        .bind(rollno.as_i64())
        .fetch_optional(self.session.pool())
        .await?;

        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    /// Search by roll number or email, returning the first match.
    ///
    /// `field` must be `"rollno"` or `"email"`.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for any other field or a roll number
    /// that is not an integer, and `AppError::NotFound` when nothing matches.
    pub async fn search_student(&self, term: &str, field: &str) -> Result<Student, AppError> {
        let field: SearchField = field.parse()?;
        debug!(%field, term, "searching students");

        let found = match field {
            SearchField::RollNo => self.find_student(term.parse::<RollNo>()?).await?,
            SearchField::Email => {
                let row = sqlx::query(
                    r#"
                    SELECT rollno, name, email, gender, contact, dob, address, course
                    FROM students
                    WHERE email = ?
                    ORDER BY rollno ASC
                    LIMIT 1
                    "#,
                )
                .bind(term)
                .fetch_optional(self.session.pool())
                .await?;
                row.as_ref().map(student_from_row).transpose()?
            }
        };

        found.ok_or_else(|| AppError::NotFound(format!("no student with {} '{}'", field, term)))
    }

    /// All students ordered by roll number.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT rollno, name, email, gender, contact, dob, address, course
            FROM students
            ORDER BY rollno ASC
            "#,
        )
        .fetch_all(self.session.pool())
        .await?;

        let students = rows
            .iter()
            .map(student_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Write every student to a CSV file with a header row.
    ///
    /// # Errors
    /// Returns `AppError::Io` if the file cannot be written.
    pub async fn export_to_csv(&self, path: impl AsRef<Path>) -> Result<ExportSummary, AppError> {
        let path = path.as_ref();
        let students = self.list_students().await?;
        export::write_students_to_path(path, &students)?;

        info!(path = %path.display(), rows = students.len(), "students exported");
        Ok(ExportSummary {
            path: path.to_path_buf(),
            rows: students.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::setup_test_db;
    use super::*;
    use crate::domain::parse_dob;

    fn jane() -> Student {
        Student {
            rollno: RollNo::new(101),
            name: "Jane".to_string(),
            email: "j@x.com".to_string(),
            gender: "F".to_string(),
            contact: "555".to_string(),
            dob: parse_dob("01-02-2000").unwrap(),
            address: "Main St".to_string(),
            course: "CS".to_string(),
        }
    }

    async fn count_rollno(repo: &Repository, rollno: i64) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students WHERE rollno = ?")
            .bind(rollno)
            .fetch_one(repo.session().pool())
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_add_then_search_by_rollno() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        let found = repo.search_student("101", "rollno").await.unwrap();
        assert_eq!(found, jane());
        assert_eq!(found.dob.to_string(), "2000-02-01");
    }

    #[tokio::test]
    async fn test_dob_stored_as_iso_date() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        let (dob,): (String,) = sqlx::query_as("SELECT dob FROM students WHERE rollno = 101")
            .fetch_one(repo.session().pool())
            .await
            .unwrap();
        assert_eq!(dob, "2000-02-01");
    }

    #[tokio::test]
    async fn test_duplicate_add_leaves_store_unchanged() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        let mut dup = jane();
        dup.name = "Other".to_string();
        match repo.add_student(&dup).await {
            Err(AppError::DuplicateKey(msg)) => assert!(msg.contains("101")),
            other => panic!("Expected DuplicateKey error, got {:?}", other),
        }

        assert_eq!(count_rollno(&repo, 101).await, 1);
        assert_eq!(repo.find_student(RollNo::new(101)).await.unwrap(), Some(jane()));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_but_rollno() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        let fields = StudentFields {
            name: "Janet".to_string(),
            email: "janet@x.com".to_string(),
            gender: "X".to_string(),
            contact: "777".to_string(),
            dob: parse_dob("15-08-1999").unwrap(),
            address: "Side Rd".to_string(),
            course: "Math".to_string(),
        };
        repo.update_student(RollNo::new(101), &fields).await.unwrap();

        let found = repo.search_student("101", "rollno").await.unwrap();
        assert_eq!(found, Student::new(RollNo::new(101), fields));
    }

    #[tokio::test]
    async fn test_update_missing_rollno_is_not_found() {
        let (repo, _temp) = setup_test_db().await;

        let result = repo.update_student(RollNo::new(5), &jane().fields()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(count_rollno(&repo, 5).await, 0);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();
        let mut other = jane();
        other.rollno = RollNo::new(102);
        repo.add_student(&other).await.unwrap();

        repo.delete_student(RollNo::new(101)).await.unwrap();

        assert!(matches!(
            repo.search_student("101", "rollno").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(repo.list_students().await.unwrap(), vec![other]);
    }

    #[tokio::test]
    async fn test_delete_missing_rollno_is_not_found() {
        let (repo, _temp) = setup_test_db().await;
        assert!(matches!(
            repo.delete_student(RollNo::new(9)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_by_email_returns_first_match() {
        let (repo, _temp) = setup_test_db().await;
        let mut later = jane();
        later.rollno = RollNo::new(200);
        later.name = "Later".to_string();
        repo.add_student(&later).await.unwrap();
        repo.add_student(&jane()).await.unwrap();

        let found = repo.search_student("j@x.com", "email").await.unwrap();
        assert_eq!(found.rollno, RollNo::new(101));
    }

    #[tokio::test]
    async fn test_search_rejects_unsupported_field() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        assert!(matches!(
            repo.search_student("Jane", "name").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.search_student("abc", "rollno").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_search_by_email_matches_stored_text_exactly() {
        let (repo, _temp) = setup_test_db().await;
        let mut spaced = jane();
        spaced.email = " a@x.com ".to_string();
        repo.add_student(&spaced).await.unwrap();

        let found = repo.search_student(" a@x.com ", "email").await.unwrap();
        assert_eq!(found, spaced);
        assert!(matches!(
            repo.search_student("a@x.com", "email").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let (repo, _temp) = setup_test_db().await;
        assert!(matches!(
            repo.search_student("nobody@x.com", "email").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_user_input_is_bound_not_interpolated() {
        let (repo, _temp) = setup_test_db().await;
        repo.add_student(&jane()).await.unwrap();

        let result = repo.search_student("' OR '1'='1", "email").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(count_rollno(&repo, 101).await, 1);
    }
}
