use super::db::{Database, DatabaseError};
use super::models::Student;
use super::tables::STUDENTS;

impl Database {
    // ========================================================================
    // Student operations
    // ========================================================================

    /// Store a student document. No uniqueness check is made on `id`.
    /// Callers guarantee a non-empty `project_file` (see `upload::upload_and_record`).
    pub fn insert_student(&self, student: &Student) -> Result<(), DatabaseError> {
        self.append(STUDENTS, student)?;
        Ok(())
    }

    /// All students in insertion order
    pub fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        self.scan(STUDENTS)
    }
}
