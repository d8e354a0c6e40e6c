use async_trait::async_trait;

use super::db::{Database, DatabaseError};
use super::models::{Class, Student};

/// The document collections the API reads and writes.
/// Insert operations return the stored document.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn insert_student(&self, student: Student) -> Result<Student, DatabaseError>;
    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError>;
    async fn insert_class(&self, class: Class) -> Result<Class, DatabaseError>;
    async fn list_classes(&self) -> Result<Vec<Class>, DatabaseError>;
}

#[async_trait]
impl Repository for Database {
    async fn insert_student(&self, student: Student) -> Result<Student, DatabaseError> {
        Database::insert_student(self, &student)?;
        Ok(student)
    }

    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        Database::list_students(self)
    }

    async fn insert_class(&self, class: Class) -> Result<Class, DatabaseError> {
        Database::insert_class(self, &class)?;
        Ok(class)
    }

    async fn list_classes(&self) -> Result<Vec<Class>, DatabaseError> {
        Database::list_classes(self)
    }
}
