use super::db::{Database, DatabaseError};
use super::models::Class;
use super::tables::CLASSES;

impl Database {
    // ========================================================================
    // Class operations
    // ========================================================================

    pub fn insert_class(&self, class: &Class) -> Result<(), DatabaseError> {
        self.append(CLASSES, class)?;
        Ok(())
    }

    /// All classes in insertion order
    pub fn list_classes(&self) -> Result<Vec<Class>, DatabaseError> {
        self.scan(CLASSES)
    }
}
