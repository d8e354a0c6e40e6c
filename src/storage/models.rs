use serde::{Deserialize, Serialize};

/// Generate a fresh document identifier.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A student document. Only ever created after its project file has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub document_id: String,
    pub name: String,
    pub id: i64,
    /// Location of the stored project file
    pub project_file: String,
}

impl Student {
    pub fn new(name: impl Into<String>, id: i64, project_file: impl Into<String>) -> Self {
        Self {
            document_id: new_document_id(),
            name: name.into(),
            id,
            project_file: project_file.into(),
        }
    }
}

/// A class document with its embedded students, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(rename = "_id")]
    pub document_id: String,
    pub name: String,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl Class {
    /// A new class starts with no students.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            document_id: new_document_id(),
            name: name.into(),
            students: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_json_shape() {
        let student = Student::new("Ada", 42, "https://bucket.s3.amazonaws.com/key");
        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(json["name"], "Ada");
        assert_eq!(json["id"], 42);
        assert_eq!(json["projectFile"], "https://bucket.s3.amazonaws.com/key");
        assert_eq!(json["_id"], student.document_id.as_str());
    }

    #[test]
    fn test_class_starts_empty() {
        let class = Class::new("Math");
        let json = serde_json::to_value(&class).unwrap();

        assert_eq!(json["name"], "Math");
        assert_eq!(json["students"], serde_json::json!([]));
    }

    #[test]
    fn test_document_ids_are_unique() {
        assert_ne!(Class::new("a").document_id, Class::new("a").document_id);
    }
}
