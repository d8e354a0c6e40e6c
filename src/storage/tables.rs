use redb::TableDefinition;

/// Shape shared by every document collection: insertion sequence -> msgpack document
pub type DocumentTable = TableDefinition<'static, u64, &'static [u8]>;

/// Student documents
pub const STUDENTS: DocumentTable = TableDefinition::new("students");

/// Class documents
pub const CLASSES: DocumentTable = TableDefinition::new("classes");
