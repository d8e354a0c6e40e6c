use redb::{Database as RedbDatabase, ReadTransaction, ReadableTable, WriteTransaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::tables::*;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Commit error: {0}")]
    Commit(Box<redb::CommitError>),
    #[error("Database error: {0}")]
    Redb(Box<redb::Error>),
    #[error("Database error: {0}")]
    RedbDatabase(Box<redb::DatabaseError>),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),
    #[error("Storage error: {0}")]
    Storage(Box<redb::StorageError>),
    #[error("Table error: {0}")]
    Table(Box<redb::TableError>),
    #[error("Transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
}

impl From<redb::CommitError> for DatabaseError {
    fn from(e: redb::CommitError) -> Self {
        DatabaseError::Commit(Box::new(e))
    }
}

impl From<redb::DatabaseError> for DatabaseError {
    fn from(e: redb::DatabaseError) -> Self {
        DatabaseError::RedbDatabase(Box::new(e))
    }
}

impl From<redb::Error> for DatabaseError {
    fn from(e: redb::Error) -> Self {
        DatabaseError::Redb(Box::new(e))
    }
}

impl From<redb::StorageError> for DatabaseError {
    fn from(e: redb::StorageError) -> Self {
        DatabaseError::Storage(Box::new(e))
    }
}

impl From<redb::TableError> for DatabaseError {
    fn from(e: redb::TableError) -> Self {
        DatabaseError::Table(Box::new(e))
    }
}

impl From<redb::TransactionError> for DatabaseError {
    fn from(e: redb::TransactionError) -> Self {
        DatabaseError::Transaction(Box::new(e))
    }
}

#[derive(Clone)]
pub struct Database {
    db: Arc<RedbDatabase>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(data_dir.as_ref())?;
        let db_path = data_dir.as_ref().join("student-projects.redb");
        let db = Arc::new(RedbDatabase::create(db_path)?);

        // Initialize collections
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STUDENTS)?;
            let _ = write_txn.open_table(CLASSES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Begin a read transaction
    pub fn begin_read(&self) -> Result<ReadTransaction, DatabaseError> {
        Ok(self.db.begin_read()?)
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> Result<WriteTransaction, DatabaseError> {
        Ok(self.db.begin_write()?)
    }

    // ========================================================================
    // Collection primitives
    // ========================================================================

    /// Append a document after the current last key and return its sequence number.
    pub(super) fn append<T: Serialize>(
        &self,
        collection: DocumentTable,
        document: &T,
    ) -> Result<u64, DatabaseError> {
        let data = rmp_serde::to_vec_named(document)?;

        let write_txn = self.begin_write()?;
        let sequence = {
            let mut table = write_txn.open_table(collection)?;
            let next = match table.last()? {
                Some((key, _)) => key.value() + 1,
                None => 0,
            };
            table.insert(next, data.as_slice())?;
            next
        };
        write_txn.commit()?;
        Ok(sequence)
    }

    /// Read every document of a collection in insertion order.
    pub(super) fn scan<T: DeserializeOwned>(
        &self,
        collection: DocumentTable,
    ) -> Result<Vec<T>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(collection)?;

        let mut documents = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            documents.push(rmp_serde::from_slice(value.value())?);
        }

        Ok(documents)
    }
}
