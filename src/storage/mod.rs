mod classes;
pub mod db;
pub mod models;
mod repository;
mod students;
mod tables;

pub use db::{Database, DatabaseError};
pub use repository::Repository;
pub use tables::*;
