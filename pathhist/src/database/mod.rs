//! Database layer for persistent storage of path records.
//!
//! This module provides a SQLite-based storage layer: connection management,
//! schema versioning, the [`PathStore`] record contract and transactional
//! writes.
//!
//! # Examples
//!
//! ```no_run
//! use pathhist::database::{Database, DatabaseConfig};
//! use pathhist::RelatedRef;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/pathhist.db")).unwrap();
//!
//! let owner = RelatedRef::new("category", 1);
//! db.write(|store| store.insert("boots", &owner, true)).unwrap();
//!
//! for record in db.store().history_for(&owner).unwrap() {
//!     println!("{} {}", record.id, record.link);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use operations::PathStore;
pub use schema::{validate_table_name, CURRENT_SCHEMA_VERSION, DEFAULT_TABLE};

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
