//! Common test utilities for integration tests.
//!
//! This module provides a small shop domain (product categories nested in
//! each other, products inside categories) stored next to the path records,
//! plus helpers that drive the lifecycle hooks the way a persistence layer
//! would.

pub mod shop;

use std::path::PathBuf;

use pathhist::database::{Database, DatabaseConfig};

/// Creates a test database in a temporary location.
///
/// The temporary directory is leaked so the database outlives the helper.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let (_, db) = create_test_database_at("test.db");
    db
}

/// Like [`create_test_database`], also returning the database path.
#[allow(dead_code)]
pub fn create_test_database_at(file: &str) -> (PathBuf, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file);
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    (path, db)
}
