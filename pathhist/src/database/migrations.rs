//! Database schema management and migrations.
//!
//! This module handles database schema initialization, version checking,
//! and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    create_path_table, validate_table_name, CREATE_METADATA_TABLE, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates the metadata table, the path record table named `table` with its
/// indices, and records the schema version.
///
/// # Errors
///
/// Returns an error if `table` is not a valid identifier or any SQL
/// statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use pathhist::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn, "path_history").unwrap();
/// ```
pub fn initialize_schema(conn: &Connection, table: &str) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    ensure_path_table(conn, table)?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// Creates the path record table `table` if it is missing.
///
/// # Errors
///
/// Returns an error if `table` is not a valid identifier or the DDL fails.
pub fn ensure_path_table(conn: &Connection, table: &str) -> Result<()> {
    validate_table_name(table)?;
    for ddl in create_path_table(table) {
        conn.execute(&ddl, [])?;
    }
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table: metadata"
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. A database at the current version gets
/// the path table `table` created if it does not exist yet, so one database
/// file can hold several differently named tables. Any other version is
/// rejected.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version
/// differs from [`CURRENT_SCHEMA_VERSION`], or a database error.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use pathhist::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn, "path_history").unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection, table: &str) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn, table)?;
    } else if version == CURRENT_SCHEMA_VERSION {
        ensure_path_table(conn, table)?;
    } else {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
