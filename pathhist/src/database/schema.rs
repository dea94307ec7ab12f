//! Database schema definitions and SQL statements.
//!
//! The path record table name is configurable, so its statements are built
//! once per [`Database`](super::Database) instead of living in constants.

use crate::error::{Error, Result};

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Default name of the path record table.
pub const DEFAULT_TABLE: &str = "path_history";

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every record query, in `row_to_record` order.
pub(crate) const RECORD_COLUMNS: &str = "id, link, related_type, related_id, is_current, created_at";

/// Checks that `table` is a plain SQL identifier.
///
/// The table name is interpolated into SQL, so only ASCII letters, digits
/// and underscores are accepted, and it may not start with a digit.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for anything else.
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && !table.eq_ignore_ascii_case("metadata") {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "invalid path table name `{table}`: expected an identifier other than `metadata`"
        )))
    }
}

/// DDL for the path record table and its indices.
pub(crate) fn create_path_table(table: &str) -> Vec<String> {
    vec![
        format!(
            r"
    CREATE TABLE IF NOT EXISTS {table} (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        link TEXT NOT NULL,
        related_type TEXT NOT NULL,
        related_id INTEGER NOT NULL,
        is_current INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )"
        ),
        format!("CREATE INDEX IF NOT EXISTS idx_{table}_link ON {table}(link)"),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_related ON {table}(related_type, related_id)"
        ),
    ]
}

/// Prepared SQL text for one path record table.
#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub table: String,
    pub insert: String,
    pub unmark_others: String,
    pub set_current: String,
    pub delete_by_id: String,
    pub select_by_id: String,
    pub select_current: String,
    pub select_history: String,
    pub select_latest_other: String,
    pub select_aliases: String,
    pub select_alias_by_link: String,
    pub list_all: String,
}

impl Statements {
    pub fn new(table: &str) -> Self {
        let cols = RECORD_COLUMNS;
        Self {
            table: table.to_string(),
            insert: format!(
                "INSERT INTO {table} (link, related_type, related_id, is_current, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            unmark_others: format!(
                "UPDATE {table} SET is_current = 0 \
                 WHERE related_type = ?1 AND related_id = ?2 AND id != ?3 AND is_current = 1"
            ),
            set_current: format!("UPDATE {table} SET is_current = ?2 WHERE id = ?1"),
            delete_by_id: format!("DELETE FROM {table} WHERE id = ?1"),
            select_by_id: format!("SELECT {cols} FROM {table} WHERE id = ?1"),
            select_current: format!(
                "SELECT {cols} FROM {table} \
                 WHERE related_type = ?1 AND related_id = ?2 AND is_current = 1 \
                 ORDER BY id DESC LIMIT 1"
            ),
            select_history: format!(
                "SELECT {cols} FROM {table} \
                 WHERE related_type = ?1 AND related_id = ?2 ORDER BY id DESC"
            ),
            select_latest_other: format!(
                "SELECT {cols} FROM {table} \
                 WHERE related_type = ?1 AND related_id = ?2 AND id != ?3 \
                 ORDER BY id DESC LIMIT 1"
            ),
            select_aliases: format!(
                "SELECT {cols} FROM {table} \
                 WHERE related_type = '{table}' AND related_id = ?1 ORDER BY id DESC"
            ),
            select_alias_by_link: format!(
                "SELECT {cols} FROM {table} \
                 WHERE (link = ?1 OR link = ?2) AND related_type = '{table}' \
                 ORDER BY id DESC LIMIT 1"
            ),
            list_all: format!("SELECT {cols} FROM {table} ORDER BY id"),
        }
    }

    /// Link lookup with an optional `related_type IN (...)` restriction.
    ///
    /// Parameters: `?1` bare link, `?2` slashed link, `?3` current flag,
    /// then one parameter per type.
    pub fn find_by_link(&self, type_count: usize) -> String {
        let table = &self.table;
        let mut sql = format!(
            "SELECT {RECORD_COLUMNS} FROM {table} \
             WHERE (link = ?1 OR link = ?2) AND is_current = ?3 AND related_type != '{table}'"
        );
        if type_count > 0 {
            let placeholders: Vec<String> = (0..type_count).map(|i| format!("?{}", i + 4)).collect();
            sql.push_str(&format!(" AND related_type IN ({})", placeholders.join(", ")));
        }
        sql.push_str(" ORDER BY id DESC LIMIT 1");
        sql
    }
}
