//! Path record store operations.
//!
//! [`PathStore`] is the store contract the rest of the library is written
//! against. It is a borrowed view over either a plain connection or an open
//! transaction, so the same calls serve reads and transactional writes.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::entity::RelatedRef;
use crate::error::Result;
use crate::record::{strip_leading_slash, PathRecord};

use super::schema::Statements;

/// Deserializes a record from a row selected with `RECORD_COLUMNS`.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PathRecord> {
    Ok(PathRecord {
        id: row.get(0)?,
        link: row.get(1)?,
        related_type: row.get(2)?,
        related_id: row.get(3)?,
        is_current: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Both spellings of a link, bare and with a leading slash.
fn link_forms(link: &str) -> (String, String) {
    let bare = strip_leading_slash(link);
    (bare.to_string(), format!("/{bare}"))
}

/// Access to the path record table through a connection or transaction.
#[derive(Clone, Copy)]
pub struct PathStore<'c> {
    conn: &'c Connection,
    sql: &'c Statements,
}

impl std::fmt::Debug for PathStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathStore")
            .field("table", &self.sql.table)
            .finish_non_exhaustive()
    }
}

impl<'c> PathStore<'c> {
    pub(crate) fn new(conn: &'c Connection, sql: &'c Statements) -> Self {
        Self { conn, sql }
    }

    /// The record table name, which doubles as the alias type tag.
    #[must_use]
    pub fn table(&self) -> &'c str {
        &self.sql.table
    }

    /// The connection (or transaction) this view runs on.
    ///
    /// Entity loaders and descendant retrievers receive it so they read
    /// domain tables inside the same transaction.
    #[must_use]
    pub fn connection(&self) -> &'c Connection {
        self.conn
    }

    /// Inserts a record and returns it with its assigned id.
    ///
    /// Aliases (records owned by the table itself) are always stored as
    /// non-current. Sibling records are not touched here.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, link: &str, owner: &RelatedRef, is_current: bool) -> Result<PathRecord> {
        let is_current = is_current && owner.related_type != self.sql.table;
        let created_at = chrono::Utc::now().timestamp();

        self.conn.execute(
            &self.sql.insert,
            params![
                link,
                owner.related_type,
                owner.related_id,
                is_current,
                created_at
            ],
        )?;

        Ok(PathRecord {
            id: self.conn.last_insert_rowid(),
            link: link.to_string(),
            related_type: owner.related_type.clone(),
            related_id: owner.related_id,
            is_current,
            created_at,
        })
    }

    /// Clears the current flag on every record of `record`'s owner except
    /// `record` itself. Returns the number of records changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn unmark_others(&self, record: &PathRecord) -> Result<usize> {
        Ok(self.conn.execute(
            &self.sql.unmark_others,
            params![record.related_type, record.related_id, record.id],
        )?)
    }

    /// Sets the current flag of record `id`. Returns false if no such record.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_current(&self, id: i64, current: bool) -> Result<bool> {
        Ok(self.conn.execute(&self.sql.set_current, params![id, current])? > 0)
    }

    /// Deletes record `id` alone. Returns false if no such record.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(&self.sql.delete_by_id, params![id])? > 0)
    }

    /// Deletes every record owned by `owner`, without alias cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_by_owner(&self, owner: &RelatedRef) -> Result<usize> {
        let table = &self.sql.table;
        Ok(self.conn.execute(
            &format!("DELETE FROM {table} WHERE related_type = ?1 AND related_id = ?2"),
            params![owner.related_type, owner.related_id],
        )?)
    }

    /// Fetches record `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_id(&self, id: i64) -> Result<Option<PathRecord>> {
        Ok(self
            .conn
            .query_row(&self.sql.select_by_id, params![id], row_to_record)
            .optional()?)
    }

    /// Most recent non-alias record with `link` and the given current flag.
    ///
    /// `link` matches with or without a leading slash. An empty `types`
    /// slice means any owner type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_link(
        &self,
        link: &str,
        types: &[String],
        current: bool,
    ) -> Result<Option<PathRecord>> {
        let (bare, slashed) = link_forms(link);
        let sql = self.sql.find_by_link(types.len());

        let mut values: Vec<rusqlite::types::Value> = vec![
            bare.into(),
            slashed.into(),
            rusqlite::types::Value::Integer(i64::from(current)),
        ];
        values.extend(types.iter().cloned().map(rusqlite::types::Value::from));

        let mut stmt = self.conn.prepare(&sql)?;
        Ok(stmt
            .query_row(params_from_iter(values), row_to_record)
            .optional()?)
    }

    /// Most recent alias record with `link`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_alias_by_link(&self, link: &str) -> Result<Option<PathRecord>> {
        let (bare, slashed) = link_forms(link);
        Ok(self
            .conn
            .query_row(&self.sql.select_alias_by_link, params![bare, slashed], row_to_record)
            .optional()?)
    }

    /// The owner's current record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn current_for(&self, owner: &RelatedRef) -> Result<Option<PathRecord>> {
        Ok(self
            .conn
            .query_row(
                &self.sql.select_current,
                params![owner.related_type, owner.related_id],
                row_to_record,
            )
            .optional()?)
    }

    /// All records of the owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history_for(&self, owner: &RelatedRef) -> Result<Vec<PathRecord>> {
        let mut stmt = self.conn.prepare_cached(&self.sql.select_history)?;
        let records = stmt
            .query_map(
                params![owner.related_type, owner.related_id],
                row_to_record,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// The owner's most recent record other than `except_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest_other(&self, owner: &RelatedRef, except_id: i64) -> Result<Option<PathRecord>> {
        Ok(self
            .conn
            .query_row(
                &self.sql.select_latest_other,
                params![owner.related_type, owner.related_id, except_id],
                row_to_record,
            )
            .optional()?)
    }

    /// Aliases pointing at root record `root_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn aliases_of(&self, root_id: i64) -> Result<Vec<PathRecord>> {
        let mut stmt = self.conn.prepare_cached(&self.sql.select_aliases)?;
        let records = stmt
            .query_map(params![root_id], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all(&self) -> Result<Vec<PathRecord>> {
        let mut stmt = self.conn.prepare(&self.sql.list_all)?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
