//! Transaction management utilities.
//!
//! Every write the library performs goes through [`Database::write`], which
//! runs a closure against a [`PathStore`] bound to one IMMEDIATE transaction.

use rusqlite::{ErrorCode, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;
use super::operations::PathStore;

/// Converts `SQLITE_BUSY`/`SQLITE_LOCKED` into [`Error::LockTimeout`].
fn map_lock_error(err: rusqlite::Error, timeout_secs: u64) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                seconds: timeout_secs,
            }
        }
        other => Error::Database(other),
    }
}

impl Database {
    /// Runs `f` inside one IMMEDIATE transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err` or panics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the write lock cannot be taken
    /// within the busy timeout, or whatever `f` returns.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathhist::database::{Database, DatabaseConfig};
    /// use pathhist::RelatedRef;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/pathhist.db")).unwrap();
    /// let record = db
    ///     .write(|store| store.insert("boots", &RelatedRef::new("category", 1), true))
    ///     .unwrap();
    /// ```
    pub fn write<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&PathStore<'_>) -> Result<T>,
    {
        let timeout_secs = self.config.busy_timeout.as_secs();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| map_lock_error(e, timeout_secs))?;

        let value = {
            let store = PathStore::new(&tx, &self.statements);
            f(&store)?
        };

        tx.commit().map_err(|e| map_lock_error(e, timeout_secs))?;
        Ok(value)
    }
}
