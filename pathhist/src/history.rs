//! Current/historical bookkeeping of path records.
//!
//! Each owner has at most one current record once a write completes. The
//! functions here take a [`PathStore`]; writers pass one bound to an open
//! transaction (see [`Database::write`](crate::database::Database::write))
//! so every multi-statement change lands atomically.

use crate::database::PathStore;
use crate::entity::RelatedRef;
use crate::error::{Error, Result};
use crate::record::PathRecord;

/// Inserts `link` as `owner`'s current record and unmarks the others.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn insert_current(store: &PathStore<'_>, link: &str, owner: &RelatedRef) -> Result<PathRecord> {
    let record = store.insert(link, owner, true)?;
    store.unmark_others(&record)?;
    Ok(record)
}

/// Adds an alias `link` pointing at record `root_id`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the root record does not exist and
/// [`Error::Validation`] if the root is itself an alias.
pub fn add_alias(store: &PathStore<'_>, root_id: i64, link: &str) -> Result<PathRecord> {
    let root = store.find_by_id(root_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("path record {root_id}"),
    })?;
    if root.is_self_related(store.table()) {
        return Err(Error::Validation {
            field: "root_id".into(),
            message: format!("record {root_id} is an alias and cannot be aliased"),
        });
    }

    let alias = store.insert(link, &RelatedRef::new(store.table(), root.id), false)?;
    log::debug!("alias `{link}` -> record {root_id} (`{}`)", root.link);
    Ok(alias)
}

/// Deletes record `id` and the aliases pointing at it.
///
/// When the deleted record leaves its owner without a current record, the
/// owner's most recent remaining record is promoted and returned.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the record does not exist.
pub fn delete_record(store: &PathStore<'_>, id: i64) -> Result<Option<PathRecord>> {
    let record = store.find_by_id(id)?.ok_or_else(|| Error::NotFound {
        resource: format!("path record {id}"),
    })?;

    if record.is_self_related(store.table()) {
        store.delete_by_id(record.id)?;
        return Ok(None);
    }

    delete_with_aliases(store, &record)?;

    let owner = record.owner();
    if store.current_for(&owner)?.is_some() {
        return Ok(None);
    }

    match store.latest_other(&owner, record.id)? {
        Some(mut next) => {
            store.set_current(next.id, true)?;
            store.unmark_others(&next)?;
            next.is_current = true;
            log::info!("promoted `{}` to current for {owner}", next.link);
            Ok(Some(next))
        }
        None => Ok(None),
    }
}

fn delete_with_aliases(store: &PathStore<'_>, record: &PathRecord) -> Result<usize> {
    let mut deleted = 0;
    for alias in store.aliases_of(record.id)? {
        if store.delete_by_id(alias.id)? {
            deleted += 1;
        }
    }
    if store.delete_by_id(record.id)? {
        deleted += 1;
    }
    Ok(deleted)
}

/// Deletes every record owned by `owner`, aliases included.
///
/// Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn delete_owner(store: &PathStore<'_>, owner: &RelatedRef) -> Result<usize> {
    let mut deleted = 0;
    for record in store.history_for(owner)? {
        for alias in store.aliases_of(record.id)? {
            if store.delete_by_id(alias.id)? {
                deleted += 1;
            }
        }
    }
    deleted += store.delete_by_owner(owner)?;
    log::debug!("deleted {deleted} record(s) of {owner}");
    Ok(deleted)
}

/// Makes `owner`'s most recent record current again.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn restore(store: &PathStore<'_>, owner: &RelatedRef) -> Result<Option<PathRecord>> {
    let Some(mut latest) = store.history_for(owner)?.into_iter().next() else {
        return Ok(None);
    };
    store.set_current(latest.id, true)?;
    store.unmark_others(&latest)?;
    latest.is_current = true;
    log::info!("restored `{}` as current for {owner}", latest.link);
    Ok(Some(latest))
}

/// All of `owner`'s records, newest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn path_history(store: &PathStore<'_>, owner: &RelatedRef) -> Result<Vec<PathRecord>> {
    store.history_for(owner)
}

/// `owner`'s records except the most recent one.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn old_paths(store: &PathStore<'_>, owner: &RelatedRef) -> Result<Vec<PathRecord>> {
    Ok(store.history_for(owner)?.into_iter().skip(1).collect())
}

/// `owner`'s current link, or an empty string.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn current_path(store: &PathStore<'_>, owner: &RelatedRef) -> Result<String> {
    Ok(store
        .current_for(owner)?
        .map(|record| record.link)
        .unwrap_or_default())
}

/// `owner`'s current record.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn current_path_record(store: &PathStore<'_>, owner: &RelatedRef) -> Result<Option<PathRecord>> {
    store.current_for(owner)
}
