//! Redirects from stale paths to current ones.
//!
//! A request is redirected when it names an alias record, or when it names
//! an owner's historical record while the owner has a different current one.
//! Aliases are checked first.

use serde::Serialize;

use crate::config::PrefixTable;
use crate::database::PathStore;
use crate::error::Result;
use crate::record::{strip_leading_slash, PathRecord};

/// Where to send a request, and with which HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Target path without a leading `/`.
    pub target: String,
    /// HTTP redirection status.
    pub status: u16,
}

fn join(prefix: Option<&str>, link: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{link}"),
        _ => link.to_string(),
    }
}

/// Target of an alias: the root owner's current link under its type's prefix.
fn alias_target(
    store: &PathStore<'_>,
    prefixes: &PrefixTable,
    alias: &PathRecord,
) -> Result<Option<String>> {
    let Some(root) = store.find_by_id(alias.related_id)? else {
        return Ok(None);
    };
    let link = match store.current_for(&root.owner())? {
        Some(current) => current.bare_link().to_string(),
        None => root.bare_link().to_string(),
    };
    Ok(Some(join(prefixes.prefix_for_type(&root.related_type), &link)))
}

/// Checks whether `request` should be redirected.
///
/// # Errors
///
/// Returns an error if the store fails.
///
/// # Examples
///
/// ```no_run
/// use pathhist::config::PrefixTable;
/// use pathhist::database::{Database, DatabaseConfig};
/// use pathhist::redirect::check_redirect;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/pathhist.db")).unwrap();
/// if let Some(redirect) = check_redirect(&db.store(), &PrefixTable::new(), "/testing-0", 302).unwrap() {
///     println!("{} {}", redirect.status, redirect.target);
/// }
/// ```
pub fn check_redirect(
    store: &PathStore<'_>,
    prefixes: &PrefixTable,
    request: &str,
    status: u16,
) -> Result<Option<Redirect>> {
    let path = strip_leading_slash(request);

    if let Some(alias) = store.find_alias_by_link(path)? {
        if let Some(target) = alias_target(store, prefixes, &alias)? {
            if target == path {
                return Ok(None);
            }
            log::debug!("alias `{path}` redirects to `{target}`");
            return Ok(Some(Redirect { target, status }));
        }
    }

    let matched = prefixes.matching(path).last().copied();
    let (rest, types) = match matched {
        Some(entry) => (entry.strip(path).unwrap_or(path), entry.types()),
        None => (path, Vec::new()),
    };

    if store.find_by_link(rest, &types, true)?.is_some() {
        return Ok(None);
    }
    let Some(stale) = store.find_by_link(rest, &types, false)? else {
        return Ok(None);
    };
    let Some(current) = store.current_for(&stale.owner())? else {
        return Ok(None);
    };
    if current.bare_link() == stale.bare_link() {
        return Ok(None);
    }

    let target = join(matched.map(|entry| entry.prefix()), current.bare_link());
    log::debug!("`{path}` is stale for {}, redirecting to `{target}`", stale.owner());
    Ok(Some(Redirect { target, status }))
}
