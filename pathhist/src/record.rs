//! Stored path records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::RelatedRef;

/// One stored mapping from a link to the entity that owned it.
///
/// Records are never edited in place except for the `is_current` flag: a
/// changed path is a new record. A record whose `related_type` equals the
/// store's table name is self-related, an alias pointing at the record with
/// id `related_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord {
    /// Row id; larger ids are more recent.
    pub id: i64,
    /// The path, without scheme.
    pub link: String,
    /// Owner type tag, or the table name for aliases.
    pub related_type: String,
    /// Owner id, or the root record id for aliases.
    pub related_id: i64,
    /// Whether this is the owner's live path.
    pub is_current: bool,
    /// Insertion time in Unix seconds.
    pub created_at: i64,
}

impl PathRecord {
    /// Polymorphic reference to the owner (or root record, for aliases).
    #[must_use]
    pub fn owner(&self) -> RelatedRef {
        RelatedRef::new(self.related_type.clone(), self.related_id)
    }

    /// True when the record is an alias stored in `table`.
    #[must_use]
    pub fn is_self_related(&self, table: &str) -> bool {
        self.related_type == table
    }

    /// The link without its leading `/`.
    #[must_use]
    pub fn bare_link(&self) -> &str {
        strip_leading_slash(&self.link)
    }

    /// Insertion time as a UTC timestamp.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

/// Removes one leading `/`, if present.
#[must_use]
pub fn strip_leading_slash(link: &str) -> &str {
    link.strip_prefix('/').unwrap_or(link)
}
