//! Capabilities of domain entities that participate in path history.
//!
//! The library never owns domain entities. Callers implement
//! [`TrackedEntity`] for their types and register loaders in an
//! [`EntityRegistry`](crate::registry::EntityRegistry) so the library can
//! follow [`RelatedRef`]s back to entities.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slug::Sluggable;

/// A polymorphic reference to an entity: its type tag plus its identity.
///
/// # Examples
///
/// ```
/// use pathhist::RelatedRef;
///
/// let r = RelatedRef::new("product", 7);
/// assert_eq!(r.to_string(), "product#7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelatedRef {
    /// Type tag of the referenced entity.
    pub related_type: String,
    /// Identity of the referenced entity within its type.
    pub related_id: i64,
}

impl RelatedRef {
    /// Creates a reference from a type tag and an id.
    pub fn new(related_type: impl Into<String>, related_id: i64) -> Self {
        Self {
            related_type: related_type.into(),
            related_id,
        }
    }
}

impl fmt::Display for RelatedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.related_type, self.related_id)
    }
}

/// How an entity declares its parent in the path hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRelation {
    /// The entity declares no parent relation at all.
    Undeclared,
    /// A to-one relation; `None` when the entity currently has no parent.
    One(Option<RelatedRef>),
    /// A to-many relation. Paths cannot be derived from it.
    Many(Vec<RelatedRef>),
}

/// A domain entity whose path history is maintained.
pub trait TrackedEntity: Sluggable + Any {
    /// Type tag and identity of this entity.
    fn related_ref(&self) -> RelatedRef;

    /// Declared parent relation.
    fn parent_relation(&self) -> ParentRelation {
        ParentRelation::Undeclared
    }

    /// Whether generated paths are prefixed with the parent's current path.
    fn use_parent_paths(&self) -> bool {
        true
    }

    /// Attributes besides the slug whose change regenerates the path.
    fn update_path_on_change(&self) -> Vec<String> {
        Vec::new()
    }

    /// All attributes whose change regenerates the path.
    ///
    /// The slug attribute always comes first.
    fn path_change_attributes(&self) -> Vec<String> {
        let mut attributes = vec![self.slug_attribute().to_string()];
        attributes.extend(self.update_path_on_change());
        attributes
    }

    /// Whether the entity is currently soft-deleted.
    fn is_soft_deleted(&self) -> bool {
        false
    }

    /// Upcast for handlers that need the concrete type back.
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn TrackedEntity + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedEntity")
            .field("ref", &self.related_ref())
            .field("slug", &self.slug())
            .finish()
    }
}

impl dyn TrackedEntity + '_ {
    /// Downcasts to a concrete entity type.
    #[must_use]
    pub fn downcast_ref<T: TrackedEntity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// True when the path policy asks for a parent prefix.
    ///
    /// External entities never use parent paths.
    #[must_use]
    pub fn should_use_parent_paths(&self) -> bool {
        !self.is_external() && self.use_parent_paths()
    }
}

/// The set of attributes that changed in a save.
///
/// # Examples
///
/// ```
/// use pathhist::DirtyAttributes;
///
/// let mut dirty = DirtyAttributes::new();
/// dirty.compare("slug", "testing", "testing");
/// assert!(dirty.is_empty());
///
/// dirty.compare("slug", "testing", "new-one");
/// assert!(dirty.contains("slug"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyAttributes {
    names: BTreeSet<String>,
}

impl DirtyAttributes {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every path-change attribute of a freshly created entity.
    #[must_use]
    pub fn created(entity: &dyn TrackedEntity) -> Self {
        Self {
            names: entity.path_change_attributes().into_iter().collect(),
        }
    }

    /// Marks `name` dirty unconditionally.
    pub fn mark(&mut self, name: impl Into<String>) -> &mut Self {
        self.names.insert(name.into());
        self
    }

    /// Marks `name` dirty only when `old` and `new` differ.
    pub fn compare<T: PartialEq + ?Sized>(
        &mut self,
        name: impl Into<String>,
        old: &T,
        new: &T,
    ) -> &mut Self {
        if old != new {
            self.names.insert(name.into());
        }
        self
    }

    /// True if `name` is dirty.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True if any of `names` is dirty.
    #[must_use]
    pub fn any_of(&self, names: &[String]) -> bool {
        names.iter().any(|n| self.names.contains(n))
    }

    /// True if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DirtyAttributes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
