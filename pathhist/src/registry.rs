//! Registry of path-tracked entity types.
//!
//! Path records reference their owners by type tag and id. The registry maps
//! each tag to a loader that rebuilds the entity from the database, the tag
//! of its declared parent type, and the retrievers that find entities whose
//! paths embed this one's.

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::Connection;

use crate::config::PrefixTable;
use crate::entity::{RelatedRef, TrackedEntity};
use crate::error::{Error, Result};

/// Loads one entity of a registered type by id.
pub type Loader = Box<dyn Fn(&Connection, i64) -> Result<Option<Box<dyn TrackedEntity>>>>;

/// Finds the entities whose paths are built on top of `parent`'s path.
///
/// Any closure with the matching signature is a retriever.
pub trait DescendantsRetriever {
    /// Returns the direct dependents of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependents cannot be read.
    fn descendants(
        &self,
        conn: &Connection,
        parent: &dyn TrackedEntity,
    ) -> Result<Vec<Box<dyn TrackedEntity>>>;
}

impl<F> DescendantsRetriever for F
where
    F: Fn(&Connection, &dyn TrackedEntity) -> Result<Vec<Box<dyn TrackedEntity>>>,
{
    fn descendants(
        &self,
        conn: &Connection,
        parent: &dyn TrackedEntity,
    ) -> Result<Vec<Box<dyn TrackedEntity>>> {
        self(conn, parent)
    }
}

/// Registration of one entity type.
///
/// # Examples
///
/// ```
/// use pathhist::registry::{EntityRegistry, EntityType};
///
/// let mut registry = EntityRegistry::new();
/// registry.register(
///     EntityType::new("product", |_conn, _id| Ok(None)).parent_type("category"),
/// );
/// assert!(registry.is_tracked("product"));
/// assert!(registry.validate().is_err()); // "category" is not registered
/// ```
pub struct EntityType {
    tag: String,
    loader: Loader,
    parent_type: Option<String>,
    retrievers: Vec<Box<dyn DescendantsRetriever>>,
}

impl EntityType {
    /// A type `tag` whose entities are loaded by `loader`.
    pub fn new<F>(tag: impl Into<String>, loader: F) -> Self
    where
        F: Fn(&Connection, i64) -> Result<Option<Box<dyn TrackedEntity>>> + 'static,
    {
        Self {
            tag: tag.into(),
            loader: Box::new(loader),
            parent_type: None,
            retrievers: Vec::new(),
        }
    }

    /// Declares the type tag of this type's parent relation.
    #[must_use]
    pub fn parent_type(mut self, tag: impl Into<String>) -> Self {
        self.parent_type = Some(tag.into());
        self
    }

    /// Adds a descendant retriever.
    #[must_use]
    pub fn descendants<D: DescendantsRetriever + 'static>(mut self, retriever: D) -> Self {
        self.retrievers.push(Box::new(retriever));
        self
    }

    /// The type tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("tag", &self.tag)
            .field("parent_type", &self.parent_type)
            .field("retrievers", &self.retrievers.len())
            .finish_non_exhaustive()
    }
}

/// All path-tracked entity types known to the library.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    types: BTreeMap<String, EntityType>,
}

impl EntityRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) an entity type.
    pub fn register(&mut self, entity_type: EntityType) -> &mut Self {
        self.types.insert(entity_type.tag.clone(), entity_type);
        self
    }

    /// True when `tag` is a registered path-tracked type.
    #[must_use]
    pub fn is_tracked(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Registered type tags in sorted order.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Loads the entity `reference` points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the type is not registered, or
    /// whatever the loader returns.
    pub fn load(
        &self,
        conn: &Connection,
        reference: &RelatedRef,
    ) -> Result<Option<Box<dyn TrackedEntity>>> {
        let entity_type = self.get(&reference.related_type)?;
        (entity_type.loader)(conn, reference.related_id)
    }

    /// Descendant retrievers of type `tag`; empty for unknown types.
    #[must_use]
    pub fn retrievers(&self, tag: &str) -> &[Box<dyn DescendantsRetriever>] {
        self.types
            .get(tag)
            .map_or(&[], |entity_type| entity_type.retrievers.as_slice())
    }

    /// Checks that every declared parent type is itself registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first dangling parent type.
    pub fn validate(&self) -> Result<()> {
        for entity_type in self.types.values() {
            if let Some(parent) = &entity_type.parent_type {
                if !self.is_tracked(parent) {
                    return Err(Error::configuration(format!(
                        "related model `{parent}` of `{}` is not path-tracked",
                        entity_type.tag
                    )));
                }
            }
        }
        Ok(())
    }

    /// Checks that every type named in the prefix table is registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first unknown type.
    pub fn validate_prefixes(&self, prefixes: &PrefixTable) -> Result<()> {
        for tag in prefixes.all_types() {
            if !self.is_tracked(&tag) {
                return Err(Error::configuration(format!(
                    "prefix table references unregistered type `{tag}`"
                )));
            }
        }
        Ok(())
    }

    fn get(&self, tag: &str) -> Result<&EntityType> {
        self.types
            .get(tag)
            .ok_or_else(|| Error::configuration(format!("type `{tag}` is not path-tracked")))
    }
}
