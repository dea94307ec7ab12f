//! Record-backed owners for commands that run without domain entities.
//!
//! The CLI only knows what the store knows: an owner is its `(type, id)`
//! reference. Every type named in the prefix table is registered with a
//! loader producing a [`StoredOwner`], and every handler name resolves to a
//! handler that describes the match.

use std::any::Any;

use pathhist::config::PrefixTable;
use pathhist::{
    EntityRegistry, EntityType, HandlerRegistry, ParentRelation, RelatedRef, Sluggable,
    TrackedEntity,
};

/// An owner known only by its reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOwner {
    related: RelatedRef,
}

impl StoredOwner {
    /// Owner `related_type#related_id`.
    pub fn new(related_type: impl Into<String>, related_id: i64) -> Self {
        Self {
            related: RelatedRef::new(related_type, related_id),
        }
    }
}

impl Sluggable for StoredOwner {
    fn slug(&self) -> Option<&str> {
        None
    }
}

impl TrackedEntity for StoredOwner {
    fn related_ref(&self) -> RelatedRef {
        self.related.clone()
    }

    fn parent_relation(&self) -> ParentRelation {
        ParentRelation::One(None)
    }

    fn use_parent_paths(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registers every type of `prefixes` with a [`StoredOwner`] loader.
pub fn stored_registry(prefixes: &PrefixTable) -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    for tag in prefixes.all_types() {
        let owner_type = tag.clone();
        registry.register(EntityType::new(tag, move |_conn, id| {
            Ok(Some(
                Box::new(StoredOwner::new(owner_type.as_str(), id)) as Box<dyn TrackedEntity>
            ))
        }));
    }
    registry
}

/// Handlers for every handler name of `prefixes`.
///
/// Each renders `<handler> <type> <id>`.
pub fn describing_handlers(prefixes: &PrefixTable) -> HandlerRegistry<String> {
    let mut handlers = HandlerRegistry::new();
    for name in prefixes.handler_names() {
        let handler = name.to_string();
        handlers.register_fn(name, move |entity: &dyn TrackedEntity| {
            let owner = entity.related_ref();
            format!("{handler} {} {}", owner.related_type, owner.related_id)
        });
    }
    handlers
}
