//! Path generation for tracked entities.
//!
//! A generated path is the parent's current path (when the entity uses
//! parent paths) joined with the entity's own slug. Every generated record
//! becomes the owner's current record, and entities whose paths embed this
//! one are regenerated through the registered descendant retrievers.

use crate::database::PathStore;
use crate::entity::{DirtyAttributes, ParentRelation, TrackedEntity};
use crate::error::{Error, Result};
use crate::record::PathRecord;
use crate::registry::EntityRegistry;

/// Whether soft-deleted descendants are regenerated during a cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CascadePolicy {
    /// Regenerate soft-deleted descendants like any other.
    #[default]
    IncludeSoftDeleted,
    /// Leave soft-deleted descendants untouched.
    SkipSoftDeleted,
}

/// Per-call switches for the generation hooks.
///
/// # Examples
///
/// ```
/// use pathhist::generator::{CascadePolicy, GenerationContext};
///
/// let ctx = GenerationContext::default();
/// assert!(ctx.enabled);
/// assert_eq!(ctx.cascade, CascadePolicy::IncludeSoftDeleted);
///
/// assert!(!GenerationContext::disabled().enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationContext {
    /// When false, saves never produce path records.
    pub enabled: bool,
    /// Policy applied to descendants.
    pub cascade: CascadePolicy,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            enabled: true,
            cascade: CascadePolicy::default(),
        }
    }
}

impl GenerationContext {
    /// A context in which nothing is generated.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Replaces the cascade policy.
    #[must_use]
    pub const fn with_cascade(mut self, cascade: CascadePolicy) -> Self {
        self.cascade = cascade;
        self
    }
}

/// Decides whether a save of `entity` produces a new path record.
///
/// Generation runs only when enabled, when one of the entity's path-change
/// attributes is dirty, and when the slug is a non-empty local value.
#[must_use]
pub fn should_generate(
    entity: &dyn TrackedEntity,
    dirty: &DirtyAttributes,
    ctx: &GenerationContext,
) -> bool {
    if !ctx.enabled || !dirty.any_of(&entity.path_change_attributes()) {
        return false;
    }

    match entity.slug() {
        None | Some("") => false,
        Some(slug) if entity.is_external() => {
            log::warn!(
                "not generating a path for {}: `{slug}` is external",
                entity.related_ref()
            );
            false
        }
        Some(slug) if entity.is_stub() => {
            log::warn!(
                "not generating a path for {}: `{slug}` is a stub",
                entity.related_ref()
            );
            false
        }
        Some(_) => true,
    }
}

/// The current path of `entity`'s parent, when it contributes one.
fn parent_prefix(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    entity: &dyn TrackedEntity,
) -> Result<Option<String>> {
    let owner = entity.related_ref();
    let parent = match entity.parent_relation() {
        ParentRelation::Undeclared => {
            return Err(Error::configuration(format!(
                "{owner} uses parent paths but declares no parent relation"
            )))
        }
        ParentRelation::Many(_) => {
            return Err(Error::configuration(format!(
                "{owner}: the parent relation must be to-one"
            )))
        }
        ParentRelation::One(None) => return Ok(None),
        ParentRelation::One(Some(parent)) => parent,
    };

    if !registry.is_tracked(&parent.related_type) {
        return Err(Error::configuration(format!(
            "{owner}: related model `{}` is not path-tracked",
            parent.related_type
        )));
    }

    let Some(parent_entity) = registry.load(store.connection(), &parent)? else {
        return Ok(None);
    };
    if parent_entity.is_external() {
        return Ok(None);
    }

    Ok(store
        .current_for(&parent)?
        .map(|record| record.bare_link().to_string())
        .filter(|link| !link.is_empty()))
}

/// Generates and stores a new current path for `entity`.
///
/// The caller supplies a store bound to a write transaction; the new record
/// and the unmarking of the owner's other records happen on it.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the slug is empty, a stub or
/// external, or if the parent relation is missing, to-many or of an untracked type.
pub fn generate_new_path(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    entity: &dyn TrackedEntity,
) -> Result<PathRecord> {
    let owner = entity.related_ref();
    let slug = match entity.slug() {
        Some(slug) if !slug.is_empty() => slug,
        _ => {
            return Err(Error::configuration(format!(
                "{owner} has an empty slug"
            )))
        }
    };
    if entity.is_stub() {
        return Err(Error::configuration(format!(
            "{owner} has a stub slug `{slug}`"
        )));
    }
    if entity.is_external() {
        return Err(Error::configuration(format!(
            "{owner} has an external slug `{slug}`"
        )));
    }

    let link = if entity.should_use_parent_paths() {
        match parent_prefix(store, registry, entity)? {
            Some(prefix) => format!("{prefix}/{slug}"),
            None => slug.to_string(),
        }
    } else {
        slug.to_string()
    };

    let record = store.insert(&link, &owner, true)?;
    store.unmark_others(&record)?;
    log::debug!("generated `{link}` for {owner} (record {})", record.id);

    Ok(record)
}

/// Regenerates the paths of every descendant of `entity`, depth first.
///
/// Returns the number of records generated. External descendants get no
/// record, but their own descendants are still regenerated. Descendants
/// without a usable slug are neither regenerated nor descended into.
///
/// # Errors
///
/// Propagates retriever and generation errors.
pub fn cascade_descendants(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    entity: &dyn TrackedEntity,
    policy: CascadePolicy,
) -> Result<usize> {
    let owner = entity.related_ref();
    let mut generated = 0;

    for retriever in registry.retrievers(&owner.related_type) {
        for child in retriever.descendants(store.connection(), entity)? {
            let child = child.as_ref();

            if child.is_external() {
                generated += cascade_descendants(store, registry, child, policy)?;
                continue;
            }
            if policy == CascadePolicy::SkipSoftDeleted && child.is_soft_deleted() {
                log::debug!("skipping soft-deleted {}", child.related_ref());
                continue;
            }
            if child.slug().is_some_and(str::is_empty) || child.is_stub() {
                log::warn!(
                    "not regenerating {} under {owner}: no usable slug",
                    child.related_ref()
                );
                continue;
            }

            generate_new_path(store, registry, child)?;
            generated += 1 + cascade_descendants(store, registry, child, policy)?;
        }
    }

    if generated > 0 {
        log::debug!("cascaded {generated} path(s) below {owner}");
    }
    Ok(generated)
}

/// Generates `entity`'s path and cascades to its descendants.
///
/// Returns the entity's new record.
///
/// # Errors
///
/// See [`generate_new_path`] and [`cascade_descendants`].
pub fn generate_and_cascade(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    entity: &dyn TrackedEntity,
    policy: CascadePolicy,
) -> Result<PathRecord> {
    let record = generate_new_path(store, registry, entity)?;
    cascade_descendants(store, registry, entity, policy)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::entity::RelatedRef;
    use crate::fixtures::{node_registry, nodes, Node, NODE};
    use crate::registry::EntityType;
    use crate::slug::Sluggable;
    use std::any::Any;

    struct Orphan {
        relation: ParentRelation,
    }

    impl Sluggable for Orphan {
        fn slug(&self) -> Option<&str> {
            Some("orphan")
        }
    }

    impl TrackedEntity for Orphan {
        fn related_ref(&self) -> RelatedRef {
            RelatedRef::new("orphan", 1)
        }

        fn parent_relation(&self) -> ParentRelation {
            self.relation.clone()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_should_generate() {
        let ctx = GenerationContext::default();
        let node = Node::new(1, "boots", None);
        let dirty = DirtyAttributes::created(&node);

        assert!(should_generate(&node, &dirty, &ctx));
        assert!(!should_generate(&node, &DirtyAttributes::new(), &ctx));
        assert!(!should_generate(&node, &dirty, &GenerationContext::disabled()));

        let unrelated: DirtyAttributes = ["title"].into_iter().collect();
        assert!(!should_generate(&node, &unrelated, &ctx));

        for slug in ["", "#dummy", "https://example.com/boots"] {
            let node = Node::new(1, slug, None);
            assert!(!should_generate(&node, &dirty, &ctx), "generated for {slug:?}");
        }
    }

    #[test]
    fn test_nested_path_uses_parent_current_path() {
        let tree = nodes(vec![
            Node::new(1, "first-category", None),
            Node::new(2, "nested", Some(1)),
            Node::new(3, "testing", Some(2)),
        ]);
        let registry = node_registry(&tree);
        let mut db = create_test_database();

        let leaf = db
            .write(|store| {
                for id in 1..=3 {
                    let node = tree.borrow()[&id].clone();
                    generate_new_path(store, &registry, &node)?;
                }
                store.current_for(&RelatedRef::new(NODE, 3))
            })
            .unwrap()
            .unwrap();

        assert_eq!(leaf.link, "first-category/nested/testing");
    }

    #[test]
    fn test_cascade_after_root_rename() {
        let tree = nodes(vec![
            Node::new(1, "first-category", None),
            Node::new(2, "nested", Some(1)),
            Node::new(3, "testing", Some(2)),
        ]);
        let registry = node_registry(&tree);
        let mut db = create_test_database();

        db.write(|store| {
            for id in 1..=3 {
                let node = tree.borrow()[&id].clone();
                generate_new_path(store, &registry, &node)?;
            }
            Ok(())
        })
        .unwrap();

        tree.borrow_mut().get_mut(&1).unwrap().slug = Some("changed-slug".into());
        let root = tree.borrow()[&1].clone();
        let cascaded = db
            .write(|store| {
                generate_new_path(store, &registry, &root)?;
                cascade_descendants(store, &registry, &root, CascadePolicy::default())
            })
            .unwrap();

        assert_eq!(cascaded, 2);
        let store = db.store();
        let leaf = store.current_for(&RelatedRef::new(NODE, 3)).unwrap().unwrap();
        assert_eq!(leaf.link, "changed-slug/nested/testing");
        assert_eq!(store.history_for(&RelatedRef::new(NODE, 3)).unwrap().len(), 2);
    }

    #[test]
    fn test_cascade_external_and_soft_deleted_children() {
        let mut deleted = Node::new(3, "gone", Some(1));
        deleted.deleted = true;
        let tree = nodes(vec![
            Node::new(1, "root", None),
            Node::new(2, "https://example.com", Some(1)),
            deleted,
            Node::new(4, "below-external", Some(2)),
        ]);
        let registry = node_registry(&tree);
        let mut db = create_test_database();
        let root = tree.borrow()[&1].clone();

        let skipped = db
            .write(|store| {
                generate_new_path(store, &registry, &root)?;
                cascade_descendants(store, &registry, &root, CascadePolicy::SkipSoftDeleted)
            })
            .unwrap();
        assert_eq!(skipped, 1);

        let included = db
            .write(|store| {
                cascade_descendants(store, &registry, &root, CascadePolicy::IncludeSoftDeleted)
            })
            .unwrap();
        assert_eq!(included, 2);

        let store = db.store();
        assert!(store.current_for(&RelatedRef::new(NODE, 2)).unwrap().is_none());
        assert_eq!(
            store.current_for(&RelatedRef::new(NODE, 4)).unwrap().unwrap().link,
            "below-external"
        );
        assert_eq!(
            store.current_for(&RelatedRef::new(NODE, 3)).unwrap().unwrap().link,
            "root/gone"
        );
    }

    #[test]
    fn test_parent_relation_errors() {
        let tree = nodes(vec![]);
        let mut registry = node_registry(&tree);
        registry.register(EntityType::new("orphan", |_conn, _id| Ok(None)));
        let mut db = create_test_database();

        for relation in [
            ParentRelation::Undeclared,
            ParentRelation::Many(vec![RelatedRef::new(NODE, 1)]),
            ParentRelation::One(Some(RelatedRef::new("warehouse", 1))),
        ] {
            let orphan = Orphan { relation };
            let err = db
                .write(|store| generate_new_path(store, &registry, &orphan))
                .unwrap_err();
            assert!(err.is_configuration(), "{err}");
        }

        let orphan = Orphan {
            relation: ParentRelation::One(None),
        };
        let record = db
            .write(|store| generate_new_path(store, &registry, &orphan))
            .unwrap();
        assert_eq!(record.link, "orphan");
    }

    #[test]
    fn test_missing_or_external_parent_contributes_nothing() {
        let tree = nodes(vec![
            Node::new(1, "https://example.com", None),
            Node::new(2, "child", Some(1)),
            Node::new(3, "lost", Some(99)),
        ]);
        let registry = node_registry(&tree);
        let mut db = create_test_database();

        let (child, lost) = db
            .write(|store| {
                let child = generate_new_path(store, &registry, &tree.borrow()[&2].clone())?;
                let lost = generate_new_path(store, &registry, &tree.borrow()[&3].clone())?;
                Ok((child, lost))
            })
            .unwrap();
        assert_eq!(child.link, "child");
        assert_eq!(lost.link, "lost");
    }

    #[test]
    fn test_direct_generation_rejects_unusable_slug() {
        let tree = nodes(vec![]);
        let registry = node_registry(&tree);
        let mut db = create_test_database();

        for slug in ["", "#dummy", "http://example.com"] {
            let node = Node::new(1, slug, None);
            let err = db
                .write(|store| generate_new_path(store, &registry, &node))
                .unwrap_err();
            assert!(err.is_configuration());
        }
    }
}
