//! In-memory entities shared by unit tests.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use rusqlite::Connection;

use crate::entity::{ParentRelation, RelatedRef, TrackedEntity};
use crate::error::Result;
use crate::registry::{DescendantsRetriever, EntityRegistry, EntityType};
use crate::slug::Sluggable;

pub const NODE: &str = "node";

/// A tree node with an optional parent node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: i64,
    pub slug: Option<String>,
    pub parent: Option<i64>,
    pub deleted: bool,
}

impl Node {
    pub fn new(id: i64, slug: &str, parent: Option<i64>) -> Self {
        Self {
            id,
            slug: Some(slug.to_string()),
            parent,
            deleted: false,
        }
    }
}

impl Sluggable for Node {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl TrackedEntity for Node {
    fn related_ref(&self) -> RelatedRef {
        RelatedRef::new(NODE, self.id)
    }

    fn parent_relation(&self) -> ParentRelation {
        ParentRelation::One(self.parent.map(|p| RelatedRef::new(NODE, p)))
    }

    fn is_soft_deleted(&self) -> bool {
        self.deleted
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Nodes = Rc<RefCell<BTreeMap<i64, Node>>>;

struct Children(Nodes);

impl DescendantsRetriever for Children {
    fn descendants(
        &self,
        _conn: &Connection,
        parent: &dyn TrackedEntity,
    ) -> Result<Vec<Box<dyn TrackedEntity>>> {
        let parent_id = parent.related_ref().related_id;
        Ok(self
            .0
            .borrow()
            .values()
            .filter(|n| n.parent == Some(parent_id))
            .cloned()
            .map(|n| Box::new(n) as Box<dyn TrackedEntity>)
            .collect())
    }
}

/// Registry with the `node` type backed by `nodes`.
pub fn node_registry(nodes: &Nodes) -> EntityRegistry {
    let loaded = Rc::clone(nodes);
    let mut registry = EntityRegistry::new();
    registry.register(
        EntityType::new(NODE, move |_conn, id| {
            Ok(loaded
                .borrow()
                .get(&id)
                .cloned()
                .map(|n| Box::new(n) as Box<dyn TrackedEntity>))
        })
        .parent_type(NODE)
        .descendants(Children(Rc::clone(nodes))),
    );
    registry
}

pub fn nodes(list: Vec<Node>) -> Nodes {
    Rc::new(RefCell::new(list.into_iter().map(|n| (n.id, n)).collect()))
}
