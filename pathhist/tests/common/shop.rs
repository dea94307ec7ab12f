//! A shop domain used across the integration tests.
//!
//! Categories nest through `parent_id`; the root category does not prefix
//! its children's paths with a parent. Products use `vendor_code` as their
//! slug and are regenerated when they move to another category.

#![allow(dead_code)]

use std::any::Any;

use pathhist::config::{Config, PrefixTable};
use pathhist::database::Database;
use pathhist::registry::{EntityRegistry, EntityType};
use pathhist::{
    DirtyAttributes, GenerationContext, ParentRelation, PathHistory, PathRecord, RelatedRef,
    Result, Sluggable, TrackedEntity,
};
use rusqlite::{params, Connection, OptionalExtension};

pub const CATEGORY: &str = "product_category";
pub const PRODUCT: &str = "product";

const SHOP_SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS product_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        slug TEXT,
        parent_id INTEGER,
        deleted INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        vendor_code TEXT,
        category_id INTEGER,
        deleted INTEGER NOT NULL DEFAULT 0
    );
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: i64,
    pub slug: Option<String>,
    pub parent_id: Option<i64>,
    pub deleted: bool,
}

impl Sluggable for ProductCategory {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl TrackedEntity for ProductCategory {
    fn related_ref(&self) -> RelatedRef {
        RelatedRef::new(CATEGORY, self.id)
    }

    fn parent_relation(&self) -> ParentRelation {
        ParentRelation::One(self.parent_id.map(|id| RelatedRef::new(CATEGORY, id)))
    }

    fn use_parent_paths(&self) -> bool {
        self.parent_id.is_some()
    }

    fn is_soft_deleted(&self) -> bool {
        self.deleted
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub vendor_code: Option<String>,
    pub category_id: Option<i64>,
    pub deleted: bool,
}

impl Sluggable for Product {
    fn slug_attribute(&self) -> &str {
        "vendor_code"
    }

    fn slug(&self) -> Option<&str> {
        self.vendor_code.as_deref()
    }
}

impl TrackedEntity for Product {
    fn related_ref(&self) -> RelatedRef {
        RelatedRef::new(PRODUCT, self.id)
    }

    fn parent_relation(&self) -> ParentRelation {
        ParentRelation::One(self.category_id.map(|id| RelatedRef::new(CATEGORY, id)))
    }

    fn update_path_on_change(&self) -> Vec<String> {
        vec!["category_id".to_string()]
    }

    fn is_soft_deleted(&self) -> bool {
        self.deleted
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductCategory> {
    Ok(ProductCategory {
        id: row.get(0)?,
        slug: row.get(1)?,
        parent_id: row.get(2)?,
        deleted: row.get(3)?,
    })
}

fn product_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        vendor_code: row.get(1)?,
        category_id: row.get(2)?,
        deleted: row.get(3)?,
    })
}

pub fn find_category(conn: &Connection, id: i64) -> Result<Option<ProductCategory>> {
    Ok(conn
        .query_row(
            "SELECT id, slug, parent_id, deleted FROM product_categories WHERE id = ?1",
            params![id],
            category_from_row,
        )
        .optional()?)
}

pub fn find_product(conn: &Connection, id: i64) -> Result<Option<Product>> {
    Ok(conn
        .query_row(
            "SELECT id, vendor_code, category_id, deleted FROM products WHERE id = ?1",
            params![id],
            product_from_row,
        )
        .optional()?)
}

fn load_category(conn: &Connection, id: i64) -> Result<Option<Box<dyn TrackedEntity>>> {
    Ok(find_category(conn, id)?.map(|c| Box::new(c) as Box<dyn TrackedEntity>))
}

fn load_product(conn: &Connection, id: i64) -> Result<Option<Box<dyn TrackedEntity>>> {
    Ok(find_product(conn, id)?.map(|p| Box::new(p) as Box<dyn TrackedEntity>))
}

fn child_categories(
    conn: &Connection,
    parent: &dyn TrackedEntity,
) -> Result<Vec<Box<dyn TrackedEntity>>> {
    let mut stmt = conn.prepare(
        "SELECT id, slug, parent_id, deleted FROM product_categories WHERE parent_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![parent.related_ref().related_id], category_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows
        .into_iter()
        .map(|c| Box::new(c) as Box<dyn TrackedEntity>)
        .collect())
}

fn category_products(
    conn: &Connection,
    parent: &dyn TrackedEntity,
) -> Result<Vec<Box<dyn TrackedEntity>>> {
    let mut stmt = conn.prepare(
        "SELECT id, vendor_code, category_id, deleted FROM products WHERE category_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![parent.related_ref().related_id], product_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows
        .into_iter()
        .map(|p| Box::new(p) as Box<dyn TrackedEntity>)
        .collect())
}

/// Registry with both shop types.
pub fn shop_registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    registry
        .register(
            EntityType::new(CATEGORY, load_category)
                .parent_type(CATEGORY)
                .descendants(child_categories)
                .descendants(category_products),
        )
        .register(EntityType::new(PRODUCT, load_product).parent_type(CATEGORY));
    registry
}

/// Prefix table with `shop`, `another` and `invalid` namespaces.
pub fn shop_prefixes() -> PrefixTable {
    let yaml = r"
- prefix: shop
  types: [product, product_category]
  handler: shop
- prefix: another
  types:
    product_category: another
- prefix: invalid
  types:
    product: invalid
";
    let entries: Vec<pathhist::config::PrefixConfig> = serde_yaml::from_str(yaml).unwrap();
    PrefixTable::from_config(&entries).unwrap()
}

/// The shop tables plus path history, driven like a persistence layer would.
pub struct Shop {
    pub paths: PathHistory,
    pub ctx: GenerationContext,
}

impl Shop {
    pub fn new() -> Self {
        Self::with_prefixes(PrefixTable::new())
    }

    pub fn with_prefixes(prefixes: PrefixTable) -> Self {
        Self::open(super::create_test_database(), prefixes)
    }

    pub fn open(db: Database, prefixes: PrefixTable) -> Self {
        db.connection().execute_batch(SHOP_SCHEMA).unwrap();
        let paths = PathHistory::new(db, shop_registry(), prefixes).unwrap();
        let ctx = paths.context();
        Self { paths, ctx }
    }

    pub fn from_config(config: &Config, db: Database) -> Self {
        db.connection().execute_batch(SHOP_SCHEMA).unwrap();
        let paths = PathHistory::from_config(config, db, shop_registry()).unwrap();
        let ctx = paths.context();
        Self { paths, ctx }
    }

    pub fn conn(&self) -> &Connection {
        self.paths.database().connection()
    }

    pub fn category(&self, id: i64) -> ProductCategory {
        find_category(self.conn(), id).unwrap().unwrap()
    }

    pub fn product(&self, id: i64) -> Product {
        find_product(self.conn(), id).unwrap().unwrap()
    }

    pub fn create_category(&mut self, slug: &str, parent_id: Option<i64>) -> ProductCategory {
        self.conn()
            .execute(
                "INSERT INTO product_categories (slug, parent_id) VALUES (?1, ?2)",
                params![slug, parent_id],
            )
            .unwrap();
        let category = self.category(self.conn().last_insert_rowid());
        let dirty = DirtyAttributes::created(&category);
        self.paths
            .on_create_or_update(&category, &dirty, &self.ctx)
            .unwrap();
        category
    }

    pub fn rename_category(&mut self, id: i64, slug: &str) -> Option<PathRecord> {
        let before = self.category(id);
        self.conn()
            .execute(
                "UPDATE product_categories SET slug = ?2 WHERE id = ?1",
                params![id, slug],
            )
            .unwrap();
        let after = self.category(id);
        let mut dirty = DirtyAttributes::new();
        dirty.compare("slug", &before.slug, &after.slug);
        self.paths
            .on_create_or_update(&after, &dirty, &self.ctx)
            .unwrap()
    }

    pub fn soft_delete_category(&mut self, id: i64) {
        self.conn()
            .execute(
                "UPDATE product_categories SET deleted = 1 WHERE id = ?1",
                params![id],
            )
            .unwrap();
        let category = self.category(id);
        self.paths
            .on_delete(&category, pathhist::DeleteMode::Soft)
            .unwrap();
    }

    pub fn create_product(&mut self, vendor_code: &str, category_id: Option<i64>) -> Product {
        self.conn()
            .execute(
                "INSERT INTO products (vendor_code, category_id) VALUES (?1, ?2)",
                params![vendor_code, category_id],
            )
            .unwrap();
        let product = self.product(self.conn().last_insert_rowid());
        let dirty = DirtyAttributes::created(&product);
        self.paths
            .on_create_or_update(&product, &dirty, &self.ctx)
            .unwrap();
        product
    }

    pub fn move_product(&mut self, id: i64, category_id: Option<i64>) -> Option<PathRecord> {
        let before = self.product(id);
        self.conn()
            .execute(
                "UPDATE products SET category_id = ?2 WHERE id = ?1",
                params![id, category_id],
            )
            .unwrap();
        let after = self.product(id);
        let mut dirty = DirtyAttributes::new();
        dirty.compare("category_id", &before.category_id, &after.category_id);
        self.paths
            .on_create_or_update(&after, &dirty, &self.ctx)
            .unwrap()
    }

    pub fn current(&self, owner: &RelatedRef) -> String {
        self.paths.current_path(owner).unwrap()
    }

    /// Number of current records per owner, for invariant checks.
    pub fn max_current_per_owner(&self) -> usize {
        let table = self.paths.database().table().to_string();
        let mut stmt = self
            .conn()
            .prepare(&format!(
                "SELECT COUNT(*) FROM {table} WHERE is_current = 1 \
                 GROUP BY related_type, related_id ORDER BY COUNT(*) DESC LIMIT 1"
            ))
            .unwrap();
        stmt.query_row([], |row| row.get::<_, i64>(0))
            .optional()
            .unwrap()
            .map_or(0, |n| usize::try_from(n).unwrap())
    }
}
