//! The [`PathHistory`] facade.
//!
//! Persistence code calls the lifecycle hooks after saving, deleting or
//! restoring an entity; request code calls [`PathHistory::check_redirect`]
//! first and [`PathHistory::resolve_and_dispatch`] when there is no
//! redirect.

use crate::config::{Config, PrefixTable, DEFAULT_REDIRECT_STATUS};
use crate::database::Database;
use crate::entity::{DirtyAttributes, RelatedRef, TrackedEntity};
use crate::error::{Error, Result};
use crate::generator::{self, CascadePolicy, GenerationContext};
use crate::history;
use crate::record::PathRecord;
use crate::redirect::{self, Redirect};
use crate::registry::EntityRegistry;
use crate::resolver::{self, HandlerRegistry, ResolvedTarget};

/// How an entity was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Marked deleted but kept; its paths stay.
    Soft,
    /// Removed for good; its paths go too.
    Hard,
}

/// Path history over one database, entity registry and prefix table.
///
/// # Examples
///
/// ```no_run
/// use pathhist::config::PrefixTable;
/// use pathhist::database::{Database, DatabaseConfig};
/// use pathhist::registry::EntityRegistry;
/// use pathhist::PathHistory;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/pathhist.db")).unwrap();
/// let paths = PathHistory::new(db, EntityRegistry::new(), PrefixTable::new()).unwrap();
///
/// if let Some(redirect) = paths.check_redirect("/old-boots").unwrap() {
///     println!("{} -> {}", redirect.status, redirect.target);
/// }
/// ```
#[derive(Debug)]
pub struct PathHistory {
    db: Database,
    registry: EntityRegistry,
    prefixes: PrefixTable,
    redirect_status: u16,
    cascade: CascadePolicy,
}

impl PathHistory {
    /// Wires a database, registry and prefix table together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a declared parent type or a type
    /// named in the prefix table is not registered.
    pub fn new(db: Database, registry: EntityRegistry, prefixes: PrefixTable) -> Result<Self> {
        registry.validate()?;
        registry.validate_prefixes(&prefixes)?;
        Ok(Self {
            db,
            registry,
            prefixes,
            redirect_status: DEFAULT_REDIRECT_STATUS,
            cascade: CascadePolicy::default(),
        })
    }

    /// Wires a database and registry using a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the database was opened on a
    /// different table than `config` names, or if the wiring is incomplete.
    pub fn from_config(config: &Config, db: Database, registry: EntityRegistry) -> Result<Self> {
        if db.table() != config.table() {
            return Err(Error::configuration(format!(
                "database uses table `{}` but the configuration names `{}`",
                db.table(),
                config.table()
            )));
        }
        let mut paths = Self::new(db, registry, config.prefix_table()?)?;
        paths.redirect_status = config.redirect_status();
        paths.cascade = config.cascade_policy();
        Ok(paths)
    }

    /// Replaces the redirect status.
    #[must_use]
    pub fn with_redirect_status(mut self, status: u16) -> Self {
        self.redirect_status = status;
        self
    }

    /// The underlying database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The underlying database, mutably.
    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// The entity registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The prefix table.
    #[must_use]
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    /// The configured redirect status.
    #[must_use]
    pub fn redirect_status(&self) -> u16 {
        self.redirect_status
    }

    /// An enabled generation context carrying the configured cascade policy.
    #[must_use]
    pub fn context(&self) -> GenerationContext {
        GenerationContext::default().with_cascade(self.cascade)
    }

    /// Hook for a created or updated entity.
    ///
    /// Generates a new current path and regenerates descendants when a
    /// path-change attribute is dirty, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from generation and store errors.
    pub fn on_create_or_update(
        &mut self,
        entity: &dyn TrackedEntity,
        dirty: &DirtyAttributes,
        ctx: &GenerationContext,
    ) -> Result<Option<PathRecord>> {
        if !generator::should_generate(entity, dirty, ctx) {
            return Ok(None);
        }
        let registry = &self.registry;
        let cascade = ctx.cascade;
        self.db
            .write(|store| generator::generate_and_cascade(store, registry, entity, cascade))
            .map(Some)
    }

    /// Hook for a deleted entity. Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn on_delete(&mut self, entity: &dyn TrackedEntity, mode: DeleteMode) -> Result<usize> {
        match mode {
            DeleteMode::Soft => Ok(0),
            DeleteMode::Hard => {
                let owner = entity.related_ref();
                self.db.write(|store| history::delete_owner(store, &owner))
            }
        }
    }

    /// Hook for a restored entity: its most recent record becomes current.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn on_restore(&mut self, entity: &dyn TrackedEntity) -> Result<Option<PathRecord>> {
        let owner = entity.related_ref();
        self.db.write(|store| history::restore(store, &owner))
    }

    /// Where `request` should be redirected, if anywhere.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn check_redirect(&self, request: &str) -> Result<Option<Redirect>> {
        redirect::check_redirect(&self.db.store(), &self.prefixes, request, self.redirect_status)
    }

    /// Resolves `request` to its current record, owner and handler name.
    ///
    /// # Errors
    ///
    /// Returns store and loader errors.
    pub fn resolve(&self, request: &str) -> Result<Option<ResolvedTarget>> {
        resolver::resolve(&self.db.store(), &self.registry, &self.prefixes, request)
    }

    /// Resolves `request` and invokes its handler.
    ///
    /// # Errors
    ///
    /// Returns store and loader errors.
    pub fn resolve_and_dispatch<R>(
        &self,
        request: &str,
        handlers: &HandlerRegistry<R>,
    ) -> Result<Option<R>> {
        resolver::resolve_and_dispatch(
            &self.db.store(),
            &self.registry,
            &self.prefixes,
            handlers,
            request,
        )
    }

    /// Adds an alias for record `root_id`.
    ///
    /// # Errors
    ///
    /// See [`history::add_alias`].
    pub fn add_alias(&mut self, root_id: i64, link: &str) -> Result<PathRecord> {
        self.db.write(|store| history::add_alias(store, root_id, link))
    }

    /// Deletes a record; see [`history::delete_record`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the record does not exist.
    pub fn delete_record(&mut self, id: i64) -> Result<Option<PathRecord>> {
        self.db.write(|store| history::delete_record(store, id))
    }

    /// All records of `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn path_history(&self, owner: &RelatedRef) -> Result<Vec<PathRecord>> {
        history::path_history(&self.db.store(), owner)
    }

    /// Records of `owner` except the most recent.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn old_paths(&self, owner: &RelatedRef) -> Result<Vec<PathRecord>> {
        history::old_paths(&self.db.store(), owner)
    }

    /// Current link of `owner`, or an empty string.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn current_path(&self, owner: &RelatedRef) -> Result<String> {
        history::current_path(&self.db.store(), owner)
    }

    /// Current record of `owner`.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub fn current_path_record(&self, owner: &RelatedRef) -> Result<Option<PathRecord>> {
        history::current_path_record(&self.db.store(), owner)
    }
}
