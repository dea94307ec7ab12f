//! Dispatch of current paths to the handler responsible for their type.
//!
//! A request is resolved in two steps. [`resolve`] strips a configured
//! prefix, finds the current record for the remainder, loads its owner and
//! picks the handler name the prefix table maps the owner's type to.
//! [`HandlerRegistry::dispatch`] then invokes the handler registered under
//! that name. Every miss along the way is reported as `None`.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::PrefixTable;
use crate::database::PathStore;
use crate::entity::TrackedEntity;
use crate::error::{Error, Result};
use crate::record::{strip_leading_slash, PathRecord};
use crate::registry::EntityRegistry;

/// A handler exposing a `show` action for resolved entities.
pub trait ShowHandler<R> {
    /// Renders `entity`.
    fn show(&self, entity: &dyn TrackedEntity) -> R;
}

/// A registered handler.
pub enum Handler<R> {
    /// An object with a `show` action.
    Show(Box<dyn ShowHandler<R>>),
    /// A plain function of the entity.
    Invoke(Box<dyn Fn(&dyn TrackedEntity) -> R>),
}

impl<R> Handler<R> {
    /// Invokes the handler.
    pub fn call(&self, entity: &dyn TrackedEntity) -> R {
        match self {
            Self::Show(handler) => handler.show(entity),
            Self::Invoke(handler) => handler(entity),
        }
    }
}

impl<R> fmt::Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show(_) => f.write_str("Handler::Show"),
            Self::Invoke(_) => f.write_str("Handler::Invoke"),
        }
    }
}

/// Handlers by name.
///
/// # Examples
///
/// ```
/// use pathhist::resolver::HandlerRegistry;
/// use pathhist::TrackedEntity;
///
/// let mut handlers: HandlerRegistry<String> = HandlerRegistry::new();
/// handlers.register_fn("shop", |entity: &dyn TrackedEntity| {
///     format!("shop page for {}", entity.related_ref())
/// });
/// assert!(handlers.contains("shop"));
/// ```
pub struct HandlerRegistry<R> {
    handlers: BTreeMap<String, Handler<R>>,
}

impl<R> Default for HandlerRegistry<R> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<R> fmt::Debug for HandlerRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.handlers.iter()).finish()
    }
}

impl<R> HandlerRegistry<R> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `show` handler under `name`.
    pub fn register_show<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: ShowHandler<R> + 'static,
    {
        self.handlers
            .insert(name.into(), Handler::Show(Box::new(handler)));
        self
    }

    /// Registers a function handler under `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&dyn TrackedEntity) -> R + 'static,
    {
        self.handlers
            .insert(name.into(), Handler::Invoke(Box::new(handler)));
        self
    }

    /// True when a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Checks that every handler named in `prefixes` is registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first missing handler.
    pub fn validate(&self, prefixes: &PrefixTable) -> Result<()> {
        match prefixes.handler_names().into_iter().find(|name| !self.contains(name)) {
            Some(name) => Err(Error::configuration(format!(
                "handler `{name}` is referenced by the prefix table but not registered"
            ))),
            None => Ok(()),
        }
    }

    /// Invokes the handler `name` with `entity`, if registered.
    pub fn dispatch(&self, name: &str, entity: &dyn TrackedEntity) -> Option<R> {
        self.handlers.get(name).map(|handler| handler.call(entity))
    }
}

/// A request resolved to a current record and its handler.
#[derive(Debug)]
pub struct ResolvedTarget {
    /// The prefix whose type map selected the handler.
    pub prefix: String,
    /// Name of the handler for the owner's type under `prefix`.
    pub handler: String,
    /// The current record the request matched.
    pub record: PathRecord,
    /// The loaded owner of `record`.
    pub entity: Box<dyn TrackedEntity>,
}

/// Resolves `request` to a current record, its owner and a handler name.
///
/// # Errors
///
/// Returns an error if the store or an entity loader fails, or
/// [`Error::Configuration`] if the record's owner type is not registered.
pub fn resolve(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    prefixes: &PrefixTable,
    request: &str,
) -> Result<Option<ResolvedTarget>> {
    if prefixes.is_empty() {
        return Ok(None);
    }

    let path = strip_leading_slash(request);
    let all_types = prefixes.all_types();

    let mut found = None;
    for entry in prefixes.matching(path).into_iter().rev() {
        let Some(rest) = entry.strip(path) else {
            continue;
        };
        if let Some(record) = store.find_by_link(rest, &all_types, true)? {
            found = Some(record);
            break;
        }
    }
    let Some(record) = found else {
        return Ok(None);
    };

    let Some(entity) = registry.load(store.connection(), &record.owner())? else {
        log::debug!("owner {} of `{}` could not be loaded", record.owner(), record.link);
        return Ok(None);
    };

    let related_type = record.related_type.as_str();
    let Some(entry) = prefixes
        .entries()
        .iter()
        .rev()
        .find(|entry| entry.contains_type(related_type) && entry.strip(path).is_some())
    else {
        return Ok(None);
    };
    let Some(handler) = entry.handler_for(related_type) else {
        return Ok(None);
    };

    Ok(Some(ResolvedTarget {
        prefix: entry.prefix().to_string(),
        handler: handler.to_string(),
        record,
        entity,
    }))
}

/// Resolves `request` and invokes its handler.
///
/// Returns `None` when nothing matches or the selected handler is not
/// registered.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_and_dispatch<R>(
    store: &PathStore<'_>,
    registry: &EntityRegistry,
    prefixes: &PrefixTable,
    handlers: &HandlerRegistry<R>,
    request: &str,
) -> Result<Option<R>> {
    let Some(target) = resolve(store, registry, prefixes, request)? else {
        return Ok(None);
    };
    if !handlers.contains(&target.handler) {
        log::warn!(
            "no handler `{}` registered for `{}` under prefix `{}`",
            target.handler,
            target.record.link,
            target.prefix
        );
        return Ok(None);
    }
    Ok(handlers.dispatch(&target.handler, target.entity.as_ref()))
}
