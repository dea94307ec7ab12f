#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathhist
//!
//! A library for versioned hierarchical URL paths.
//!
//! Entities whose slug or parent changes get a new path record each time;
//! older records are kept so stale links can be redirected, and current
//! links are dispatched to the handler configured for the entity's type.
//!
//! ## Core Types
//!
//! - [`PathRecord`] and [`RelatedRef`]: stored paths and the owners they point at
//! - [`TrackedEntity`] and [`Sluggable`]: capabilities callers implement
//! - [`EntityRegistry`]: loaders and descendant retrievers by type tag
//! - [`PathHistory`]: lifecycle hooks and request-side entry points
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathhist::slug::slugify;
//! use pathhist::{DirtyAttributes, RelatedRef};
//!
//! assert_eq!(slugify("First Category"), "first-category");
//!
//! let mut dirty = DirtyAttributes::new();
//! dirty.compare("slug", "testing", "new-one");
//! assert!(dirty.contains("slug"));
//!
//! assert_eq!(RelatedRef::new("product", 3).to_string(), "product#3");
//! ```

pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod generator;
pub mod history;
pub mod logging;
pub mod output;
pub mod record;
pub mod redirect;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod slug;

#[cfg(test)]
mod fixtures;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, PrefixTable};
pub use database::{Database, DatabaseConfig, PathStore};
pub use entity::{DirtyAttributes, ParentRelation, RelatedRef, TrackedEntity};
pub use error::{Error, Result};
pub use generator::{CascadePolicy, GenerationContext};
pub use logging::{init_logger, LogLevel, Logger};
pub use record::PathRecord;
pub use redirect::Redirect;
pub use registry::{DescendantsRetriever, EntityRegistry, EntityType};
pub use resolver::{HandlerRegistry, ResolvedTarget, ShowHandler};
pub use service::{DeleteMode, PathHistory};
pub use slug::Sluggable;
