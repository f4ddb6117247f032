//! Loading, binding and lookup of localized message catalogs.
//!
//! Leaves first:
//! - [`locale`]: locale tags and fallback chains
//! - [`parsers`]: the properties reader
//! - [`bundle`]: resource bundles, loaders and the caching [`BundleSource`]
//! - [`catalog`]: declared identifier sets
//! - [`binder`]: catalog + chain + source -> [`BoundMessageTable`]
//! - [`registry`]: lazily bound, process-wide tables
//! - [`format`]: `{0}` argument substitution for bound text

pub mod binder;
pub mod bundle;
pub mod catalog;
pub mod format;
pub mod locale;
mod once_map;
pub mod parsers;
pub mod registry;

pub use binder::{
    BindPolicy, Binding, BoundMessage, BoundMessageTable, MessageBinder, TextOrigin, Warning,
    bind, lookup, sentinel,
};
pub use bundle::{
    BundleEntry, BundleLoader, BundleSource, DirectoryLoader, DuplicateKey, MemoryLoader,
    ResourceBundle,
};
pub use catalog::IdentifierCatalog;
pub use format::format_message;
pub use locale::{Locale, LocaleChain};
pub use registry::MessageRegistry;
