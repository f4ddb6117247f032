//! Error types for catalog declaration, bundle loading and lookup.
//!
//! Errors that point at a programmer or configuration mistake (duplicate or
//! unknown identifiers, missing bundles) are returned as [`Error`]. A missing
//! translation is *not* an error unless the binder runs in strict mode; the
//! resilient path records a [`Warning`](crate::core::Warning) instead.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The same identifier was declared twice in one catalog.
    #[error("identifier '{identifier}' is declared more than once in catalog '{catalog}'")]
    DuplicateIdentifier { catalog: String, identifier: String },

    /// An empty identifier.
    #[error("invalid identifier {identifier:?} in catalog '{catalog}'")]
    InvalidIdentifier { catalog: String, identifier: String },

    /// No locale in the chain, root included, has a backing resource.
    #[error("no resource bundle found for '{base_name}' (searched: {searched})")]
    BundleNotFound { base_name: String, searched: String },

    /// Strict binding found identifiers with no text in any bundle.
    #[error(
        "catalog '{catalog}' has no translation for {} identifier(s) in locale '{locale}': {}",
        identifiers.len(),
        identifiers.join(", ")
    )]
    MissingTranslation {
        catalog: String,
        locale: String,
        identifiers: Vec<String>,
    },

    /// Lookup of an identifier the catalog never declared.
    #[error("identifier '{identifier}' is not declared in catalog '{catalog}'")]
    UnknownIdentifier { catalog: String, identifier: String },

    #[error("invalid bundle base name {0:?}")]
    InvalidBaseName(String),

    #[error("invalid locale tag {0:?}")]
    InvalidLocale(String),

    #[error("failed to read resource bundle {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed resource bundle {origin}, line {line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("a process-wide message registry is already installed")]
    AlreadyInstalled,
}

impl Error {
    /// True for errors caused by translation data rather than by code.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::MissingTranslation { .. } | Error::Parse { .. } | Error::Io { .. }
        )
    }
}
