//! Process-wide access to bound message tables.
//!
//! A [`MessageRegistry`] binds each catalog at most once, on first access,
//! for one locale, and then hands the same immutable table to every caller.
//! [`global`] holds the instance the generated catalog accessors use.

use std::{
    env,
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
};

use crate::core::{
    BindPolicy, BoundMessageTable, BundleLoader, BundleSource, DirectoryLoader, IdentifierCatalog,
    Locale, LocaleChain, MessageBinder, Warning,
    once_map::{OnceMap, lock},
};
use crate::error::{Error, Result};

/// Environment variable naming the bundle directory of the global registry.
pub const BUNDLES_ENV_VAR: &str = "MSGBIND_BUNDLES";

/// Bundle directory used when [`BUNDLES_ENV_VAR`] is unset.
pub const DEFAULT_BUNDLES_ROOT: &str = "./resources";

pub struct MessageRegistry {
    source: BundleSource,
    chain: LocaleChain,
    binder: MessageBinder,
    tables: OnceMap<IdentifierCatalog, Arc<BoundMessageTable>>,
    warnings: Mutex<Vec<Warning>>,
}

impl MessageRegistry {
    pub fn new(source: BundleSource, locale: &Locale) -> Self {
        Self {
            source,
            chain: LocaleChain::new(locale),
            binder: MessageBinder::default(),
            tables: OnceMap::new(),
            warnings: Mutex::new(Vec::new()),
        }
    }

    pub fn with_loader(loader: impl BundleLoader + 'static, locale: &Locale) -> Self {
        Self::new(BundleSource::new(loader), locale)
    }

    /// Registry over a bundle directory for the environment's locale.
    ///
    /// The directory comes from `MSGBIND_BUNDLES`, defaulting to
    /// `./resources`; the locale from [`Locale::from_env`].
    pub fn from_env() -> Self {
        let root = env::var_os(BUNDLES_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLES_ROOT));
        let locale = Locale::from_env();
        tracing::debug!(root = %root.display(), locale = %locale, "creating message registry from environment");
        Self::with_loader(DirectoryLoader::new(root), &locale)
    }

    pub fn with_policy(mut self, policy: BindPolicy) -> Self {
        self.binder = MessageBinder::new(policy);
        self
    }

    pub fn locale(&self) -> &Locale {
        self.chain.requested()
    }

    pub fn chain(&self) -> &LocaleChain {
        &self.chain
    }

    pub fn source(&self) -> &BundleSource {
        &self.source
    }

    /// The bound table for `catalog`, binding it on first access.
    ///
    /// Concurrent first calls for the same catalog run a single bind; the
    /// others wait for it and receive the same table. A failed bind is not
    /// cached and is retried on the next call.
    pub fn get(&self, catalog: &IdentifierCatalog) -> Result<Arc<BoundMessageTable>> {
        self.tables.get_or_try_init(catalog.clone(), || {
            let binding = self.binder.bind(catalog, &self.chain, &self.source)?;
            tracing::debug!(
                catalog = catalog.base_name(),
                locale = %self.locale(),
                warnings = binding.warnings.len(),
                "registered message table"
            );
            lock(&self.warnings).extend(binding.warnings);
            Ok(Arc::new(binding.table))
        })
    }

    /// Text for `identifier` in `catalog`.
    ///
    /// An identifier the catalog never declared fails with
    /// [`Error::UnknownIdentifier`] before any bundle is read.
    pub fn message(&self, catalog: &IdentifierCatalog, identifier: &str) -> Result<String> {
        if !catalog.contains(identifier) {
            return Err(Error::UnknownIdentifier {
                catalog: catalog.base_name().to_string(),
                identifier: identifier.to_string(),
            });
        }
        let table = self.get(catalog)?;
        table.lookup(identifier).map(str::to_string)
    }

    /// Every warning recorded by this registry's binds, in bind order.
    ///
    /// Each catalog is bound once, so each warning appears at most once per
    /// (catalog, identifier, locale).
    pub fn warnings(&self) -> Vec<Warning> {
        lock(&self.warnings).clone()
    }

    /// Tables bound so far.
    pub fn tables(&self) -> Vec<Arc<BoundMessageTable>> {
        self.tables.values()
    }
}

static GLOBAL: OnceLock<MessageRegistry> = OnceLock::new();

/// Installs the process-wide registry. Only the first call (or first use
/// of [`global`]) wins.
pub fn install(registry: MessageRegistry) -> Result<&'static MessageRegistry> {
    GLOBAL.set(registry).map_err(|_| Error::AlreadyInstalled)?;
    Ok(global())
}

/// The process-wide registry, created with [`MessageRegistry::from_env`]
/// unless one was [`install`]ed first.
pub fn global() -> &'static MessageRegistry {
    GLOBAL.get_or_init(MessageRegistry::from_env)
}
