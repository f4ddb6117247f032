//! Resource bundles and the cached source that resolves them.
//!
//! A [`ResourceBundle`] is the immutable content of one properties resource
//! for one (base name, locale). A [`BundleSource`] turns a [`LocaleChain`]
//! into the bundles that actually exist, most specific first, loading each
//! one at most once through a [`BundleLoader`].

mod loader;
pub mod scan;

use std::{collections::HashMap, sync::Arc};

pub use loader::{BUNDLE_EXTENSION, BundleLoader, DirectoryLoader, MemoryLoader, bundle_path};

use crate::core::{Locale, LocaleChain, once_map::OnceMap, parsers::properties::PropertyEntry};
use crate::error::{Error, Result};

/// One key with its text and the line it was defined on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub key: String,
    pub text: String,
    /// Line number (1-indexed) of the definition that won.
    pub line: usize,
}

/// A key defined more than once in the same bundle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Line of the earlier definition (ignored).
    pub first_line: usize,
    /// Line of the later definition (used).
    pub line: usize,
}

/// Immutable key→text mapping loaded from one locale-specific resource.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    base_name: String,
    locale: Locale,
    /// Where the bundle came from (file path or a label), for reporting.
    origin: String,
    entries: Vec<BundleEntry>,
    index: HashMap<String, usize>,
    duplicate_keys: Vec<DuplicateKey>,
}

impl ResourceBundle {
    /// Builds a bundle from parsed entries. For repeated keys the last
    /// definition wins and the repetition is recorded.
    pub fn from_entries(
        base_name: impl Into<String>,
        locale: Locale,
        origin: impl Into<String>,
        parsed: Vec<PropertyEntry>,
    ) -> Self {
        let mut entries: Vec<BundleEntry> = Vec::with_capacity(parsed.len());
        let mut index = HashMap::with_capacity(parsed.len());
        let mut duplicate_keys = Vec::new();

        for PropertyEntry { key, value, line } in parsed {
            if let Some(&pos) = index.get(&key) {
                let existing: &mut BundleEntry = &mut entries[pos];
                duplicate_keys.push(DuplicateKey {
                    key: key.clone(),
                    first_line: existing.line,
                    line,
                });
                existing.text = value;
                existing.line = line;
            } else {
                index.insert(key.clone(), entries.len());
                entries.push(BundleEntry {
                    key,
                    text: value,
                    line,
                });
            }
        }

        Self {
            base_name: base_name.into(),
            locale,
            origin: origin.into(),
            entries,
            index,
            duplicate_keys,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|e| e.text.as_str())
    }

    pub fn entry(&self, key: &str) -> Option<&BundleEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Lazily yields `(key, text)` in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.text.as_str()))
    }

    pub fn bundle_entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn duplicate_keys(&self) -> &[DuplicateKey] {
        &self.duplicate_keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type BundleKey = (String, Locale);

/// Resolves locale chains to loaded bundles, caching every load result.
///
/// "No resource for this locale" is cached as well, so a chain is probed on
/// disk at most once per (base name, locale) for the life of the source.
pub struct BundleSource {
    loader: Box<dyn BundleLoader>,
    cache: OnceMap<BundleKey, Option<Arc<ResourceBundle>>>,
}

impl BundleSource {
    pub fn new(loader: impl BundleLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cache: OnceMap::new(),
        }
    }

    /// Loads (or fetches from cache) the bundle for a single locale.
    pub fn bundle(&self, base_name: &str, locale: &Locale) -> Result<Option<Arc<ResourceBundle>>> {
        self.cache
            .get_or_try_init((base_name.to_string(), locale.clone()), || {
                let bundle = self.loader.load(base_name, locale)?;
                match &bundle {
                    Some(bundle) => {
                        tracing::debug!(
                            base_name,
                            locale = %locale,
                            origin = bundle.origin(),
                            entries = bundle.len(),
                            "loaded resource bundle"
                        );
                        for dup in bundle.duplicate_keys() {
                            tracing::warn!(
                                origin = bundle.origin(),
                                key = %dup.key,
                                first_line = dup.first_line,
                                line = dup.line,
                                "duplicate key in resource bundle, last definition wins"
                            );
                        }
                    }
                    None => {
                        tracing::debug!(base_name, locale = %locale, "no resource bundle");
                    }
                }
                Ok(bundle.map(Arc::new))
            })
    }

    /// Returns the bundles that exist for `chain`, most specific first.
    ///
    /// Fails with [`Error::BundleNotFound`] only if no locale in the chain,
    /// root included, has a resource.
    pub fn resolve(&self, base_name: &str, chain: &LocaleChain) -> Result<Vec<Arc<ResourceBundle>>> {
        let mut bundles = Vec::with_capacity(chain.len());
        for locale in chain.iter() {
            if let Some(bundle) = self.bundle(base_name, locale)? {
                bundles.push(bundle);
            }
        }

        if bundles.is_empty() {
            let searched = chain
                .iter()
                .map(|locale| self.loader.location(base_name, locale))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::BundleNotFound {
                base_name: base_name.to_string(),
                searched,
            });
        }

        Ok(bundles)
    }

    /// All bundles loaded so far.
    pub fn loaded(&self) -> Vec<Arc<ResourceBundle>> {
        self.cache.values().into_iter().flatten().collect()
    }
}
