//! Binding a catalog's identifiers to bundle text.
//!
//! For each declared identifier the binder walks the resolved bundles from
//! most to least specific and takes the first text it finds. An identifier
//! that no bundle defines is bound to a visible sentinel (`!!ID!!`) in the
//! default resilient mode, or fails the whole bind in strict mode.

use std::{collections::HashSet, fmt, sync::Arc};

use crate::core::{
    IdentifierCatalog, Locale, LocaleChain,
    bundle::{BundleSource, ResourceBundle},
};
use crate::error::{Error, Result};

/// Text substituted for an identifier no bundle defines.
pub fn sentinel(identifier: &str) -> String {
    format!("!!{}!!", identifier)
}

/// What to do when an identifier has no text in any bundle of the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindPolicy {
    /// Bind the sentinel and record a warning.
    #[default]
    Resilient,
    /// Fail the bind with [`Error::MissingTranslation`].
    Strict,
}

/// Where a bound text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOrigin {
    Bundle(Locale),
    Sentinel,
}

impl fmt::Display for TextOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextOrigin::Bundle(locale) => write!(f, "{}", locale),
            TextOrigin::Sentinel => write!(f, "missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundMessage {
    pub identifier: String,
    pub text: String,
    pub origin: TextOrigin,
}

/// Read-only identifier→text mapping for one catalog and locale chain.
///
/// Built once, then shared by reference; equality is by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundMessageTable {
    catalog: IdentifierCatalog,
    chain: LocaleChain,
    /// In catalog declaration order.
    messages: Vec<BoundMessage>,
}

impl BoundMessageTable {
    pub fn catalog(&self) -> &IdentifierCatalog {
        &self.catalog
    }

    pub fn chain(&self) -> &LocaleChain {
        &self.chain
    }

    pub fn locale(&self) -> &Locale {
        self.chain.requested()
    }

    /// Text bound to `identifier`.
    ///
    /// Fails with [`Error::UnknownIdentifier`] if the catalog never declared
    /// it, whatever the bundles contain.
    pub fn lookup(&self, identifier: &str) -> Result<&str> {
        self.message(identifier).map(|m| m.text.as_str())
    }

    pub fn message(&self, identifier: &str) -> Result<&BoundMessage> {
        self.catalog
            .position(identifier)
            .map(|pos| &self.messages[pos])
            .ok_or_else(|| Error::UnknownIdentifier {
                catalog: self.catalog.base_name().to_string(),
                identifier: identifier.to_string(),
            })
    }

    pub fn messages(&self) -> &[BoundMessage] {
        &self.messages
    }

    /// Identifiers bound to the sentinel.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|m| m.origin == TextOrigin::Sentinel)
            .map(|m| m.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Non-fatal findings from a bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No bundle in the chain defines a declared identifier.
    MissingTranslation {
        catalog: String,
        identifier: String,
        locale: Locale,
    },
    /// A bundle defines a key the catalog does not declare.
    UnusedKey {
        catalog: String,
        key: String,
        locale: Locale,
        origin: String,
        line: usize,
    },
    /// A bundle defines the same key twice; the later one is used.
    DuplicateKey {
        catalog: String,
        key: String,
        locale: Locale,
        origin: String,
        first_line: usize,
        line: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingTranslation {
                catalog,
                identifier,
                locale,
            } => write!(
                f,
                "no translation for '{}' in '{}' (locale {})",
                identifier, catalog, locale
            ),
            Warning::UnusedKey {
                key, origin, line, ..
            } => write!(f, "key '{}' is not declared ({}:{})", key, origin, line),
            Warning::DuplicateKey {
                key,
                origin,
                first_line,
                line,
                ..
            } => write!(
                f,
                "key '{}' defined at lines {} and {} of {}",
                key, first_line, line, origin
            ),
        }
    }
}

/// Result of a bind: the table plus the warnings it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub table: BoundMessageTable,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageBinder {
    policy: BindPolicy,
}

impl MessageBinder {
    pub fn new(policy: BindPolicy) -> Self {
        Self { policy }
    }

    pub fn strict() -> Self {
        Self::new(BindPolicy::Strict)
    }

    pub fn policy(&self) -> BindPolicy {
        self.policy
    }

    /// Binds every identifier in `catalog` against the bundles `source`
    /// resolves for `chain`.
    ///
    /// Iteration follows declaration order, so warnings and strict-mode
    /// errors are reported in a stable order. Calling this again with the
    /// same inputs yields an equal [`Binding`].
    pub fn bind(
        &self,
        catalog: &IdentifierCatalog,
        chain: &LocaleChain,
        source: &BundleSource,
    ) -> Result<Binding> {
        let bundles = source.resolve(catalog.base_name(), chain)?;
        let locale = chain.requested();

        let mut messages = Vec::with_capacity(catalog.len());
        let mut missing = Vec::new();
        for identifier in catalog.iter() {
            let found = bundles
                .iter()
                .find_map(|bundle| bundle.get(identifier).map(|text| (bundle, text)));
            let message = match found {
                Some((bundle, text)) => BoundMessage {
                    identifier: identifier.to_string(),
                    text: text.to_string(),
                    origin: TextOrigin::Bundle(bundle.locale().clone()),
                },
                None => {
                    missing.push(identifier.to_string());
                    BoundMessage {
                        identifier: identifier.to_string(),
                        text: sentinel(identifier),
                        origin: TextOrigin::Sentinel,
                    }
                }
            };
            messages.push(message);
        }

        if self.policy == BindPolicy::Strict && !missing.is_empty() {
            return Err(Error::MissingTranslation {
                catalog: catalog.base_name().to_string(),
                locale: locale.to_string(),
                identifiers: missing,
            });
        }

        let mut warnings = Vec::new();
        for identifier in missing {
            tracing::warn!(
                catalog = catalog.base_name(),
                identifier = %identifier,
                locale = %locale,
                "missing translation, using sentinel text"
            );
            warnings.push(Warning::MissingTranslation {
                catalog: catalog.base_name().to_string(),
                identifier,
                locale: locale.clone(),
            });
        }
        warnings.extend(bundle_warnings(catalog, &bundles));

        tracing::debug!(
            catalog = catalog.base_name(),
            chain = %chain,
            bundles = bundles.len(),
            identifiers = catalog.len(),
            "bound message catalog"
        );

        Ok(Binding {
            table: BoundMessageTable {
                catalog: catalog.clone(),
                chain: chain.clone(),
                messages,
            },
            warnings,
        })
    }
}

/// Binds with the default (resilient) policy.
pub fn bind(
    catalog: &IdentifierCatalog,
    chain: &LocaleChain,
    source: &BundleSource,
) -> Result<Binding> {
    MessageBinder::default().bind(catalog, chain, source)
}

/// Undeclared and duplicated keys in the bundles used for a bind.
fn bundle_warnings(catalog: &IdentifierCatalog, bundles: &[Arc<ResourceBundle>]) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for bundle in bundles {
        for dup in bundle.duplicate_keys() {
            warnings.push(Warning::DuplicateKey {
                catalog: catalog.base_name().to_string(),
                key: dup.key.clone(),
                locale: bundle.locale().clone(),
                origin: bundle.origin().to_string(),
                first_line: dup.first_line,
                line: dup.line,
            });
        }
        for entry in bundle.bundle_entries() {
            if catalog.contains(&entry.key) {
                continue;
            }
            // One report per (bundle, key).
            if seen.insert((bundle.origin().to_string(), entry.key.clone())) {
                warnings.push(Warning::UnusedKey {
                    catalog: catalog.base_name().to_string(),
                    key: entry.key.clone(),
                    locale: bundle.locale().clone(),
                    origin: bundle.origin().to_string(),
                    line: entry.line,
                });
            }
        }
    }
    warnings
}

/// Text for `identifier` in `table`.
pub fn lookup<'a>(table: &'a BoundMessageTable, identifier: &str) -> Result<&'a str> {
    table.lookup(identifier)
}
