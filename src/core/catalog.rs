use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::error::{Error, Result};

/// The fixed set of message identifiers one module declares, together with
/// the bundle base name they are bound against.
///
/// Cheap to clone; equality and hashing are by value (base name plus the
/// identifiers in declaration order), so two equal declarations are the same
/// catalog as far as the registry is concerned.
#[derive(Debug, Clone)]
pub struct IdentifierCatalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    base_name: String,
    identifiers: Vec<String>,
    positions: HashMap<String, usize>,
}

impl IdentifierCatalog {
    /// Declares a catalog.
    ///
    /// Fails fast, before any bundle is touched, if a name is empty or
    /// declared twice. Any other key a properties file can hold is accepted,
    /// escaped whitespace and separators included.
    ///
    /// ```
    /// use msgbind::core::IdentifierCatalog;
    ///
    /// let catalog = IdentifierCatalog::declare(
    ///     "com.dynamo.bob.pipeline.messages",
    ///     ["GuiBuilder_MISSING_TEXTURE", "GuiBuilder_MISSING_FONT"],
    /// )
    /// .unwrap();
    /// assert!(catalog.contains("GuiBuilder_MISSING_FONT"));
    ///
    /// let err = IdentifierCatalog::declare("m", ["X", "X"]).unwrap_err();
    /// assert!(err.to_string().contains("more than once"));
    /// ```
    pub fn declare<I, S>(base_name: impl Into<String>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_name = base_name.into();
        validate_base_name(&base_name)?;

        let mut identifiers = Vec::new();
        let mut positions = HashMap::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::InvalidIdentifier {
                    catalog: base_name,
                    identifier: name,
                });
            }
            if positions.contains_key(&name) {
                return Err(Error::DuplicateIdentifier {
                    catalog: base_name,
                    identifier: name,
                });
            }
            positions.insert(name.clone(), identifiers.len());
            identifiers.push(name);
        }

        Ok(Self {
            inner: Arc::new(CatalogInner {
                base_name,
                identifiers,
                positions,
            }),
        })
    }

    pub fn base_name(&self) -> &str {
        &self.inner.base_name
    }

    /// Identifiers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.identifiers.iter().map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.positions.contains_key(identifier)
    }

    pub(crate) fn position(&self, identifier: &str) -> Option<usize> {
        self.inner.positions.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.identifiers.is_empty()
    }
}

/// Checks that `base_name` is a dotted name whose segments map to plain
/// path components.
pub fn validate_base_name(base_name: &str) -> Result<()> {
    let valid = !base_name.is_empty()
        && base_name.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidBaseName(base_name.to_string()))
    }
}

impl PartialEq for IdentifierCatalog {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.base_name == other.inner.base_name
                && self.inner.identifiers == other.inner.identifiers)
    }
}

impl Eq for IdentifierCatalog {}

impl Hash for IdentifierCatalog {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.base_name.hash(state);
        self.inner.identifiers.hash(state);
    }
}
