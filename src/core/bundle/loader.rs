use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::core::{
    Locale,
    bundle::ResourceBundle,
    catalog::validate_base_name,
    parsers::properties::{parse_properties, parse_properties_file},
};
use crate::error::Result;

/// File extension of bundle resources.
pub const BUNDLE_EXTENSION: &str = "properties";

/// Locates and reads the resource for one (base name, locale).
///
/// Implementations do the raw I/O only; caching and fallback live in
/// [`BundleSource`](super::BundleSource).
pub trait BundleLoader: Send + Sync {
    /// Returns `Ok(None)` when there is no resource for this locale.
    fn load(&self, base_name: &str, locale: &Locale) -> Result<Option<ResourceBundle>>;

    /// Human-readable location of the resource, used in "not found" errors.
    fn location(&self, base_name: &str, locale: &Locale) -> String {
        format!("{}{}", base_name, locale.file_suffix())
    }
}

/// Loads bundles from a directory tree laid out by base name.
///
/// `com.example.messages` + `fr_FR` is read from
/// `<root>/com/example/messages_fr_FR.properties`; the root locale reads
/// `<root>/com/example/messages.properties`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, base_name: &str, locale: &Locale) -> PathBuf {
        bundle_path(&self.root, base_name, locale)
    }
}

/// Path of the resource for `base_name` and `locale` under `root`.
///
/// `base_name` must already have passed [`validate_base_name`]; otherwise
/// the path may point outside `root`.
pub fn bundle_path(root: &Path, base_name: &str, locale: &Locale) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut segments = base_name.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!(
                "{}{}.{}",
                segment,
                locale.file_suffix(),
                BUNDLE_EXTENSION
            ));
        }
    }
    path
}

impl BundleLoader for DirectoryLoader {
    fn load(&self, base_name: &str, locale: &Locale) -> Result<Option<ResourceBundle>> {
        validate_base_name(base_name)?;
        let path = self.path_for(base_name, locale);
        if !path.is_file() {
            return Ok(None);
        }
        let entries = parse_properties_file(&path)?;
        Ok(Some(ResourceBundle::from_entries(
            base_name,
            locale.clone(),
            path.to_string_lossy(),
            entries,
        )))
    }

    fn location(&self, base_name: &str, locale: &Locale) -> String {
        self.path_for(base_name, locale).display().to_string()
    }
}

/// In-process bundles, e.g. embedded with `include_str!`.
///
/// Content is parsed on load, so malformed text surfaces at first access
/// just as it would for a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    bundles: HashMap<(String, Locale), String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(
        mut self,
        base_name: impl Into<String>,
        locale: Locale,
        content: impl Into<String>,
    ) -> Self {
        self.insert(base_name, locale, content);
        self
    }

    pub fn insert(&mut self, base_name: impl Into<String>, locale: Locale, content: impl Into<String>) {
        self.bundles
            .insert((base_name.into(), locale), content.into());
    }
}

impl BundleLoader for MemoryLoader {
    fn load(&self, base_name: &str, locale: &Locale) -> Result<Option<ResourceBundle>> {
        let Some(content) = self.bundles.get(&(base_name.to_string(), locale.clone())) else {
            return Ok(None);
        };
        let origin = self.location(base_name, locale);
        let entries = parse_properties(content, &origin)?;
        Ok(Some(ResourceBundle::from_entries(
            base_name,
            locale.clone(),
            origin,
            entries,
        )))
    }
}
