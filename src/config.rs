use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{IdentifierCatalog, Locale};

pub const CONFIG_FILE_NAME: &str = ".msgbindrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_bundles_root", alias = "bundlesDir")]
    pub bundles_root: String,
    /// Locales to check. Empty means every locale found on disk.
    #[serde(default)]
    pub locales: Vec<String>,
    /// Treat missing translations as errors.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub catalogs: Vec<CatalogConfig>,
}

/// A catalog declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Bundle base name, e.g. `com.dynamo.bob.pipeline.messages`.
    pub bundle: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
}

fn default_bundles_root() -> String {
    "./resources".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundles_root: default_bundles_root(),
            locales: Vec::new(),
            strict: false,
            catalogs: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for unparsable locales, invalid or duplicated
    /// identifiers, and bundles declared by more than one catalog.
    pub fn validate(&self) -> Result<()> {
        self.parsed_locales()?;
        self.declared_catalogs()?;
        Ok(())
    }

    pub fn parsed_locales(&self) -> Result<Vec<Locale>> {
        self.locales
            .iter()
            .map(|tag| {
                Locale::parse(tag)
                    .with_context(|| format!("Invalid locale in 'locales': \"{}\"", tag))
            })
            .collect()
    }

    pub fn declared_catalogs(&self) -> Result<Vec<IdentifierCatalog>> {
        let mut seen = HashSet::new();
        let mut catalogs = Vec::with_capacity(self.catalogs.len());
        for entry in &self.catalogs {
            if !seen.insert(entry.bundle.as_str()) {
                bail!(
                    "Bundle \"{}\" is declared by more than one catalog in 'catalogs'",
                    entry.bundle
                );
            }
            let catalog = IdentifierCatalog::declare(&entry.bundle, entry.identifiers.iter().cloned())
                .with_context(|| format!("Invalid catalog \"{}\" in 'catalogs'", entry.bundle))?;
            catalogs.push(catalog);
        }
        Ok(catalogs)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory relative paths in the config resolve against.
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
