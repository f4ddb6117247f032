use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::super::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::{
    BundleSource, DirectoryLoader, IdentifierCatalog, Locale, bundle::scan::discover_locales,
};

/// Configuration resolved for one command run: config file values with
/// command-line overrides applied.
pub struct CommandContext {
    pub cwd: PathBuf,
    pub config: Config,
    pub bundles_root: PathBuf,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&cwd)?;
        let bundles_root = match &common.bundles_root {
            Some(root) => cwd.join(root),
            None => loaded.base_dir(&cwd).join(&loaded.config.bundles_root),
        };

        match &loaded.path {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME),
        }

        Ok(Self {
            cwd,
            config: loaded.config,
            bundles_root,
        })
    }

    /// Fails when the bundle directory does not exist.
    pub fn require_bundles_root(&self) -> Result<()> {
        if !self.bundles_root.is_dir() {
            bail!(
                "Bundle directory '{}' does not exist.\nHint: set 'bundlesRoot' in {} or pass --bundles-root.",
                self.display_path(&self.bundles_root),
                CONFIG_FILE_NAME
            );
        }
        Ok(())
    }

    pub fn catalogs(&self) -> Result<Vec<IdentifierCatalog>> {
        self.config.declared_catalogs()
    }

    /// Locales to bind `catalog` for: `requested` if given, else the config
    /// file's, else every locale that has a bundle file on disk.
    pub fn locales_for(
        &self,
        catalog: &IdentifierCatalog,
        requested: &[Locale],
    ) -> Result<Vec<Locale>> {
        if !requested.is_empty() {
            return Ok(requested.to_vec());
        }
        let configured = self.config.parsed_locales()?;
        if !configured.is_empty() {
            return Ok(configured);
        }
        let discovered = discover_locales(&self.bundles_root, catalog.base_name())?;
        if discovered.is_empty() {
            // Nothing on disk: bind the root so the missing bundle is reported.
            return Ok(vec![Locale::root()]);
        }
        Ok(discovered)
    }

    pub fn bundle_source(&self) -> BundleSource {
        BundleSource::new(DirectoryLoader::new(self.bundles_root.clone()))
    }

    /// `path` relative to the working directory when it lies below it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.cwd)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Parses `--locale` values.
pub fn parse_locales(tags: &[String]) -> Result<Vec<Locale>> {
    tags.iter()
        .map(|tag| Locale::parse(tag).with_context(|| format!("Invalid --locale \"{}\"", tag)))
        .collect()
}
