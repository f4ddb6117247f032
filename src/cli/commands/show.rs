use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};

use super::super::args::ShowCommand;
use super::{CommandContext, CommandResult, CommandSummary, ShowSummary};
use crate::core::{BundleSource, IdentifierCatalog, Locale, LocaleChain, MessageRegistry};

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    ctx.require_bundles_root()?;

    let locale = match &cmd.locale {
        Some(tag) => {
            Locale::parse(tag).with_context(|| format!("Invalid --locale \"{}\"", tag))?
        }
        None => Locale::from_env(),
    };
    let chain = LocaleChain::new(&locale);
    let source = ctx.bundle_source();

    let configured = ctx
        .catalogs()?
        .into_iter()
        .find(|catalog| catalog.base_name() == cmd.bundle);
    let catalog = match configured {
        Some(catalog) => catalog,
        None => {
            tracing::debug!(bundle = %cmd.bundle, "bundle not in config, showing every key");
            undeclared_catalog(&source, &cmd.bundle, &chain)?
        }
    };

    let registry = MessageRegistry::new(source, &locale);
    let table = registry.get(&catalog)?;
    let origins = registry
        .source()
        .resolve(catalog.base_name(), registry.chain())?
        .iter()
        .map(|bundle| ctx.display_path(Path::new(bundle.origin())))
        .collect();

    Ok(CommandResult::new(
        CommandSummary::Show(ShowSummary { table, origins }),
        Vec::new(),
        false,
    ))
}

/// A catalog of every key the chain's bundles define, root order first.
fn undeclared_catalog(
    source: &BundleSource,
    base_name: &str,
    chain: &LocaleChain,
) -> Result<IdentifierCatalog> {
    let bundles = source.resolve(base_name, chain)?;
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for bundle in bundles.iter().rev() {
        for entry in bundle.bundle_entries() {
            if seen.insert(entry.key.as_str()) {
                keys.push(entry.key.clone());
            }
        }
    }
    Ok(IdentifierCatalog::declare(base_name, keys)?)
}
