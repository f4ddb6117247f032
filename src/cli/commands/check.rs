use std::{collections::HashSet, path::Path};

use anyhow::{Result, bail};
use clap::ValueEnum;
use rayon::prelude::*;

use super::super::args::CheckCommand;
use super::{
    CheckSummary, CommandContext, CommandResult, CommandSummary, context::parse_locales,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    BundleSource, IdentifierCatalog, Locale, LocaleChain, MessageBinder, Warning,
    bundle::{
        bundle_path,
        scan::{bundle_locale, find_bundle_files},
    },
};
use crate::error::Error;
use crate::issues::{
    BundleErrorIssue, DuplicateKeyIssue, Issue, MissingTranslationIssue, OrphanBundleIssue,
    Report, ReportLocation, UnusedKeyIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Missing,
    Unused,
    Duplicate,
    Orphan,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Missing,
            CheckRule::Unused,
            CheckRule::Duplicate,
            CheckRule::Orphan,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    ctx.require_bundles_root()?;

    let catalogs = ctx.catalogs()?;
    if catalogs.is_empty() {
        bail!(
            "No catalogs configured.\nHint: declare them under 'catalogs' in {} (run `msgbind init` to create one).",
            CONFIG_FILE_NAME
        );
    }

    let requested = parse_locales(&cmd.locales)?;
    let rules: HashSet<CheckRule> = if cmd.checks.is_empty() {
        CheckRule::all().into_iter().collect()
    } else {
        cmd.checks.iter().copied().collect()
    };
    let strict = cmd.strict || ctx.config.strict;

    let mut jobs = Vec::new();
    for catalog in &catalogs {
        for locale in ctx.locales_for(catalog, &requested)? {
            jobs.push((catalog, locale));
        }
    }

    let source = ctx.bundle_source();
    let checker = Checker {
        ctx: &ctx,
        source: &source,
        rules: &rules,
        strict,
    };
    let mut issues: Vec<Issue> = jobs
        .par_iter()
        .flat_map_iter(|(catalog, locale)| checker.check_bind(catalog, locale))
        .collect();

    // Bundles shared by several chains (the root above all) report once.
    let mut seen = HashSet::new();
    issues.retain(|issue| seen.insert((issue.sort_key(), issue.details())));

    if rules.contains(&CheckRule::Orphan) {
        issues.extend(orphan_issues(&ctx, &catalogs)?);
    }

    let summary = CheckSummary {
        catalogs_checked: catalogs.len(),
        binds_checked: jobs.len(),
        bundle_files_checked: source.loaded().len(),
    };
    Ok(CommandResult::new(
        CommandSummary::Check(summary),
        issues,
        strict,
    ))
}

struct Checker<'a> {
    ctx: &'a CommandContext,
    source: &'a BundleSource,
    rules: &'a HashSet<CheckRule>,
    strict: bool,
}

impl Checker<'_> {
    /// Binds one catalog for one locale and turns the outcome into issues.
    fn check_bind(&self, catalog: &IdentifierCatalog, locale: &Locale) -> Vec<Issue> {
        let chain = LocaleChain::new(locale);
        tracing::debug!(catalog = catalog.base_name(), chain = %chain, "checking catalog");

        // Always bind resiliently so every missing identifier is listed.
        let binding = match MessageBinder::default().bind(catalog, &chain, self.source) {
            Ok(binding) => binding,
            Err(err) => return vec![self.bundle_error(catalog, locale, &chain, err)],
        };

        // The bind above succeeded, so the chain resolves from cache.
        let target = self
            .source
            .resolve(catalog.base_name(), &chain)
            .ok()
            .and_then(|bundles| bundles.first().map(|b| b.origin().to_string()))
            .unwrap_or_default();

        binding
            .warnings
            .into_iter()
            .filter_map(|warning| self.warning_issue(warning, &chain, &target))
            .collect()
    }

    fn warning_issue(&self, warning: Warning, chain: &LocaleChain, target: &str) -> Option<Issue> {
        match warning {
            Warning::MissingTranslation {
                catalog,
                identifier,
                ..
            } if self.rules.contains(&CheckRule::Missing) => {
                Some(Issue::MissingTranslation(MissingTranslationIssue {
                    location: ReportLocation::file(self.display(target)),
                    catalog,
                    identifier,
                    chain: chain.clone(),
                    strict: self.strict,
                }))
            }
            Warning::UnusedKey {
                catalog,
                key,
                origin,
                line,
                ..
            } if self.rules.contains(&CheckRule::Unused) => {
                Some(Issue::UnusedKey(UnusedKeyIssue {
                    location: ReportLocation::with_line(self.display(&origin), line),
                    catalog,
                    key,
                }))
            }
            Warning::DuplicateKey {
                key,
                origin,
                first_line,
                line,
                ..
            } if self.rules.contains(&CheckRule::Duplicate) => {
                Some(Issue::DuplicateKey(DuplicateKeyIssue {
                    location: ReportLocation::with_line(self.display(&origin), line),
                    key,
                    first_line,
                }))
            }
            _ => None,
        }
    }

    fn bundle_error(
        &self,
        catalog: &IdentifierCatalog,
        locale: &Locale,
        chain: &LocaleChain,
        err: Error,
    ) -> Issue {
        let (location, error) = match err {
            Error::BundleNotFound { .. } => {
                let expected = bundle_path(&self.ctx.bundles_root, catalog.base_name(), locale);
                (
                    ReportLocation::file(self.ctx.display_path(&expected)),
                    format!("no resource bundle for {}", chain),
                )
            }
            Error::Parse {
                origin,
                line,
                message,
            } => (ReportLocation::with_line(self.display(&origin), line), message),
            Error::Io { path, source } => (
                ReportLocation::file(self.ctx.display_path(&path)),
                format!("failed to read bundle: {}", source),
            ),
            other => (
                ReportLocation::file(self.ctx.display_path(&self.ctx.bundles_root)),
                other.to_string(),
            ),
        };
        Issue::BundleError(BundleErrorIssue {
            location,
            catalog: catalog.base_name().to_string(),
            error,
        })
    }

    fn display(&self, origin: &str) -> String {
        self.ctx.display_path(Path::new(origin))
    }
}

/// Bundle files under the root that no configured catalog reads.
fn orphan_issues(ctx: &CommandContext, catalogs: &[IdentifierCatalog]) -> Result<Vec<Issue>> {
    let files = find_bundle_files(&ctx.bundles_root)?;
    Ok(files
        .iter()
        .filter(|path| {
            !catalogs
                .iter()
                .any(|catalog| bundle_locale(&ctx.bundles_root, catalog.base_name(), path).is_some())
        })
        .map(|path| {
            Issue::OrphanBundle(OrphanBundleIssue {
                location: ReportLocation::file(ctx.display_path(path)),
            })
        })
        .collect())
}
