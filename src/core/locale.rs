use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Environment variables consulted for the active locale, in priority order.
pub const LOCALE_ENV_VARS: &[&str] = &["MSGBIND_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<lang>[A-Za-z]{2,8})(?:[_-](?P<script>[A-Za-z]{4}))?(?:[_-](?P<region>[A-Za-z]{2}|[0-9]{3}))?(?:[_-](?P<variant>[A-Za-z0-9]{1,8}))?$",
    )
    .expect("locale pattern is valid")
});

/// A normalized locale tag.
///
/// Stored as separate parts so fallback chains can be derived by dropping
/// parts from the end. The root locale has every part empty.
///
/// # Examples
///
/// ```
/// use msgbind::core::Locale;
///
/// let locale: Locale = "fr-fr".parse().unwrap();
/// assert_eq!(locale.tag(), "fr_FR");
/// assert_eq!(Locale::parse("de_DE.UTF-8@euro").unwrap().tag(), "de_DE");
/// assert!(Locale::parse("C").unwrap().is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    script: String,
    region: String,
    variant: String,
}

impl Locale {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a locale tag as found in config files, CLI flags or POSIX
    /// locale variables.
    ///
    /// Codeset (`.UTF-8`) and modifier (`@euro`) suffixes are dropped.
    /// `C`, `POSIX` and the empty string are the root locale.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default();

        if base.is_empty() || base == "C" || base == "POSIX" {
            return Ok(Self::root());
        }

        let caps = LOCALE_RE
            .captures(base)
            .ok_or_else(|| Error::InvalidLocale(tag.to_string()))?;
        let part = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or_default();

        Ok(Self {
            language: part("lang").to_ascii_lowercase(),
            script: title_case(part("script")),
            region: part("region").to_ascii_uppercase(),
            variant: part("variant").to_string(),
        })
    }

    /// Reads the active locale from the process environment.
    ///
    /// The first variable in [`LOCALE_ENV_VARS`] that is set, non-empty and
    /// parsable wins. Falls back to the root locale.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        for name in LOCALE_ENV_VARS {
            let Some(value) = lookup(name) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            match Self::parse(&value) {
                Ok(locale) => return locale,
                Err(_) => {
                    tracing::debug!(var = name, value = %value, "ignoring unparsable locale");
                }
            }
        }
        Self::root()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        (!self.region.is_empty()).then_some(self.region.as_str())
    }

    /// The canonical `lang[_Script][_REGION][_variant]` form. Empty for root.
    pub fn tag(&self) -> String {
        [
            self.language.as_str(),
            self.script.as_str(),
            self.region.as_str(),
            self.variant.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
    }

    /// Resource file suffix for this locale: `_fr_FR` or empty for root.
    pub fn file_suffix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("_{}", self.tag())
        }
    }

    fn with_parts(language: &str, script: &str, region: &str, variant: &str) -> Self {
        Self {
            language: language.to_string(),
            script: script.to_string(),
            region: region.to_string(),
            variant: variant.to_string(),
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.tag())
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

/// Ordered fallback locales, most specific first, always ending in root.
///
/// The candidate order matches the usual resource-bundle search:
/// `lang_Script_REGION_variant`, `lang_Script_REGION`, `lang_Script`, then
/// the same again without the script, then root. Duplicates are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleChain {
    locales: Vec<Locale>,
}

impl LocaleChain {
    pub fn new(locale: &Locale) -> Self {
        let Locale {
            language: l,
            script: s,
            region: r,
            variant: v,
        } = locale;

        let mut candidates = Vec::new();
        if !locale.is_root() {
            if !s.is_empty() {
                candidates.push(Locale::with_parts(l, s, r, v));
                candidates.push(Locale::with_parts(l, s, r, ""));
                candidates.push(Locale::with_parts(l, s, "", ""));
            }
            candidates.push(Locale::with_parts(l, "", r, v));
            candidates.push(Locale::with_parts(l, "", r, ""));
            candidates.push(Locale::with_parts(l, "", "", ""));
        }
        candidates.push(Locale::root());

        let mut locales: Vec<Locale> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !locales.contains(&candidate) {
                locales.push(candidate);
            }
        }

        Self { locales }
    }

    /// The locale the chain was derived from.
    pub fn requested(&self) -> &Locale {
        &self.locales[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl From<&Locale> for LocaleChain {
    fn from(locale: &Locale) -> Self {
        Self::new(locale)
    }
}

impl fmt::Display for LocaleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, locale) in self.locales.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", locale)?;
        }
        Ok(())
    }
}
