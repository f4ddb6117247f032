//! Discovery of bundle files on disk.

use std::{
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::core::{
    Locale,
    bundle::{BUNDLE_EXTENSION, bundle_path},
};
use crate::error::{Error, Result};

/// Every `.properties` file under `root`, sorted by path.
pub fn find_bundle_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(BUNDLE_EXTENSION)
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// The locale `path` holds for `base_name`, or `None` if the file belongs
/// to some other bundle.
///
/// Examples for base name `app.messages` under root `/res`:
/// - `/res/app/messages.properties` -> root
/// - `/res/app/messages_fr_FR.properties` -> `fr_FR`
/// - `/res/app/messages_extra.properties` -> `None` if `extra` is not a locale
/// - `/res/app/other.properties` -> `None`
pub fn bundle_locale(root: &Path, base_name: &str, path: &Path) -> Option<Locale> {
    let root_path = bundle_path(root, base_name, &Locale::root());
    if path.parent() != root_path.parent() {
        return None;
    }
    if path.extension().and_then(|e| e.to_str()) != Some(BUNDLE_EXTENSION) {
        return None;
    }

    let stem = root_path.file_stem()?.to_str()?;
    let file_stem = path.file_stem()?.to_str()?;
    if file_stem == stem {
        return Some(Locale::root());
    }
    let tag = file_stem.strip_prefix(stem)?.strip_prefix('_')?;
    Locale::parse(tag).ok().filter(|locale| !locale.is_root())
}

/// Locales that have a resource for `base_name`, sorted, root first.
pub fn discover_locales(root: &Path, base_name: &str) -> Result<Vec<Locale>> {
    let root_path = bundle_path(root, base_name, &Locale::root());
    let Some(dir) = root_path.parent().filter(|dir| dir.is_dir()) else {
        return Ok(Vec::new());
    };

    let mut locales = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_file()
            && let Some(locale) = bundle_locale(root, base_name, entry.path())
        {
            locales.push(locale);
        }
    }
    locales.sort();
    Ok(locales)
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    Error::Io {
        path,
        source: io::Error::from(err),
    }
}
