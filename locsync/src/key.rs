//! The key model: clear keys derived from source paths and the numbered
//! full keys stored in resource files.

use serde::Serialize;

use crate::error::Error;

/// A key naming one source file's group of localizable strings, derived
/// from the file's project-relative path (`Views/Home.swift` → `Views.Home`).
pub type ClearKey = String;

/// A fully qualified resource key: clear key plus numbered suffix.
///
/// Renders as `<clearKey>.<localizedPrefix>_<number>`. Ordering is by
/// clear key first, then number, which is also the canonical output order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FullKey {
    pub clear_key: ClearKey,
    pub number: u32,
}

impl FullKey {
    pub fn new(clear_key: impl Into<ClearKey>, number: u32) -> Self {
        FullKey {
            clear_key: clear_key.into(),
            number,
        }
    }

    /// The textual form stored in resource files and referenced from source.
    pub fn text(&self, localized_prefix: &str) -> String {
        make_full_key(&self.clear_key, localized_prefix, self.number)
    }
}

/// Builds the textual full key `<clearKey>.<localizedPrefix>_<number>`.
pub fn make_full_key(clear_key: &str, localized_prefix: &str, number: u32) -> String {
    format!("{}.{}_{}", clear_key, localized_prefix, number)
}

/// Derives the clear key for a project-relative source path.
///
/// The leading separator is stripped, the remaining separators become `.`,
/// and the source extension is removed. Fails if the path does not end in
/// the recognized source extension or has an empty stem.
pub fn derive_clear_key(relative_path: &str, source_extension: &str) -> Result<ClearKey, Error> {
    let trimmed = relative_path.trim_start_matches('/');
    let suffix = format!(".{}", source_extension);
    let stem = trimmed
        .strip_suffix(suffix.as_str())
        .ok_or_else(|| Error::InvalidSourcePath(relative_path.to_string()))?;
    if stem.is_empty() {
        return Err(Error::InvalidSourcePath(relative_path.to_string()));
    }
    Ok(stem.replace('/', "."))
}
