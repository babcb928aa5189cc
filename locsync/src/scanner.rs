//! The source scanner: discovers marked literals in project source files
//! and rewrites them into resolved key references.
//!
//! Both passes classify lines the same way. A single line may contain
//! several literals; extraction repeats against the remaining tail of the
//! line, bounded by [`EXTRACTION_RETRY_CEILING`] so a pathological pattern
//! surfaces as a fatal error instead of an infinite loop.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::{
    config::Config,
    error::Error,
    key::{ClearKey, derive_clear_key},
    patterns::Patterns,
    store::{LocaleFolder, LocaleStore},
    translate::Translator,
    walk,
};

/// Upper bound on extraction attempts per line.
pub const EXTRACTION_RETRY_CEILING: usize = 15;

pub struct SourceScanner<'a> {
    config: &'a Config,
    patterns: &'a Patterns,
}

impl<'a> SourceScanner<'a> {
    pub fn new(config: &'a Config, patterns: &'a Patterns) -> Self {
        SourceScanner { config, patterns }
    }

    /// Discovery pass: feeds every marked literal into the store. Returns
    /// the number of literal occurrences found (before deduplication).
    pub fn discover(
        &self,
        project: &Path,
        store: &mut LocaleStore,
        translator: &dyn Translator,
    ) -> Result<usize, Error> {
        let mut occurrences = 0;
        for path in walk::files_with_extension(project, &self.config.source_extension)? {
            let relative = walk::relative_path(project, &path);
            let clear_key = derive_clear_key(&relative, &self.config.source_extension)?;
            let content = walk::read_to_string(&path)?;
            for line in content.lines() {
                for value in self.extract_values(line, &path)? {
                    store.add_discovered(&clear_key, &value, self.config, translator);
                    occurrences += 1;
                }
            }
        }
        Ok(occurrences)
    }

    /// Rewrite pass: replaces each marked literal with a reference to its
    /// assigned key, resolved against the default-language folder. A file
    /// is only written once every literal in it resolved; on a failed
    /// lookup the file is left untouched on disk and the run halts.
    pub fn rewrite(&self, project: &Path, folder: &LocaleFolder) -> Result<usize, Error> {
        let mut replaced_total = 0;
        for path in walk::files_with_extension(project, &self.config.source_extension)? {
            let relative = walk::relative_path(project, &path);
            let clear_key = derive_clear_key(&relative, &self.config.source_extension)?;
            let content = walk::read_to_string(&path)?;

            let mut out = String::with_capacity(content.len());
            let mut replaced = 0;
            for line in content.lines() {
                let mut buf = line.to_string();
                let mut attempts = 0;
                while let Some((range, value)) = self.patterns.find_localize_call(&buf, 0) {
                    attempts += 1;
                    if attempts > EXTRACTION_RETRY_CEILING {
                        return Err(Error::RetryCeilingExceeded {
                            path: path.clone(),
                            line: line.to_string(),
                        });
                    }
                    let entry = folder.lookup(&clear_key, &value).ok_or_else(|| {
                        Error::UnresolvedValue {
                            path: path.clone(),
                            value: value.clone(),
                        }
                    })?;
                    let replacement = format!(
                        "\"{}\".{}",
                        entry.full_key(&self.config.localized_prefix),
                        self.config.method_prefix
                    );
                    buf.replace_range(range, &replacement);
                    replaced += 1;
                }
                out.push_str(&buf);
                out.push('\n');
            }

            if replaced > 0 {
                walk::write_file(&path, &out)?;
                replaced_total += replaced;
            }
        }
        Ok(replaced_total)
    }

    /// Every full key referenced from source files, in textual form.
    pub fn referenced_keys(&self, project: &Path) -> Result<HashSet<String>, Error> {
        let mut referenced = HashSet::new();
        for path in walk::files_with_extension(project, &self.config.source_extension)? {
            let content = walk::read_to_string(&path)?;
            for line in content.lines() {
                for key in self.patterns.any_keyrefs(line) {
                    referenced.insert(key.text(&self.config.localized_prefix));
                }
            }
        }
        Ok(referenced)
    }

    /// Detects clear keys referenced from a file whose path now implies a
    /// different clear key, i.e. the file was moved or renamed since its
    /// keys were assigned.
    pub fn rename_map(&self, project: &Path) -> Result<BTreeMap<ClearKey, ClearKey>, Error> {
        let mut renames = BTreeMap::new();
        for path in walk::files_with_extension(project, &self.config.source_extension)? {
            let relative = walk::relative_path(project, &path);
            let current = derive_clear_key(&relative, &self.config.source_extension)?;
            let content = walk::read_to_string(&path)?;
            for line in content.lines() {
                for key in self.patterns.keyref_calls(line) {
                    if key.clear_key != current {
                        renames.insert(key.clear_key, current.clone());
                    }
                }
            }
        }
        Ok(renames)
    }

    /// Rewrites renamed key references in source files, preserving each
    /// reference's number. Returns the count of files updated.
    pub fn apply_renames(
        &self,
        project: &Path,
        renames: &BTreeMap<ClearKey, ClearKey>,
    ) -> Result<usize, Error> {
        if renames.is_empty() {
            return Ok(0);
        }
        let prefix = &self.config.localized_prefix;
        let mut updated_files = 0;
        for path in walk::files_with_extension(project, &self.config.source_extension)? {
            let content = walk::read_to_string(&path)?;
            let mut updated = content.clone();
            for (from, to) in renames {
                updated = updated.replace(
                    &self.patterns.quoted_key_prefix(from, prefix),
                    &self.patterns.quoted_key_prefix(to, prefix),
                );
            }
            if updated != content {
                walk::write_file(&path, &updated)?;
                updated_files += 1;
            }
        }
        Ok(updated_files)
    }

    fn extract_values(&self, line: &str, path: &Path) -> Result<Vec<String>, Error> {
        let mut values = Vec::new();
        let mut start = 0;
        let mut attempts = 0;
        while let Some((range, value)) = self.patterns.find_localize_call(line, start) {
            attempts += 1;
            if attempts > EXTRACTION_RETRY_CEILING {
                return Err(Error::RetryCeilingExceeded {
                    path: path.to_path_buf(),
                    line: line.to_string(),
                });
            }
            start = range.end;
            values.push(value);
        }
        Ok(values)
    }
}
