//! The synchronization pipeline and cross-locale validation.
//!
//! One run is a linear pipeline with no backtracking once a stage commits:
//! load existing resources, discover new literals, merge, check cross-locale
//! consistency, write resources, rewrite sources, then the optional
//! maintenance stages (prune unused keys, propagate renames). The
//! consistency check runs over the key sets as loaded from disk and always
//! precedes the first write.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use crate::{
    config::Config,
    error::{DivergenceDiff, Error},
    patterns::Patterns,
    scanner::SourceScanner,
    store::{LocaleFolder, LocaleStore},
    strings_file,
    translate::Translator,
    walk,
};

/// Outcome of a full synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Literal occurrences found in source (before deduplication).
    pub occurrences: usize,
    /// Resource files written.
    pub files_written: usize,
    /// Call sites rewritten to key references.
    pub rewritten: usize,
}

/// Outcome of a validation (maintenance) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateReport {
    /// Resource entries deleted because no source file references them.
    pub pruned: usize,
    /// Clear keys remapped to a renamed source path.
    pub renamed: usize,
    /// Source files rewritten during rename propagation.
    pub source_files_updated: usize,
    /// Resource files written.
    pub files_written: usize,
}

/// Owns one run's configuration, compiled patterns, and translator.
pub struct Synchronizer<'a> {
    config: &'a Config,
    patterns: Patterns,
    translator: &'a dyn Translator,
}

impl<'a> Synchronizer<'a> {
    pub fn new(config: &'a Config, translator: &'a dyn Translator) -> Result<Self, Error> {
        Ok(Synchronizer {
            config,
            patterns: Patterns::new(config)?,
            translator,
        })
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// Loads every locale folder under `localization` into a store.
    pub fn load_store(&self, localization: &Path) -> Result<LocaleStore, Error> {
        let mut store = LocaleStore::new();
        let folders = walk::locale_folders(
            localization,
            &self.config.locale_folder_extension,
            &self.config.resource_extension,
        )?;
        for (folder_path, files) in folders {
            let mut folder =
                LocaleFolder::from_path(folder_path, &self.config.locale_folder_extension)?;
            for path in files {
                folder.add_file(strings_file::read_resource_file(&path, &self.patterns)?);
            }
            store.add_folder(folder);
        }
        Ok(store)
    }

    /// Verifies that every locale exposes the identical full-key set,
    /// failing with the complete per-file difference otherwise.
    pub fn check_consistency(&self, store: &LocaleStore) -> Result<(), Error> {
        check_key_sets(&key_sets(store, &self.config.localized_prefix))
    }

    /// Serializes every resource file in the store back to disk.
    pub fn write_store(&self, store: &LocaleStore) -> Result<usize, Error> {
        let mut written = 0;
        for folder in store.folders() {
            for file in folder.files() {
                strings_file::write_resource_file(file, &self.config.localized_prefix)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// The full synchronization run: discover marked literals, merge them
    /// into every locale, write the resource files, and rewrite the
    /// default-language source call sites.
    pub fn sync(&self, project: &Path, localization: &Path) -> Result<SyncReport, Error> {
        let mut store = self.load_store(localization)?;
        let disk_sets = key_sets(&store, &self.config.localized_prefix);

        let scanner = SourceScanner::new(self.config, &self.patterns);
        let occurrences = scanner.discover(project, &mut store, self.translator)?;

        // Divergence already on disk is fatal before anything is written.
        check_key_sets(&disk_sets)?;

        let files_written = self.write_store(&store)?;

        let rewritten = match store.folder_by_lang(&self.config.default_lang) {
            Some(folder) => scanner.rewrite(project, folder)?,
            None => 0,
        };

        Ok(SyncReport {
            occurrences,
            files_written,
            rewritten,
        })
    }

    /// The maintenance run: consistency check, then unused-key pruning,
    /// then rename propagation across both trees.
    pub fn validate(&self, project: &Path, localization: &Path) -> Result<ValidateReport, Error> {
        let mut store = self.load_store(localization)?;
        self.check_consistency(&store)?;

        let scanner = SourceScanner::new(self.config, &self.patterns);

        let referenced = scanner.referenced_keys(project)?;
        let mut pruned = 0;
        for folder in store.folders_mut() {
            for file in folder.files_mut() {
                pruned += file.prune_unreferenced(&referenced, &self.config.localized_prefix);
            }
        }

        let renames = scanner.rename_map(project)?;
        for (from, to) in &renames {
            for folder in store.folders_mut() {
                for file in folder.files_mut() {
                    file.rename_group(from, to);
                }
            }
        }
        let source_files_updated = scanner.apply_renames(project, &renames)?;

        let files_written = self.write_store(&store)?;

        Ok(ValidateReport {
            pruned,
            renamed: renames.len(),
            source_files_updated,
            files_written,
        })
    }
}

/// Per-resource-file key sets, grouped by file name and labelled
/// `<lang>/<file name>` for reporting.
fn key_sets(
    store: &LocaleStore,
    localized_prefix: &str,
) -> BTreeMap<String, Vec<(String, BTreeSet<String>)>> {
    let file_names: BTreeSet<String> = store
        .folders()
        .iter()
        .flat_map(|f| f.files().map(|rf| rf.file_name()))
        .collect();

    let mut by_file_name = BTreeMap::new();
    for name in file_names {
        let mut row = Vec::new();
        for folder in store.folders() {
            let keys = folder
                .files()
                .find(|rf| rf.file_name() == name)
                .map(|rf| rf.key_set(localized_prefix))
                .unwrap_or_default();
            row.push((format!("{}/{}", folder.lang(), name), keys));
        }
        by_file_name.insert(name, row);
    }
    by_file_name
}

fn check_key_sets(sets: &BTreeMap<String, Vec<(String, BTreeSet<String>)>>) -> Result<(), Error> {
    let mut diff = DivergenceDiff::new();
    for rows in sets.values() {
        let union: BTreeSet<String> = rows.iter().flat_map(|(_, keys)| keys.clone()).collect();
        for (label, keys) in rows {
            let missing: BTreeSet<String> = union.difference(keys).cloned().collect();
            if !missing.is_empty() {
                diff.insert(label.clone(), missing);
            }
        }
    }
    if diff.is_empty() {
        Ok(())
    } else {
        Err(Error::KeyDivergence { diff })
    }
}
