//! The group store: numbered string groups per clear key, resource files,
//! locale folders, and the cross-locale store.
//!
//! All number allocation and value deduplication funnels through
//! [`Group::add_new`] and [`Group::add_existing`]; nothing else assigns
//! numbers. Counters only grow, and numbers are never reused after an
//! entry is pruned.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    config::Config,
    error::Error,
    key::{ClearKey, FullKey, make_full_key},
    translate::{Translator, translate_or_fallback},
};

/// One numbered, keyed string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedEntry {
    pub clear_key: ClearKey,
    pub number: u32,
    pub value: String,
}

impl NumberedEntry {
    /// The textual full key of this entry.
    pub fn full_key(&self, localized_prefix: &str) -> String {
        make_full_key(&self.clear_key, localized_prefix, self.number)
    }
}

/// The ordered collection of numbered entries for one clear key.
///
/// Holds the group's grow-only "last assigned number" counter and the
/// passthrough lines (comments, spacing) attached to the group by the
/// resource-file parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    clear_key: ClearKey,
    entries: Vec<NumberedEntry>,
    by_value: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
    last_number: u32,
    passthrough: Vec<String>,
}

impl Group {
    pub fn new(clear_key: impl Into<ClearKey>) -> Self {
        Group {
            clear_key: clear_key.into(),
            ..Default::default()
        }
    }

    pub fn clear_key(&self) -> &str {
        &self.clear_key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_number(&self) -> u32 {
        self.last_number
    }

    /// Ingests an entry with a known number, typically from an existing
    /// resource file. Raises the counter to at least `number`. Idempotent:
    /// a number already present leaves the group unchanged.
    pub fn add_existing(&mut self, number: u32, value: &str) -> &NumberedEntry {
        if let Some(&idx) = self.by_number.get(&number) {
            return &self.entries[idx];
        }
        if self.last_number < number {
            self.last_number = number;
        }
        self.push_entry(number, value)
    }

    /// Inserts a newly discovered value. If the value is already present
    /// the existing entry is returned and no number is consumed; otherwise
    /// the counter advances and a new entry is appended.
    pub fn add_new(&mut self, value: &str) -> &NumberedEntry {
        if let Some(&idx) = self.by_value.get(value) {
            return &self.entries[idx];
        }
        self.last_number += 1;
        self.push_entry(self.last_number, value)
    }

    fn push_entry(&mut self, number: u32, value: &str) -> &NumberedEntry {
        let idx = self.entries.len();
        self.entries.push(NumberedEntry {
            clear_key: self.clear_key.clone(),
            number,
            value: value.to_string(),
        });
        self.by_number.insert(number, idx);
        // First writer wins: lookups resolve to the earliest entry.
        self.by_value.entry(value.to_string()).or_insert(idx);
        &self.entries[idx]
    }

    /// Resolves a value to its assigned entry.
    pub fn lookup(&self, value: &str) -> Option<&NumberedEntry> {
        self.by_value.get(value).map(|&idx| &self.entries[idx])
    }

    /// Resolves a number to its entry.
    pub fn get(&self, number: u32) -> Option<&NumberedEntry> {
        self.by_number.get(&number).map(|&idx| &self.entries[idx])
    }

    pub fn contains_number(&self, number: u32) -> bool {
        self.by_number.contains_key(&number)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &NumberedEntry> {
        self.entries.iter()
    }

    /// Entries sorted by ascending number, the canonical output order.
    pub fn sorted_entries(&self) -> Vec<&NumberedEntry> {
        let mut sorted: Vec<&NumberedEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.number);
        sorted
    }

    /// Drops entries not satisfying `keep` and returns how many were
    /// removed. The counter is untouched so pruned numbers are never
    /// handed out again.
    pub fn retain<F: Fn(&NumberedEntry) -> bool>(&mut self, keep: F) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e));
        self.rebuild_indices();
        before - self.entries.len()
    }

    /// Replaces the value of the entry with `number`, if present.
    pub fn replace_value(&mut self, number: u32, value: &str) -> bool {
        let Some(&idx) = self.by_number.get(&number) else {
            return false;
        };
        if self.entries[idx].value == value {
            return false;
        }
        self.entries[idx].value = value.to_string();
        self.rebuild_indices();
        true
    }

    fn rebuild_indices(&mut self) {
        self.by_value.clear();
        self.by_number.clear();
        for (idx, entry) in self.entries.iter().enumerate() {
            self.by_number.insert(entry.number, idx);
            self.by_value.entry(entry.value.clone()).or_insert(idx);
        }
    }

    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    pub fn push_passthrough(&mut self, line: impl Into<String>) {
        self.passthrough.push(line.into());
    }

    /// Merges another group into this one, preserving entry numbers.
    /// Used by rename propagation.
    pub fn absorb(&mut self, other: Group) {
        for entry in other.entries {
            self.add_existing(entry.number, &entry.value);
        }
        self.passthrough.extend(other.passthrough);
    }
}

/// One parsed resource file: groups keyed by clear key, plus the
/// passthrough lines surrounding them.
#[derive(Debug, Clone, Default)]
pub struct ResourceFile {
    path: PathBuf,
    groups: BTreeMap<ClearKey, Group>,
    preamble: Vec<String>,
    trailer: Vec<String>,
}

impl ResourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResourceFile {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Groups in clear-key order.
    pub fn groups(&self) -> impl Iterator<Item = (&ClearKey, &Group)> {
        self.groups.iter()
    }

    pub fn group(&self, clear_key: &str) -> Option<&Group> {
        self.groups.get(clear_key)
    }

    pub fn group_mut(&mut self, clear_key: &str) -> &mut Group {
        self.groups
            .entry(clear_key.to_string())
            .or_insert_with(|| Group::new(clear_key))
    }

    pub fn add_existing(&mut self, key: &FullKey, value: &str) {
        self.group_mut(&key.clear_key).add_existing(key.number, value);
    }

    pub fn add_new(&mut self, clear_key: &str, value: &str) -> NumberedEntry {
        self.group_mut(clear_key).add_new(value).clone()
    }

    pub fn lookup(&self, clear_key: &str, value: &str) -> Option<&NumberedEntry> {
        self.groups.get(clear_key)?.lookup(value)
    }

    /// Every full key in this file, in textual form.
    pub fn key_set(&self, localized_prefix: &str) -> BTreeSet<String> {
        self.groups
            .values()
            .flat_map(|g| g.entries())
            .map(|e| e.full_key(localized_prefix))
            .collect()
    }

    /// Deletes entries whose full key is not in `referenced`. Returns the
    /// number of removed entries. Groups shrink but are never deleted.
    pub fn prune_unreferenced(
        &mut self,
        referenced: &HashSet<String>,
        localized_prefix: &str,
    ) -> usize {
        self.groups
            .values_mut()
            .map(|g| g.retain(|e| referenced.contains(&e.full_key(localized_prefix))))
            .sum()
    }

    /// Moves every entry of `from` into the group named `to`, preserving
    /// numbers. Returns false if there was no `from` group.
    pub fn rename_group(&mut self, from: &str, to: &str) -> bool {
        let Some(mut group) = self.groups.remove(from) else {
            return false;
        };
        group.clear_key = to.to_string();
        for entry in &mut group.entries {
            entry.clear_key = to.to_string();
        }
        self.group_mut(to).absorb(group);
        true
    }

    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }

    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    pub fn trailer(&self) -> &[String] {
        &self.trailer
    }

    pub fn push_preamble(&mut self, line: impl Into<String>) {
        self.preamble.push(line.into());
    }

    pub fn push_trailer(&mut self, line: impl Into<String>) {
        self.trailer.push(line.into());
    }
}

/// One language's folder of resource files.
#[derive(Debug, Clone)]
pub struct LocaleFolder {
    path: PathBuf,
    lang: String,
    files: BTreeMap<PathBuf, ResourceFile>,
}

impl LocaleFolder {
    /// Creates a folder for `path`, extracting the language code from the
    /// folder name (`fr.lproj` → `fr`).
    pub fn from_path(path: impl Into<PathBuf>, locale_extension: &str) -> Result<Self, Error> {
        let path = path.into();
        let suffix = format!(".{}", locale_extension);
        let lang = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(suffix.as_str()))
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidLocaleFolder(path.display().to_string()))?
            .to_string();
        Ok(LocaleFolder {
            path,
            lang,
            files: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn add_file(&mut self, file: ResourceFile) {
        self.files.insert(file.path().to_path_buf(), file);
    }

    pub fn files(&self) -> impl Iterator<Item = &ResourceFile> {
        self.files.values()
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut ResourceFile> {
        self.files.values_mut()
    }

    pub fn file_mut(&mut self, path: &Path) -> Option<&mut ResourceFile> {
        self.files.get_mut(path)
    }

    /// Materializes the default resource file when the folder is empty, so
    /// discovery into a fresh `.lproj` folder has somewhere to land.
    pub fn ensure_default_file(&mut self, config: &Config) {
        if self.files.is_empty() {
            let path = self.path.join(&config.default_resource_file);
            self.files.insert(path.clone(), ResourceFile::new(path));
        }
    }

    /// Resolves a value within this folder, searching each file's group.
    pub fn lookup(&self, clear_key: &str, value: &str) -> Option<&NumberedEntry> {
        self.files.values().find_map(|f| f.lookup(clear_key, value))
    }
}

/// The cross-locale store: every language folder of one localization tree.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    folders: Vec<LocaleFolder>,
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&mut self, folder: LocaleFolder) {
        self.folders.push(folder);
    }

    pub fn folders(&self) -> &[LocaleFolder] {
        &self.folders
    }

    pub fn folders_mut(&mut self) -> &mut [LocaleFolder] {
        &mut self.folders
    }

    pub fn folder_by_lang(&self, lang: &str) -> Option<&LocaleFolder> {
        self.folders.iter().find(|f| f.lang == lang)
    }

    pub fn folder_mut_by_lang(&mut self, lang: &str) -> Option<&mut LocaleFolder> {
        self.folders.iter_mut().find(|f| f.lang == lang)
    }

    /// Adds a newly discovered value to every locale.
    ///
    /// The number is allocated once against the default language so the
    /// same default-language value receives the same number across the
    /// whole store; the other locales follow by number, with their value
    /// run through the translator (falling back to the untranslated value
    /// on failure). Returns the assigned number, or `None` when no default
    /// locale folder exists to allocate against.
    pub fn add_discovered(
        &mut self,
        clear_key: &str,
        value: &str,
        config: &Config,
        translator: &dyn Translator,
    ) -> Option<u32> {
        let number = {
            let folder = self.folder_mut_by_lang(&config.default_lang)?;
            folder.ensure_default_file(config);
            let mut assigned: Option<u32> = None;
            for file in folder.files.values_mut() {
                let n = match assigned {
                    None => file.group_mut(clear_key).add_new(value).number,
                    Some(n) => {
                        file.group_mut(clear_key).add_existing(n, value);
                        n
                    }
                };
                assigned = Some(n);
            }
            assigned?
        };

        for folder in self.folders.iter_mut() {
            if folder.lang == config.default_lang {
                continue;
            }
            let localized =
                translate_or_fallback(translator, value, &config.default_lang, &folder.lang);
            folder.ensure_default_file(config);
            for file in folder.files.values_mut() {
                file.group_mut(clear_key).add_existing(number, &localized);
            }
        }

        Some(number)
    }
}
