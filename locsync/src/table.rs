//! Tabular exchange: the cross-locale store as a key-by-language table.
//!
//! The table is delimited text with a `[key]` header column followed by
//! one column per language; every cell is quoted on export. Import is
//! strict about the header and key forms and creates any locale folder
//! or resource file missing on disk (in the model; the write stage
//! materializes them).

use std::collections::BTreeMap;
use std::path::Path;

use crate::{
    config::Config,
    error::Error,
    key::FullKey,
    patterns::Patterns,
    store::{LocaleFolder, LocaleStore},
};

/// Header name of the key column.
pub const KEY_COLUMN: &str = "[key]";

/// Writes the store as a table, one row per full key, sorted by key.
/// Returns the number of data rows written.
pub fn export_table(
    store: &LocaleStore,
    output: &Path,
    delimiter: u8,
    localized_prefix: &str,
) -> Result<usize, Error> {
    let langs: Vec<String> = store
        .folders()
        .iter()
        .map(|f| f.lang().to_string())
        .collect();

    let mut rows: BTreeMap<FullKey, BTreeMap<String, String>> = BTreeMap::new();
    for folder in store.folders() {
        for file in folder.files() {
            for (clear_key, group) in file.groups() {
                for entry in group.entries() {
                    rows.entry(FullKey::new(clear_key.clone(), entry.number))
                        .or_default()
                        .insert(folder.lang().to_string(), entry.value.clone());
                }
            }
        }
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Always)
        .from_path(output)?;

    let mut header = vec![KEY_COLUMN.to_string()];
    header.extend(langs.iter().cloned());
    writer.write_record(&header)?;

    for (key, values) in &rows {
        let mut record = vec![key.text(localized_prefix)];
        for lang in &langs {
            record.push(values.get(lang).cloned().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

/// Reads a table back into a store rooted at `localization`, creating
/// model entries for any locale folder the table names. The caller writes
/// the store to materialize missing folders and files on disk.
pub fn import_table(
    table: &Path,
    localization: &Path,
    delimiter: u8,
    config: &Config,
    patterns: &Patterns,
) -> Result<LocaleStore, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_path(table)?;
    let mut records = reader.records();

    let header = records
        .next()
        .ok_or_else(|| Error::invalid_table("empty table"))??;
    if header.get(0) != Some(KEY_COLUMN) {
        return Err(Error::invalid_table(format!(
            "first column must be \"{}\"",
            KEY_COLUMN
        )));
    }
    let langs: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
    if langs.is_empty() {
        return Err(Error::invalid_table("no language columns"));
    }

    let mut store = LocaleStore::new();
    for lang in &langs {
        let folder_path =
            localization.join(format!("{}.{}", lang, config.locale_folder_extension));
        let mut folder = LocaleFolder::from_path(folder_path, &config.locale_folder_extension)?;
        folder.ensure_default_file(config);
        store.add_folder(folder);
    }

    for (row_idx, record) in records.enumerate() {
        let record = record?;
        let line_number = row_idx + 2;
        let key_text = record
            .get(0)
            .ok_or_else(|| Error::invalid_table(format!("row {}: missing key cell", line_number)))?;
        let key = patterns.parse_full_key(key_text).ok_or_else(|| {
            Error::invalid_table(format!("row {}: not a full key: {}", line_number, key_text))
        })?;

        for (i, lang) in langs.iter().enumerate() {
            let value = record.get(i + 1).ok_or_else(|| {
                Error::invalid_table(format!(
                    "row {}: missing value for language {}",
                    line_number, lang
                ))
            })?;
            if let Some(file) = store.folders_mut()[i].files_mut().next() {
                file.add_existing(&key, value);
            }
        }
    }

    Ok(store)
}
