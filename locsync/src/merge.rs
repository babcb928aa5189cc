//! Merging translated values back into a project resource file.
//!
//! For every full key present in both files, the project file takes the
//! translated file's value. Keys only present in the translated file are
//! ignored; the project file's passthrough lines and key set are
//! preserved.

use std::path::Path;

use crate::{error::Error, patterns::Patterns, strings_file};

/// Merges `translated` into `project_file` on disk. Returns the number of
/// values that changed.
pub fn merge_translated(
    translated: &Path,
    project_file: &Path,
    patterns: &Patterns,
    localized_prefix: &str,
) -> Result<usize, Error> {
    let donor = strings_file::read_resource_file(translated, patterns)?;
    let mut target = strings_file::read_resource_file(project_file, patterns)?;

    let mut updated = 0;
    let replacements: Vec<(String, u32, String)> = target
        .groups()
        .flat_map(|(clear_key, group)| {
            group.entries().filter_map(|entry| {
                donor
                    .group(clear_key)
                    .and_then(|g| g.get(entry.number))
                    .filter(|d| d.value != entry.value)
                    .map(|d| (clear_key.clone(), entry.number, d.value.clone()))
            })
        })
        .collect();

    for (clear_key, number, value) in replacements {
        if target.group_mut(&clear_key).replace_value(number, &value) {
            updated += 1;
        }
    }

    strings_file::write_resource_file(&target, localized_prefix)?;
    Ok(updated)
}
