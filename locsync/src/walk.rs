//! Sequential directory traversal and whole-file IO.
//!
//! Traversal is deterministic (sorted by file name) and single-threaded;
//! the engine assumes exclusive ownership of both trees for the duration
//! of a run. Writes are whole-file replacements.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;

/// All files under `root` with the given extension, sorted.
pub fn files_with_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            out.push(entry.path().to_path_buf());
        }
    }
    Ok(out)
}

/// Locale folders under `root` with their resource files, sorted.
///
/// A locale folder is any directory carrying the locale-folder extension;
/// folders holding no resource file yet are still listed so discovery can
/// populate them.
pub fn locale_folders(
    root: &Path,
    locale_extension: &str,
    resource_extension: &str,
) -> Result<Vec<(PathBuf, Vec<PathBuf>)>, Error> {
    let mut grouped: std::collections::BTreeMap<PathBuf, Vec<PathBuf>> =
        std::collections::BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        let has_extension = |wanted: &str| {
            path.extension().and_then(|e| e.to_str()) == Some(wanted)
        };
        if entry.file_type().is_dir() && has_extension(locale_extension) {
            grouped.entry(path.to_path_buf()).or_default();
        } else if entry.file_type().is_file() && has_extension(resource_extension) {
            let Some(parent) = path.parent() else {
                continue;
            };
            let in_locale_folder = parent.extension().and_then(|e| e.to_str())
                == Some(locale_extension);
            if in_locale_folder {
                grouped
                    .entry(parent.to_path_buf())
                    .or_default()
                    .push(path.to_path_buf());
            }
        }
    }
    Ok(grouped.into_iter().collect())
}

/// Reads a whole file to a string, decoding a BOM if one is present
/// (Apple tooling historically writes UTF-16 `.strings` files).
pub fn read_to_string(path: &Path) -> Result<String, Error> {
    let file = File::open(path)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);
    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

/// Replaces the file at `path` with `content`, creating parent folders as
/// needed. Truncate-then-write; a crash mid-write is an accepted
/// limitation rather than a journaled operation.
pub fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Squashes runs of more than two consecutive blank lines down to two.
pub fn squash_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 2 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// The project-relative path of `path`, with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn io_error(err: walkdir::Error) -> Error {
    match err.into_io_error() {
        Some(io) => Error::Io(io),
        None => Error::Io(std::io::Error::other("directory walk failed")),
    }
}
