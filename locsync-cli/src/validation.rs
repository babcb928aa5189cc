//! Input validation helpers shared by the subcommands.

use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate that a path exists and is a directory.
pub fn validate_dir_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }
    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }
    Ok(())
}

/// Validate that a path exists and is a readable file.
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }
    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }
    Ok(())
}

/// Validate that the output file's directory exists or can be created.
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);
    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }
    Ok(())
}

/// Validate a language code as a BCP 47 identifier.
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }
    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    })
}

/// Parse the table delimiter: exactly one ASCII character.
pub fn parse_separator(separator: &str) -> Result<u8, String> {
    let bytes = separator.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() {
        return Err(format!(
            "Separator must be a single ASCII character, got: {:?}",
            separator
        ));
    }
    Ok(bytes[0])
}
