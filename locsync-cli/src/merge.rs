use locsync::{Config, Patterns, merge::merge_translated};

use crate::validation::validate_file_path;

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub translated_file_path: String,
    pub project_file_path: String,
    pub localized_prefix: String,
}

pub fn run_merge_command(opts: MergeOptions) -> Result<(), String> {
    validate_file_path(&opts.translated_file_path)?;
    validate_file_path(&opts.project_file_path)?;

    let config = Config::default().with_localized_prefix(&opts.localized_prefix);
    let patterns = Patterns::new(&config).map_err(|e| e.to_string())?;

    let updated = merge_translated(
        opts.translated_file_path.as_ref(),
        opts.project_file_path.as_ref(),
        &patterns,
        &config.localized_prefix,
    )
    .map_err(|e| e.to_string())?;

    println!(
        "Updated {} values in {}",
        updated, opts.project_file_path
    );
    Ok(())
}
