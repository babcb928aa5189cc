use locsync::{Config, NoTranslation, Synchronizer};

use crate::validation::{validate_dir_path, validate_language_code};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub project_path: String,
    pub localization_path: String,
    pub string_prefix: String,
    pub localized_prefix: String,
    pub method_prefix: String,
    pub lang: String,
    pub source_extension: String,
}

impl SyncOptions {
    pub fn to_config(&self) -> Config {
        Config::default()
            .with_string_prefix(&self.string_prefix)
            .with_localized_prefix(&self.localized_prefix)
            .with_method_prefix(&self.method_prefix)
            .with_default_lang(&self.lang)
            .with_source_extension(&self.source_extension)
    }
}

pub fn run_sync_command(opts: SyncOptions) -> Result<(), String> {
    validate_dir_path(&opts.project_path)?;
    validate_dir_path(&opts.localization_path)?;
    validate_language_code(&opts.lang)?;

    let config = opts.to_config();
    let sync = Synchronizer::new(&config, &NoTranslation).map_err(|e| e.to_string())?;
    let report = sync
        .sync(opts.project_path.as_ref(), opts.localization_path.as_ref())
        .map_err(|e| e.to_string())?;

    println!("Literal occurrences found: {}", report.occurrences);
    println!("Resource files written: {}", report.files_written);
    println!("Call sites rewritten: {}", report.rewritten);
    Ok(())
}
