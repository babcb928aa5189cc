use locsync::{Config, NoTranslation, Synchronizer, export_table, import_table};

use crate::validation::{
    parse_separator, validate_dir_path, validate_file_path, validate_output_path,
};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub localization_path: String,
    pub output: String,
    pub localized_prefix: String,
    pub separator: String,
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub localization_path: String,
    pub input: String,
    pub localized_prefix: String,
    pub separator: String,
}

pub fn run_export_command(opts: ExportOptions) -> Result<(), String> {
    validate_dir_path(&opts.localization_path)?;
    validate_output_path(&opts.output)?;
    let delimiter = parse_separator(&opts.separator)?;

    let config = Config::default().with_localized_prefix(&opts.localized_prefix);
    let sync = Synchronizer::new(&config, &NoTranslation).map_err(|e| e.to_string())?;

    let store = sync
        .load_store(opts.localization_path.as_ref())
        .map_err(|e| e.to_string())?;
    sync.check_consistency(&store).map_err(|e| e.to_string())?;

    let rows = export_table(
        &store,
        opts.output.as_ref(),
        delimiter,
        &config.localized_prefix,
    )
    .map_err(|e| e.to_string())?;

    println!("Exported {} keys to {}", rows, opts.output);
    Ok(())
}

pub fn run_import_command(opts: ImportOptions) -> Result<(), String> {
    validate_file_path(&opts.input)?;
    let delimiter = parse_separator(&opts.separator)?;

    let config = Config::default().with_localized_prefix(&opts.localized_prefix);
    let sync = Synchronizer::new(&config, &NoTranslation).map_err(|e| e.to_string())?;

    let store = import_table(
        opts.input.as_ref(),
        opts.localization_path.as_ref(),
        delimiter,
        &config,
        sync.patterns(),
    )
    .map_err(|e| e.to_string())?;

    let files_written = sync.write_store(&store).map_err(|e| e.to_string())?;
    println!(
        "Imported {} languages, {} resource files written under {}",
        store.folders().len(),
        files_written,
        opts.localization_path
    );
    Ok(())
}
