use locsync::{Config, Error, NoTranslation, Synchronizer};
use serde_json::json;

use crate::validation::{validate_dir_path, validate_output_path};

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub project_path: String,
    pub localization_path: String,
    pub localized_prefix: String,
    pub method_prefix: String,
    pub source_extension: String,
    pub report_json: Option<String>,
}

pub fn run_validate_command(opts: ValidateOptions) -> Result<(), String> {
    validate_dir_path(&opts.project_path)?;
    validate_dir_path(&opts.localization_path)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let config = Config::default()
        .with_localized_prefix(&opts.localized_prefix)
        .with_method_prefix(&opts.method_prefix)
        .with_source_extension(&opts.source_extension);
    let sync = Synchronizer::new(&config, &NoTranslation).map_err(|e| e.to_string())?;

    match sync.validate(opts.project_path.as_ref(), opts.localization_path.as_ref()) {
        Ok(report) => {
            println!("Unused entries pruned: {}", report.pruned);
            println!("Renamed keys: {}", report.renamed);
            println!("Source files updated: {}", report.source_files_updated);
            println!("Resource files written: {}", report.files_written);
            if let Some(report_path) = &opts.report_json {
                let payload = json!({
                    "status": "ok",
                    "summary": report,
                });
                write_report(report_path, &payload)?;
                println!("Report JSON written: {}", report_path);
            }
            Ok(())
        }
        Err(Error::KeyDivergence { diff }) => {
            if let Some(report_path) = &opts.report_json {
                let payload = json!({
                    "status": "divergent",
                    "divergence": &diff,
                });
                write_report(report_path, &payload)?;
            }
            Err(Error::KeyDivergence { diff }.to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn write_report(path: &str, payload: &serde_json::Value) -> Result<(), String> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}
