use clap::{Parser, Subcommand};

use locsync_cli::{
    ExportOptions, ImportOptions, MergeOptions, SyncOptions, ValidateOptions, run_export_command,
    run_import_command, run_merge_command, run_sync_command, run_validate_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan source files for marked literals, assign keys, and synchronize
    /// every locale folder.
    Sync {
        /// Project path to scan for source files
        #[arg(short, long, default_value = ".")]
        project_path: String,

        /// Path to the localization folders
        #[arg(short, long)]
        localization_path: String,

        /// Prefix marking raw literals
        #[arg(long, default_value = "localize")]
        string_prefix: String,

        /// Prefix used in generated key names
        #[arg(long, default_value = "String")]
        localized_prefix: String,

        /// Method name for resolved key references
        #[arg(long, default_value = "localized")]
        method_prefix: String,

        /// Default project language
        #[arg(long, default_value = "en")]
        lang: String,

        /// Extension of scannable source files
        #[arg(long, default_value = "swift")]
        source_extension: String,
    },

    /// Prune unused keys and follow renamed source files.
    Validate {
        /// Project path to scan for source files
        #[arg(short, long, default_value = ".")]
        project_path: String,

        /// Path to the localization folders
        #[arg(short, long)]
        localization_path: String,

        /// Prefix used in generated key names
        #[arg(long, default_value = "String")]
        localized_prefix: String,

        /// Method name for resolved key references
        #[arg(long, default_value = "localized")]
        method_prefix: String,

        /// Extension of scannable source files
        #[arg(long, default_value = "swift")]
        source_extension: String,

        /// Write a machine-readable report to this path
        #[arg(long)]
        report_json: Option<String>,
    },

    /// Export every locale's keys and values as a delimited table.
    Export {
        /// Path to the localization folders
        #[arg(short, long)]
        localization_path: String,

        /// The table file to write
        #[arg(short, long)]
        output: String,

        /// Prefix used in generated key names
        #[arg(long, default_value = "String")]
        localized_prefix: String,

        /// Cell delimiter
        #[arg(long, default_value = ",")]
        separator: String,
    },

    /// Import a delimited table back into the locale folders, creating
    /// any missing language folder or resource file.
    Import {
        /// Path to the localization folders
        #[arg(short, long)]
        localization_path: String,

        /// The table file to read
        #[arg(short, long)]
        input: String,

        /// Prefix used in generated key names
        #[arg(long, default_value = "String")]
        localized_prefix: String,

        /// Cell delimiter
        #[arg(long, default_value = ",")]
        separator: String,
    },

    /// Merge a translated resource file's values into a project resource
    /// file by key.
    Merge {
        /// The translated file to take values from
        #[arg(short, long)]
        translated_file_path: String,

        /// The project file to update
        #[arg(short, long)]
        project_file_path: String,

        /// Prefix used in generated key names
        #[arg(long, default_value = "String")]
        localized_prefix: String,
    },
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Sync {
            project_path,
            localization_path,
            string_prefix,
            localized_prefix,
            method_prefix,
            lang,
            source_extension,
        } => run_sync_command(SyncOptions {
            project_path,
            localization_path,
            string_prefix,
            localized_prefix,
            method_prefix,
            lang,
            source_extension,
        }),
        Commands::Validate {
            project_path,
            localization_path,
            localized_prefix,
            method_prefix,
            source_extension,
            report_json,
        } => run_validate_command(ValidateOptions {
            project_path,
            localization_path,
            localized_prefix,
            method_prefix,
            source_extension,
            report_json,
        }),
        Commands::Export {
            localization_path,
            output,
            localized_prefix,
            separator,
        } => run_export_command(ExportOptions {
            localization_path,
            output,
            localized_prefix,
            separator,
        }),
        Commands::Import {
            localization_path,
            input,
            localized_prefix,
            separator,
        } => run_import_command(ImportOptions {
            localization_path,
            input,
            localized_prefix,
            separator,
        }),
        Commands::Merge {
            translated_file_path,
            project_file_path,
            localized_prefix,
        } => run_merge_command(MergeOptions {
            translated_file_path,
            project_file_path,
            localized_prefix,
        }),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
