#![forbid(unsafe_code)]
//! Localization key synchronization engine.
//!
//! Extracts marked string literals from project source files, assigns them
//! stable numbered keys, and keeps per-language `.lproj/*.strings` resource
//! files synchronized with those keys as the project evolves.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locsync::{Config, NoTranslation, Synchronizer};
//!
//! let config = Config::default();
//! let sync = Synchronizer::new(&config, &NoTranslation)?;
//! let report = sync.sync("MyApp".as_ref(), "MyApp/Localization".as_ref())?;
//! println!("{} call sites rewritten", report.rewritten);
//! # Ok::<(), locsync::Error>(())
//! ```
//!
//! # Pipeline
//!
//! A run is a linear pipeline: load the existing resource files, discover
//! newly marked literals (`"localize.Some text"`), merge them into every
//! locale, verify that all locales expose the identical key set, write the
//! resource files back, and rewrite the default-language call sites to
//! resolved references (`"Views.Home.String_1".localized`). The optional
//! maintenance run prunes keys no longer referenced anywhere and follows
//! source files that moved since their keys were assigned.
//!
//! Any fatal condition (malformed resource line, divergent key sets,
//! unresolved lookup, extraction runaway) aborts the run before further
//! files are written.

pub mod config;
pub mod error;
pub mod key;
pub mod merge;
pub mod patterns;
pub mod scanner;
pub mod store;
pub mod strings_file;
pub mod sync;
pub mod table;
pub mod translate;
pub mod walk;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::{DivergenceDiff, Error},
    key::{ClearKey, FullKey, derive_clear_key, make_full_key},
    patterns::{Patterns, ResourceLine, escape_pattern},
    scanner::{EXTRACTION_RETRY_CEILING, SourceScanner},
    store::{Group, LocaleFolder, LocaleStore, NumberedEntry, ResourceFile},
    sync::{SyncReport, Synchronizer, ValidateReport},
    table::{KEY_COLUMN, export_table, import_table},
    translate::{NoTranslation, Translator},
};
