//! Run configuration: the marker strings and file-name conventions the
//! engine recognizes.
//!
//! The whole pipeline reads these from one explicitly constructed value;
//! there is no process-wide configuration state.

/// Marker and naming configuration for one synchronization run.
///
/// The defaults match the conventional Apple project setup: literals
/// written as `"localize.Some text"`, resolved references written as
/// `"Views.Home.String_1".localized`, resources stored in
/// `<lang>.lproj/*.strings` folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix marking a raw literal that still needs localization.
    pub string_prefix: String,
    /// Prefix used in generated key names (`<clearKey>.<prefix>_<n>`).
    pub localized_prefix: String,
    /// Method name following a resolved key reference.
    pub method_prefix: String,
    /// The project's default language code.
    pub default_lang: String,
    /// Extension of scannable source files, without the dot.
    pub source_extension: String,
    /// Extension of resource files, without the dot.
    pub resource_extension: String,
    /// Extension of per-language folders, without the dot.
    pub locale_folder_extension: String,
    /// File name created when a locale folder has no resource file yet.
    pub default_resource_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            string_prefix: "localize".to_string(),
            localized_prefix: "String".to_string(),
            method_prefix: "localized".to_string(),
            default_lang: "en".to_string(),
            source_extension: "swift".to_string(),
            resource_extension: "strings".to_string(),
            locale_folder_extension: "lproj".to_string(),
            default_resource_file: "Localizable.strings".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.string_prefix = prefix.into();
        self
    }

    pub fn with_localized_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.localized_prefix = prefix.into();
        self
    }

    pub fn with_method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.method_prefix = prefix.into();
        self
    }

    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = lang.into();
        self
    }

    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }
}
