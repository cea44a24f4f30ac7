use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "preference.key")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// 番号付きの一覧に整形
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How much of the screen the host should redraw after a language change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshScope {
    /// Every visible window recomputes its text.
    #[default]
    AllWindows,
    /// Only the options-menu language entry is redrawn.
    LanguageEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Canonical language; its table is the superset of all keys.
    pub default_language: String,

    /// Whether the options menu gets a language entry.
    pub add_language_menu: bool,

    /// Directory holding one file per language, relative to the game root.
    pub translations_dir: String,

    /// Glob matched against file names inside `translations_dir`.
    pub file_pattern: String,

    pub preference: PreferenceConfig,

    pub refresh_scope: RefreshScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceConfig {
    /// When false the chosen language only lives for the session.
    pub enabled: bool,
    /// Settings file relative to the game root.
    pub file: String,
    /// Key under which the language code is stored.
    pub key: String,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            add_language_menu: true,
            translations_dir: "data/i18n".to_string(),
            file_pattern: "*.json".to_string(),
            preference: PreferenceConfig::default(),
            refresh_scope: RefreshScope::default(),
        }
    }
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self { enabled: true, file: "save/config.json".to_string(), key: "i18nLanguage".to_string() }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Default language contains a path separator
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language code cannot be empty. Example: \"en\"",
            ));
        } else if self.default_language.contains(['/', '\\']) || self.default_language == ".." {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "'{}' is used as a file name and cannot contain path separators",
                    self.default_language
                ),
            ));
        }

        if self.translations_dir.is_empty() {
            errors.push(ValidationError::new(
                "translationsDir",
                "The directory cannot be empty. Example: \"data/i18n\"",
            ));
        }

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        if self.preference.enabled {
            if self.preference.file.is_empty() {
                errors.push(ValidationError::new(
                    "preference.file",
                    "The file cannot be empty while the preference is enabled",
                ));
            }
            if self.preference.key.is_empty() {
                errors.push(ValidationError::new(
                    "preference.key",
                    "The key cannot be empty while the preference is enabled",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
