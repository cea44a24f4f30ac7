//! Durable storage of the player's language choice.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use crate::error::I18nError;

/// Where the chosen language survives between sessions.
///
/// Read once at startup, written after every successful switch
/// (last write wins).
pub trait LanguagePreference: fmt::Debug {
    /// The saved language code, if any.
    fn load(&self) -> Option<String>;

    /// Remember `language` for the next session.
    ///
    /// # Errors
    /// `Io` if the backing store cannot be written.
    fn save(&mut self, language: &str) -> Result<(), I18nError>;
}

/// Keeps the choice for the current process only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreference {
    /// Last saved code.
    language: Option<String>,
}

impl MemoryPreference {
    #[must_use]
    pub fn new(language: Option<String>) -> Self {
        Self { language }
    }
}

impl LanguagePreference for MemoryPreference {
    fn load(&self) -> Option<String> {
        self.language.clone()
    }

    fn save(&mut self, language: &str) -> Result<(), I18nError> {
        self.language = Some(language.to_string());
        Ok(())
    }
}

/// Stores the choice under one key of a JSON settings file shared with the
/// rest of the game; other keys in the file are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFilePreference {
    /// Settings file.
    path: PathBuf,
    /// Key holding the language code.
    key: String,
}

impl JsonFilePreference {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self { path: path.into(), key: key.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content as an object.
    ///
    /// A missing file counts as empty; `None` when the file exists but cannot
    /// be read or is not a JSON object.
    fn read_object(&self) -> Option<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Some(Map::new()),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Failed to read settings file: {err}");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "Settings file is not a JSON object");
                None
            }
        }
    }
}

impl LanguagePreference for JsonFilePreference {
    fn load(&self) -> Option<String> {
        let language = self.read_object()?.get(&self.key)?.as_str()?.to_string();
        tracing::debug!(path = %self.path.display(), %language, "Loaded saved language");
        Some(language)
    }

    /// A settings file that exists but does not parse is left untouched.
    fn save(&mut self, language: &str) -> Result<(), I18nError> {
        let Some(mut object) = self.read_object() else {
            tracing::warn!(
                path = %self.path.display(),
                "Not saving the language choice over an unreadable settings file"
            );
            return Ok(());
        };
        object.insert(self.key.clone(), Value::String(language.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| I18nError::io(parent, e))?;
        }
        std::fs::write(&self.path, format!("{:#}", Value::Object(object)))
            .map_err(|e| I18nError::io(&self.path, e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn memory_preference_round_trips() {
        let mut preference = MemoryPreference::default();
        expect_that!(preference.load(), none());

        preference.save("pt").unwrap();

        expect_that!(preference.load(), some(eq("pt")));
    }

    #[googletest::test]
    fn missing_file_has_no_saved_language() {
        let temp_dir = TempDir::new().unwrap();
        let preference = JsonFilePreference::new(temp_dir.path().join("config.json"), "i18nLanguage");

        expect_that!(preference.load(), none());
    }

    #[googletest::test]
    fn save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("save").join("config.json");
        let mut preference = JsonFilePreference::new(&path, "i18nLanguage");

        preference.save("jp").unwrap();

        expect_that!(path.is_file(), eq(true));
        expect_that!(preference.load(), some(eq("jp")));
    }

    #[googletest::test]
    fn save_keeps_other_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"bgmVolume": 80, "i18nLanguage": "en"}"#).unwrap();
        let mut preference = JsonFilePreference::new(&path, "i18nLanguage");

        preference.save("pt").unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        expect_that!(saved["bgmVolume"].as_i64(), some(eq(80)));
        expect_that!(saved["i18nLanguage"].as_str(), some(eq("pt")));
    }

    #[googletest::test]
    fn malformed_file_is_never_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{\"bgmVolume\": 80,").unwrap();
        let mut preference = JsonFilePreference::new(&path, "lang");

        expect_that!(preference.load(), none());
        expect_that!(preference.save("en").is_ok(), eq(true));
        expect_that!(std::fs::read_to_string(&path).unwrap(), eq("{\"bgmVolume\": 80,"));
        expect_that!(preference.load(), none());
    }

    #[googletest::test]
    fn non_string_value_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"lang": 3}"#).unwrap();

        expect_that!(JsonFilePreference::new(&path, "lang").load(), none());
    }
}
