//! The localization context a game holds for its whole session.

use std::borrow::Cow;

use crate::config::{
    ConfigManager,
    I18nSettings,
};
use crate::error::I18nError;
use crate::input::preference::{
    JsonFilePreference,
    LanguagePreference,
    MemoryPreference,
};
use crate::store::TranslationStore;
use crate::substitute;
use crate::switcher::{
    LanguageSwitcher,
    RefreshRequest,
};
use crate::sync::{
    FileSync,
    SyncReport,
    default_seed,
};

/// Owns the loaded tables and the switching machinery.
///
/// Built once at startup by [`Localizer::initialize`]; every display string
/// then goes through [`Localizer::substitute`].
#[derive(Debug)]
pub struct Localizer {
    /// Settings the localizer was built from.
    settings: I18nSettings,
    store: TranslationStore,
    switcher: LanguageSwitcher,
}

impl Localizer {
    /// Prepare the translations directory and load every language.
    ///
    /// Creates the default table if needed, loads all tables, back-fills the
    /// non-default ones and picks the saved language if it is still loaded,
    /// else the default.
    ///
    /// # Errors
    /// - `Io` if the directory cannot be created or read, or a back-filled
    ///   table cannot be written
    /// - `Parse` if the default table is malformed
    /// - `InvalidPattern` if the configured file pattern is invalid
    pub fn initialize(config: &ConfigManager) -> Result<Self, I18nError> {
        let settings = config.get_settings().clone();
        let preference: Box<dyn LanguagePreference> = match config.preference_file() {
            Some(path) => Box::new(JsonFilePreference::new(path, settings.preference.key.clone())),
            None => Box::new(MemoryPreference::default()),
        };
        let file_sync = FileSync::new(config.translations_dir(), &settings.file_pattern)?;

        let (localizer, _report) = Self::initialize_with(settings, &file_sync, preference)?;
        Ok(localizer)
    }

    /// [`Self::initialize`] with explicit storage, also returning what the
    /// sync pass wrote.
    ///
    /// # Errors
    /// See [`Self::initialize`].
    pub fn initialize_with(
        settings: I18nSettings,
        file_sync: &FileSync,
        preference: Box<dyn LanguagePreference>,
    ) -> Result<(Self, SyncReport), I18nError> {
        let default_language = settings.default_language.as_str();

        file_sync.ensure_default_table(default_language, &default_seed(default_language))?;

        let mut loaded = file_sync.load_all()?;
        if !loaded.tables.contains_key(default_language) {
            let default_path = file_sync.table_path(default_language);
            return Err(loaded
                .skipped
                .into_iter()
                .find(|err| err.path() == Some(default_path.as_path()))
                .unwrap_or_else(|| I18nError::UnknownLanguage(default_language.to_string())));
        }

        let report = file_sync.sync(default_language, &mut loaded.tables)?;

        let switcher = LanguageSwitcher::new(preference, settings.refresh_scope);
        let mut store = TranslationStore::new(loaded.tables, default_language);
        match switcher.saved_language() {
            Some(saved) if store.contains_language(&saved) => store.set_current_language(&saved)?,
            Some(saved) => {
                tracing::warn!(%saved, "Saved language is not loaded, using the default");
            }
            None => {}
        }
        tracing::info!(
            languages = store.len(),
            current = %store.current_language(),
            "Translations ready"
        );

        Ok((Self { settings, store, switcher }, report))
    }

    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &TranslationStore {
        &self.store
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        self.store.current_language()
    }

    #[must_use]
    pub fn language_codes(&self) -> Vec<&str> {
        self.store.language_codes()
    }

    /// Display name of the current language.
    #[must_use]
    pub fn current_language_name(&self) -> &str {
        self.store.display_name(self.store.current_language())
    }

    #[must_use]
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        substitute::resolve(&self.store, key)
    }

    #[must_use]
    pub fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        substitute::substitute(&self.store, text)
    }

    /// # Errors
    /// `UnknownLanguage` if `language` is not loaded.
    pub fn set_language(&mut self, language: &str) -> Result<(), I18nError> {
        self.switcher.set_language(&mut self.store, language)
    }

    /// # Errors
    /// See [`Self::set_language`].
    pub fn next_language(&mut self) -> Result<(), I18nError> {
        self.switcher.next_language(&mut self.store)
    }

    /// # Errors
    /// See [`Self::set_language`].
    pub fn previous_language(&mut self) -> Result<(), I18nError> {
        self.switcher.previous_language(&mut self.store)
    }

    /// Register the host's redraw callback.
    pub fn on_refresh(&mut self, hook: impl FnMut(&RefreshRequest<'_>) + 'static) {
        self.switcher.on_refresh(hook);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod tests {
    use std::fs;
    use std::path::Path;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::RefreshScope;

    /// Localizer over `dir` with the given files and an in-memory preference.
    pub(crate) fn localizer_with(
        dir: &Path,
        files: &[(&str, &str)],
        saved: Option<&str>,
    ) -> Localizer {
        fs::create_dir_all(dir).unwrap();
        for (language, content) in files {
            fs::write(dir.join(format!("{language}.json")), content).unwrap();
        }
        let file_sync = FileSync::new(dir, "*.json").unwrap();
        let preference = MemoryPreference::new(saved.map(str::to_string));
        Localizer::initialize_with(I18nSettings::default(), &file_sync, Box::new(preference))
            .unwrap()
            .0
    }

    #[googletest::test]
    fn empty_directory_gets_seeded_default() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data").join("i18n");

        let localizer = localizer_with(&dir, &[], None);

        expect_that!(localizer.current_language(), eq("en"));
        expect_that!(localizer.resolve("language"), eq("Language"));
        expect_that!(localizer.current_language_name(), eq("English"));
        expect_that!(dir.join("en.json").is_file(), eq(true));
    }

    #[googletest::test]
    fn saved_language_wins_over_default() {
        let temp_dir = TempDir::new().unwrap();

        let localizer =
            localizer_with(temp_dir.path(), &[("en", "{}"), ("pt", "{}")], Some("pt"));

        expect_that!(localizer.current_language(), eq("pt"));
    }

    #[googletest::test]
    fn stale_saved_language_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();

        let localizer =
            localizer_with(temp_dir.path(), &[("en", "{}"), ("pt", "{}")], Some("fr"));

        expect_that!(localizer.current_language(), eq("en"));
    }

    #[googletest::test]
    fn malformed_default_table_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), "{ broken").unwrap();
        let file_sync = FileSync::new(temp_dir.path(), "*.json").unwrap();

        let result = Localizer::initialize_with(
            I18nSettings::default(),
            &file_sync,
            Box::new(MemoryPreference::default()),
        );

        let Err(err) = result else { panic!("expected failure") };
        expect_that!(matches!(err, I18nError::Parse { .. }), eq(true));
    }

    #[googletest::test]
    fn malformed_other_table_is_skipped() {
        let temp_dir = TempDir::new().unwrap();

        let localizer =
            localizer_with(temp_dir.path(), &[("en", r#"{"hello": "Hello"}"#), ("pt", "[")], None);

        expect_that!(localizer.language_codes(), elements_are![eq(&"en")]);
    }

    #[googletest::test]
    fn initialize_reads_settings_from_config_manager() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(crate::config::CONFIG_FILE_NAME),
            r#"{"defaultLanguage": "pt", "translationsDir": "lang", "refreshScope": "languageEntry"}"#,
        )
        .unwrap();
        let mut config = ConfigManager::new();
        config.load_settings(temp_dir.path()).unwrap();

        let mut localizer = Localizer::initialize(&config).unwrap();

        expect_that!(localizer.current_language(), eq("pt"));
        expect_that!(localizer.settings().refresh_scope, eq(RefreshScope::LanguageEntry));
        expect_that!(temp_dir.path().join("lang").join("pt.json").is_file(), eq(true));

        localizer.set_language("pt").unwrap();
        let saved = fs::read_to_string(temp_dir.path().join("save").join("config.json")).unwrap();
        expect_that!(saved, contains_substring("\"i18nLanguage\": \"pt\""));
    }

    #[googletest::test]
    fn switching_changes_substitution() {
        let temp_dir = TempDir::new().unwrap();
        let mut localizer = localizer_with(
            temp_dir.path(),
            &[("en", r#"{"hello": "Hello"}"#), ("pt", r#"{"hello": "Olá"}"#)],
            None,
        );

        localizer.next_language().unwrap();
        expect_that!(localizer.substitute("${hello}!").into_owned(), eq("Olá!"));

        localizer.previous_language().unwrap();
        expect_that!(localizer.substitute("${hello}!").into_owned(), eq("Hello!"));

        expect_that!(localizer.set_language("xx").is_err(), eq(true));
        expect_that!(localizer.current_language(), eq("en"));
    }
}
