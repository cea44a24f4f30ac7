//! In-memory language tables and the current-language pointer.

use crate::error::I18nError;
use crate::input::translation::TranslationTable;
use crate::sync::TranslationTables;

/// Loaded tables plus the language currently shown.
///
/// The language order is the code order of the underlying map, so it is the
/// same on every call for the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    tables: TranslationTables,
    /// Code used by lookups; always a key of `tables` once set through
    /// [`TranslationStore::set_current_language`].
    current_language: String,
}

impl TranslationStore {
    /// Store with `initial_language` as the current language.
    ///
    /// `initial_language` is not checked; lookups against a language that is
    /// not loaded simply find nothing.
    #[must_use]
    pub fn new(tables: TranslationTables, initial_language: impl Into<String>) -> Self {
        Self { tables, current_language: initial_language.into() }
    }

    #[must_use]
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.tables.get(language)?.get(key)
    }

    #[must_use]
    pub fn table(&self, language: &str) -> Option<&TranslationTable> {
        self.tables.get(language)
    }

    /// Table of the current language, if it is loaded.
    #[must_use]
    pub fn current_table(&self) -> Option<&TranslationTable> {
        self.table(&self.current_language)
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    /// # Errors
    /// `UnknownLanguage` if `language` is not loaded; the current language is
    /// left unchanged.
    pub fn set_current_language(&mut self, language: &str) -> Result<(), I18nError> {
        if !self.tables.contains_key(language) {
            return Err(I18nError::UnknownLanguage(language.to_string()));
        }
        self.current_language = language.to_string();
        Ok(())
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Loaded language codes in their fixed cyclic order.
    #[must_use]
    pub fn language_codes(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Name to show for `language`: its `i18n-name` entry, else the code.
    #[must_use]
    pub fn display_name<'a>(&'a self, language: &'a str) -> &'a str {
        self.table(language).and_then(TranslationTable::display_name).unwrap_or(language)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
