//! Runtime language changes.

use crate::config::RefreshScope;
use crate::error::I18nError;
use crate::input::preference::LanguagePreference;
use crate::store::TranslationStore;

/// Sent to refresh hooks after the language changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRequest<'a> {
    /// The language now current.
    pub language: &'a str,
    pub scope: RefreshScope,
}

/// Host callback that recomputes visible text.
pub type RefreshHook = Box<dyn FnMut(&RefreshRequest<'_>)>;

/// Direction of a cyclic step through the language list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Applies language changes to a [`TranslationStore`], remembers the choice
/// and tells the host to redraw.
pub struct LanguageSwitcher {
    /// Where the choice is saved.
    preference: Box<dyn LanguagePreference>,
    /// Passed through to every [`RefreshRequest`].
    refresh_scope: RefreshScope,
    /// Run in registration order.
    refresh_hooks: Vec<RefreshHook>,
}

impl std::fmt::Debug for LanguageSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageSwitcher")
            .field("preference", &self.preference)
            .field("refresh_scope", &self.refresh_scope)
            .field("refresh_hooks", &self.refresh_hooks.len())
            .finish()
    }
}

impl LanguageSwitcher {
    #[must_use]
    pub fn new(preference: Box<dyn LanguagePreference>, refresh_scope: RefreshScope) -> Self {
        Self { preference, refresh_scope, refresh_hooks: Vec::new() }
    }

    /// Language saved by a previous session, if any.
    #[must_use]
    pub fn saved_language(&self) -> Option<String> {
        self.preference.load()
    }

    /// Register a callback run after every successful change.
    pub fn on_refresh(&mut self, hook: impl FnMut(&RefreshRequest<'_>) + 'static) {
        self.refresh_hooks.push(Box::new(hook));
    }

    /// Make `language` current, save the choice and request a redraw.
    ///
    /// A failed save is logged and does not undo the switch.
    ///
    /// # Errors
    /// `UnknownLanguage` if `language` is not loaded; nothing changes.
    pub fn set_language(
        &mut self,
        store: &mut TranslationStore,
        language: &str,
    ) -> Result<(), I18nError> {
        if let Err(err) = store.set_current_language(language) {
            tracing::error!("{err}");
            return Err(err);
        }

        if let Err(err) = self.preference.save(language) {
            tracing::warn!("Failed to save language choice: {err}");
        }
        tracing::info!(language, "Language set");

        let request = RefreshRequest { language, scope: self.refresh_scope };
        for hook in &mut self.refresh_hooks {
            hook(&request);
        }
        Ok(())
    }

    /// Switch to the language after the current one, wrapping around.
    ///
    /// # Errors
    /// See [`Self::set_language`].
    pub fn next_language(&mut self, store: &mut TranslationStore) -> Result<(), I18nError> {
        self.step(store, Direction::Next)
    }

    /// Switch to the language before the current one, wrapping around.
    ///
    /// # Errors
    /// See [`Self::set_language`].
    pub fn previous_language(&mut self, store: &mut TranslationStore) -> Result<(), I18nError> {
        self.step(store, Direction::Previous)
    }

    /// Move one position in `direction`; a no-op with fewer than two languages.
    fn step(
        &mut self,
        store: &mut TranslationStore,
        direction: Direction,
    ) -> Result<(), I18nError> {
        let Some(target) =
            cyclic_neighbor(&store.language_codes(), store.current_language(), direction)
        else {
            return Ok(());
        };
        self.set_language(store, &target)
    }
}

/// Neighbour of `current` in `codes`, wrapping at both ends.
///
/// `None` when there is nothing to switch to (fewer than two codes). A
/// `current` missing from `codes` steps to the first code going forward and
/// to the last going backward.
#[must_use]
pub fn cyclic_neighbor(codes: &[&str], current: &str, direction: Direction) -> Option<String> {
    if codes.len() < 2 {
        return None;
    }

    let len = codes.len();
    let index = match (codes.iter().position(|code| *code == current), direction) {
        (Some(i), Direction::Next) => (i + 1) % len,
        (Some(i), Direction::Previous) => (i + len - 1) % len,
        (None, Direction::Next) => 0,
        (None, Direction::Previous) => len - 1,
    };
    codes.get(index).map(|code| (*code).to_string())
}
