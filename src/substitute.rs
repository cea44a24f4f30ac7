//! `${key}` placeholder substitution.
//!
//! Every display string goes through [`substitute`] before it reaches the
//! screen, so both functions are pure and never fail: an unresolved key is
//! shown as the bare key.

use std::borrow::Cow;

use crate::store::TranslationStore;

/// Opening delimiter of a placeholder.
const OPEN: &str = "${";
/// Closing delimiter of a placeholder.
const CLOSE: char = '}';

/// Translation of `key` in the current language, or `key` itself.
#[must_use]
pub fn resolve<'a>(store: &'a TranslationStore, key: &'a str) -> &'a str {
    store.get(store.current_language(), key).unwrap_or(key)
}

/// Replace every `${key}` in `text` with [`resolve`]`(key)`.
///
/// Placeholders do not nest and are matched left to right; the key is
/// everything up to the first `}`. An opening `${` without a closing brace
/// is left as is. Text without placeholders is returned borrowed.
#[must_use]
pub fn substitute<'t>(store: &TranslationStore, text: &'t str) -> Cow<'t, str> {
    if !text.contains(OPEN) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, after_open)) = rest.split_once(OPEN) {
        let Some((key, after_close)) = after_open.split_once(CLOSE) else {
            break;
        };
        out.push_str(before);
        out.push_str(resolve(store, key));
        rest = after_close;
    }
    out.push_str(rest);

    Cow::Owned(out)
}
