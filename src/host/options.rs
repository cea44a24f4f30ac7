//! The "Language" entry of the host's options window.

use super::{
    MenuCommand,
    localize_commands,
};
use crate::input::translation::LANGUAGE_LABEL_KEY;
use crate::localizer::Localizer;

/// Symbol of the appended options entry.
pub const LANGUAGE_SYMBOL: &str = "language";

/// Localize the host's options commands and append the language entry.
///
/// The entry is only added when `addLanguageMenu` is enabled.
pub fn make_options_command_list(localizer: &Localizer, commands: &mut Vec<MenuCommand>) {
    localize_commands(localizer, commands);
    if localizer.settings().add_language_menu {
        let label = localizer.resolve(LANGUAGE_LABEL_KEY).to_string();
        commands.push(MenuCommand::new(label, LANGUAGE_SYMBOL));
    }
}

/// Current value of an options entry owned by the localizer.
#[must_use]
pub fn config_value<'a>(localizer: &'a Localizer, symbol: &str) -> Option<&'a str> {
    (symbol == LANGUAGE_SYMBOL).then(|| localizer.current_language())
}

/// Store a value into an options entry.
///
/// Returns `false` when `symbol` belongs to the host. An unknown language
/// code is logged and ignored.
pub fn set_config_value(localizer: &mut Localizer, symbol: &str, value: &str) -> bool {
    if symbol != LANGUAGE_SYMBOL {
        return false;
    }
    // rejected codes are already logged by the switcher
    let _ = localizer.set_language(value);
    true
}

/// Text drawn on the right of the entry: the current language's name.
#[must_use]
pub fn status_text(localizer: &Localizer, symbol: &str) -> Option<String> {
    (symbol == LANGUAGE_SYMBOL).then(|| localizer.current_language_name().to_string())
}

pub fn cursor_left(localizer: &mut Localizer, symbol: &str) -> bool {
    if symbol != LANGUAGE_SYMBOL {
        return false;
    }
    let _ = localizer.previous_language();
    true
}

pub fn cursor_right(localizer: &mut Localizer, symbol: &str) -> bool {
    if symbol != LANGUAGE_SYMBOL {
        return false;
    }
    let _ = localizer.next_language();
    true
}
