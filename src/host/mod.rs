//! Hook points where a game engine hands its text to the localizer.
//!
//! Each function mirrors one extension point of the host: it either
//! rewrites the host's data or, for symbols it does not own, returns
//! `None`/`false` so the host runs its own behaviour.

/// Plugin command dispatch
mod command;
/// Options window entry
mod options;

use std::borrow::Cow;

pub use command::{
    CommandError,
    SET_LANGUAGE_COMMAND,
    execute_command,
};
pub use options::{
    LANGUAGE_SYMBOL,
    config_value,
    cursor_left,
    cursor_right,
    make_options_command_list,
    set_config_value,
    status_text,
};

use crate::localizer::Localizer;

/// One entry of a host command window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand {
    /// Label shown to the player; may contain `${key}` placeholders.
    pub name: String,
    /// Identifier the host dispatches on.
    pub symbol: String,
    pub enabled: bool,
}

impl MenuCommand {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into(), enabled: true }
    }
}

/// Message text before it is shown.
#[must_use]
pub fn display_text<'t>(localizer: &Localizer, text: &'t str) -> Cow<'t, str> {
    localizer.substitute(text)
}

/// Actor or entity name before it is shown.
#[must_use]
pub fn actor_name<'t>(localizer: &Localizer, name: &'t str) -> Cow<'t, str> {
    localizer.substitute(name)
}

/// Rewrite every label of a freshly built command list.
pub fn localize_commands(localizer: &Localizer, commands: &mut [MenuCommand]) {
    for command in commands {
        if let Cow::Owned(name) = localizer.substitute(&command.name) {
            command.name = name;
        }
    }
}
