//! Data read from disk: translation tables and the saved language choice.

pub mod preference;
pub mod translation;
