//! game-i18n
//!
//! ゲーム向けの実行時テキストローカライズ: 言語ごとの翻訳テーブル、
//! `${key}` プレースホルダーの置換、実行中の言語切り替え

pub mod config;
pub mod edit;
pub mod error;
pub mod host;
pub mod input;
pub mod localizer;
pub mod store;
pub mod substitute;
pub mod switcher;
pub mod sync;

pub use error::I18nError;
pub use localizer::Localizer;
pub use store::TranslationStore;
pub use switcher::{
    LanguageSwitcher,
    RefreshRequest,
};
pub use sync::FileSync;
