//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 設定とゲームルートを保持する
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: I18nSettings,

    /// ゲームのルートパス（翻訳ディレクトリと保存ファイルの基準）
    game_root: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// デフォルト設定で作成（ルートはカレントディレクトリ）
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default(), game_root: PathBuf::from(".") }
    }

    /// ゲームルートの設定ファイルを読み込む
    ///
    /// ファイルがなければデフォルト設定を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, game_root: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let game_root = game_root.into();
        tracing::debug!("Loading settings for game root: {:?}", game_root);

        let settings = loader::load_from_game_root(&game_root)?.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.game_root = game_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    /// ゲームルートを取得
    #[must_use]
    pub fn game_root(&self) -> &Path {
        &self.game_root
    }

    /// 翻訳ファイルのディレクトリ
    #[must_use]
    pub fn translations_dir(&self) -> PathBuf {
        self.game_root.join(&self.current_settings.translations_dir)
    }

    /// 言語選択を保存するファイル（保存が無効なら `None`）
    #[must_use]
    pub fn preference_file(&self) -> Option<PathBuf> {
        let preference = &self.current_settings.preference;
        preference.enabled.then(|| self.game_root.join(&preference.file))
    }
}
