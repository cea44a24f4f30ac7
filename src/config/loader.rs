//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
};

/// ゲームルート直下の設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".game-i18n.json";

/// 設定ファイルのパス
#[must_use]
pub fn settings_path(game_root: &Path) -> PathBuf {
    game_root.join(CONFIG_FILE_NAME)
}

/// ゲームルートから設定を読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない（デフォルト設定を使う）
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_game_root(game_root: &Path) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = settings_path(game_root);

    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "No i18n configuration file, using defaults");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), ?settings, "Loaded i18n configuration");

    Ok(Some(settings))
}
