//! プラグインコマンドの実行
//!
//! イベントスクリプトなどホスト側から名前付きで呼び出されるコマンドを処理します。

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::I18nError;
use crate::localizer::Localizer;

/// 言語切り替えコマンド名
pub const SET_LANGUAGE_COMMAND: &str = "setLanguage";

/// コマンド実行時のエラー
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments for {command}: {source}")]
    InvalidArguments {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Language(#[from] I18nError),
}

/// `setLanguage` コマンドの引数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetLanguageArgs {
    /// 切り替え先の言語コード
    language: String,
}

/// 名前付きコマンドを実行
///
/// # Arguments
/// * `name` - コマンド名 (例: "setLanguage")
/// * `args` - コマンド引数 (例: `{"language": "pt"}`)
#[allow(clippy::single_match_else)] // コマンドが増える可能性を考慮
pub fn execute_command(
    localizer: &mut Localizer,
    name: &str,
    args: &Value,
) -> Result<(), CommandError> {
    tracing::debug!(command = %name, "Execute command");

    match name {
        SET_LANGUAGE_COMMAND => {
            let parsed: SetLanguageArgs = parse_args(name, args)?;
            tracing::debug!(language = %parsed.language, "Executing setLanguage");
            localizer.set_language(&parsed.language)?;
            Ok(())
        }
        _ => {
            tracing::warn!("Unknown command: {name}");
            Err(CommandError::UnknownCommand(name.to_string()))
        }
    }
}

/// 引数オブジェクトをコマンドごとの型に変換
fn parse_args<T: DeserializeOwned>(command: &str, args: &Value) -> Result<T, CommandError> {
    T::deserialize(args).map_err(|source| {
        tracing::warn!("Invalid arguments for {command}: {source}");
        CommandError::InvalidArguments { command: command.to_string(), source }
    })
}
