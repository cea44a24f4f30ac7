//! Console host for the localization library.
//!
//! Loads the translations of the game root given as the first argument and
//! reads commands from stdin:
//!
//! ```text
//! :lang <code>   switch language
//! :next / :prev  cycle through languages
//! :options       show the options window entries
//! :languages     list loaded languages
//! <text>         print <text> with ${key} placeholders substituted
//! ```

use std::io::{
    self,
    BufRead,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use game_i18n::Localizer;
use game_i18n::config::ConfigManager;
use game_i18n::host::{
    self,
    LANGUAGE_SYMBOL,
    MenuCommand,
    SET_LANGUAGE_COMMAND,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // ログは標準出力と混ざらないよう stderr へ
    let (writer, _guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(writer)
        .init();

    let game_root = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut config = ConfigManager::new();
    if let Err(err) = config.load_settings(&game_root) {
        tracing::error!("Failed to load settings: {err}");
        return ExitCode::FAILURE;
    }

    let mut localizer = match Localizer::initialize(&config) {
        Ok(localizer) => localizer,
        Err(err) => {
            tracing::error!("Failed to initialize translations: {err}");
            return ExitCode::FAILURE;
        }
    };
    localizer.on_refresh(|request| {
        tracing::debug!(language = %request.language, scope = ?request.scope, "Redraw requested");
    });

    match run(&mut localizer, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` directives as given, else `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Process stdin lines until end of input.
fn run(localizer: &mut Localizer, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match line.split_once(' ').unwrap_or((line.as_str(), "")) {
            (":lang", code) => {
                let args = serde_json::json!({ "language": code.trim() });
                if let Err(err) = host::execute_command(localizer, SET_LANGUAGE_COMMAND, &args) {
                    writeln!(out, "{err}")?;
                }
            }
            (":next", _) => {
                host::cursor_right(localizer, LANGUAGE_SYMBOL);
            }
            (":prev", _) => {
                host::cursor_left(localizer, LANGUAGE_SYMBOL);
            }
            (":options", _) => print_options(localizer, &mut out)?,
            (":languages", _) => {
                for code in localizer.language_codes() {
                    let marker = if code == localizer.current_language() { '*' } else { ' ' };
                    writeln!(out, "{marker} {code}\t{}", localizer.store().display_name(code))?;
                }
            }
            _ => writeln!(out, "{}", host::display_text(localizer, &line))?,
        }
    }
    Ok(())
}

/// Print the options window as the host would draw it.
fn print_options(localizer: &Localizer, out: &mut impl Write) -> io::Result<()> {
    let mut commands = Vec::<MenuCommand>::new();
    host::make_options_command_list(localizer, &mut commands);
    for command in &commands {
        let status = host::status_text(localizer, &command.symbol).unwrap_or_default();
        writeln!(out, "{}\t{status}", command.name)?;
    }
    Ok(())
}
