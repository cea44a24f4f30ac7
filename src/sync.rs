//! Keeps the language files on disk consistent with the default table.
//!
//! Startup runs three steps in order: make sure the default table exists,
//! load every table in the directory, then back-fill keys missing from the
//! non-default tables and write those tables back.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};
use ignore::WalkBuilder;
use serde_json::{
    Map,
    Value,
};

use crate::edit;
use crate::error::I18nError;
use crate::input::translation::{
    CODE_KEY,
    LANGUAGE_LABEL_KEY,
    NAME_KEY,
    TranslationTable,
    load_translation_file,
};

/// Tables keyed by language code, in code order.
pub type TranslationTables = BTreeMap<String, TranslationTable>;

/// Seed content written when the default table does not exist yet.
#[must_use]
pub fn default_seed(default_language: &str) -> Map<String, Value> {
    let mut seed = Map::new();
    seed.insert(CODE_KEY.to_string(), Value::String(default_language.to_string()));
    seed.insert(NAME_KEY.to_string(), Value::String("English".to_string()));
    seed.insert(LANGUAGE_LABEL_KEY.to_string(), Value::String("Language".to_string()));
    seed
}

/// Result of [`FileSync::load_all`].
#[derive(Debug, Default)]
pub struct LoadedTables {
    pub tables: TranslationTables,
    /// Files that were skipped, with the reason.
    pub skipped: Vec<I18nError>,
}

/// A table that received back-filled keys during [`FileSync::sync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedTable {
    pub language: String,
    pub file_path: PathBuf,
    pub added_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updated: Vec<UpdatedTable>,
}

impl SyncReport {
    /// Number of files written by the pass.
    #[must_use]
    pub fn written_files(&self) -> usize {
        self.updated.len()
    }
}

/// File-level operations on the translations directory.
#[derive(Debug, Clone)]
pub struct FileSync {
    /// Directory holding one file per language.
    dir: PathBuf,
    /// Matched against file names.
    file_pattern: GlobMatcher,
}

impl FileSync {
    /// # Errors
    /// `InvalidPattern` if `file_pattern` is not a valid glob.
    pub fn new(dir: impl Into<PathBuf>, file_pattern: &str) -> Result<Self, I18nError> {
        let glob = Glob::new(file_pattern).map_err(|e| I18nError::InvalidPattern {
            pattern: file_pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { dir: dir.into(), file_pattern: glob.compile_matcher() })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `language`.
    #[must_use]
    pub fn table_path(&self, language: &str) -> PathBuf {
        self.dir.join(format!("{language}.json"))
    }

    /// Create the directory and the default table if they are missing.
    ///
    /// Returns `true` if the table file was created.
    ///
    /// # Errors
    /// `Io` if the directory or file cannot be created.
    pub fn ensure_default_table(
        &self,
        default_language: &str,
        seed: &Map<String, Value>,
    ) -> Result<bool, I18nError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| I18nError::io(&self.dir, e))?;

        let path = self.table_path(default_language);
        if path.exists() {
            return Ok(false);
        }

        std::fs::write(&path, edit::render_entries(seed)).map_err(|e| I18nError::io(&path, e))?;
        tracing::info!(path = %path.display(), "Default language file created");

        Ok(true)
    }

    /// Read every table file in the directory.
    ///
    /// Files are visited in name order. A file that cannot be read or parsed
    /// is skipped with a warning and listed in [`LoadedTables::skipped`].
    ///
    /// # Errors
    /// `Io` if the directory itself cannot be read.
    pub fn load_all(&self) -> Result<LoadedTables, I18nError> {
        let mut loaded = LoadedTables::default();

        for path in self.find_table_files()? {
            match load_translation_file(&path) {
                Ok(table) => {
                    tracing::debug!(
                        language = table.language(),
                        keys = table.len(),
                        "Loaded translation table"
                    );
                    loaded.tables.insert(table.language().to_string(), table);
                }
                Err(err) => {
                    tracing::warn!("Skipping translation file: {err}");
                    loaded.skipped.push(err);
                }
            }
        }

        Ok(loaded)
    }

    /// Files in `dir` matching the pattern, sorted by name.
    fn find_table_files(&self) -> Result<Vec<PathBuf>, I18nError> {
        // a missing directory is an error, not an empty walk
        std::fs::read_dir(&self.dir).map_err(|e| I18nError::io(&self.dir, e))?;

        let mut found_files = Vec::new();
        for result in WalkBuilder::new(&self.dir)
            .max_depth(Some(1))
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(file_name) = entry.path().file_name() else {
                continue;
            };
            if !self.file_pattern.is_match(file_name) {
                continue;
            }

            found_files.push(entry.path().to_path_buf());
        }

        Ok(found_files)
    }

    /// Copy keys present in the default table but missing from any other
    /// table, then write each changed table back to its file.
    ///
    /// Running it again without outside changes writes nothing.
    ///
    /// # Errors
    /// - `UnknownLanguage` if `tables` has no default table
    /// - `Io` if a changed table cannot be written
    pub fn sync(
        &self,
        default_language: &str,
        tables: &mut TranslationTables,
    ) -> Result<SyncReport, I18nError> {
        let default_table = tables
            .get(default_language)
            .cloned()
            .ok_or_else(|| I18nError::UnknownLanguage(default_language.to_string()))?;

        let mut report = SyncReport::default();
        for (language, table) in tables.iter_mut() {
            if language == default_language {
                continue;
            }

            let added_keys = table.backfill_from(&default_table);
            if added_keys.is_empty() {
                continue;
            }

            table.save()?;
            tracing::info!(
                path = %table.file_path().display(),
                added = added_keys.len(),
                "Updated language file"
            );
            report.updated.push(UpdatedTable {
                language: language.clone(),
                file_path: table.file_path().to_path_buf(),
                added_keys,
            });
        }

        Ok(report)
    }
}
