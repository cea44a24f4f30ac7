//! Translation table input definitions

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use crate::edit;
use crate::error::I18nError;

/// Human-readable name of a language, shown in the language selector.
pub const NAME_KEY: &str = "i18n-name";
/// The language's own code (informational).
pub const CODE_KEY: &str = "i18n-code";
/// Localized label of the options-menu "Language" entry.
pub const LANGUAGE_LABEL_KEY: &str = "language";

/// One language's flat key/value table, together with the file it came from.
///
/// Entries keep the order and JSON type they have in the file; lookups see
/// non-string scalars as their JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTable {
    /// Code derived from the file name.
    language: String,
    file_path: PathBuf,
    /// Key/value pairs in file order, as written in the file.
    values: Map<String, Value>,
    /// JSON text of every non-string value, keyed like `values`.
    scalar_texts: BTreeMap<String, String>,
    /// Text as last read from or written to `file_path`.
    json_text: String,
}

impl TranslationTable {
    /// Parse `json_text` as the table for `language` stored at `file_path`.
    ///
    /// # Errors
    /// `Parse` if the text is not a JSON object of scalar values.
    pub fn parse(
        language: impl Into<String>,
        file_path: impl Into<PathBuf>,
        json_text: impl Into<String>,
    ) -> Result<Self, I18nError> {
        let file_path = file_path.into();
        let json_text = json_text.into();
        let values = parse_flat_document(&json_text).map_err(|message| I18nError::Parse {
            path: file_path.clone(),
            message,
        })?;
        let scalar_texts = scalar_texts(&values);

        Ok(Self { language: language.into(), file_path, values, scalar_texts, json_text })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn json_text(&self) -> &str {
        &self.json_text
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            Value::String(text) => Some(text),
            _ => self.scalar_texts.get(key).map(String::as_str),
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.keys().filter_map(|key| Some((key.as_str(), self.get(key)?)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `i18n-name` entry, if the table declares one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.get(NAME_KEY)
    }

    /// Copy every entry of `source` whose key this table lacks.
    ///
    /// Values are copied verbatim, JSON type included, and appended in
    /// `source` order. The file text is edited in place when the result
    /// reads back as exactly the merged table; otherwise the table is
    /// re-rendered. Returns the keys that were added.
    pub fn backfill_from(&mut self, source: &Self) -> Vec<String> {
        let missing: Vec<(&str, &Value)> = source
            .values
            .iter()
            .filter(|(key, _)| !self.values.contains_key(*key))
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        if missing.is_empty() {
            return Vec::new();
        }

        let mut merged = self.values.clone();
        for (key, value) in &missing {
            merged.insert((*key).to_string(), (*value).clone());
        }

        self.json_text = edit::append_entries_to_json_text(&self.json_text, &missing)
            .filter(|edited| parse_flat_document(edited).is_ok_and(|parsed| parsed == merged))
            .unwrap_or_else(|| {
                tracing::debug!(
                    path = %self.file_path.display(),
                    "Could not edit file text in place, re-rendering table"
                );
                edit::render_entries(&merged)
            });

        let added = missing.iter().map(|(key, _)| (*key).to_string()).collect();
        self.scalar_texts = scalar_texts(&merged);
        self.values = merged;
        added
    }

    /// Write the current file text back to `file_path`.
    ///
    /// # Errors
    /// `Io` if the file cannot be written.
    pub fn save(&self) -> Result<(), I18nError> {
        std::fs::write(&self.file_path, &self.json_text)
            .map_err(|e| I18nError::io(&self.file_path, e))
    }
}

/// Language code of a table file: its base name without extension.
///
/// # Examples
/// - `data/i18n/en.json` → `en`
/// - `data/i18n/pt-BR.json` → `pt-BR`
#[must_use]
pub fn language_from_path(file_path: &Path) -> Option<String> {
    let stem = file_path.file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Parse a flat key/value JSON document.
///
/// Values must be strings, numbers, booleans or null; nested objects and
/// arrays are rejected.
fn parse_flat_document(json_text: &str) -> Result<Map<String, Value>, String> {
    let json: Value =
        serde_json::from_str(json_text).map_err(|e| format!("Failed to parse JSON: {e}"))?;

    let Value::Object(map) = json else {
        return Err("top-level value must be an object".to_string());
    };

    if let Some((key, _)) = map.iter().find(|(_, value)| value.is_object() || value.is_array()) {
        return Err(format!("value of '{key}' must be a string, found a nested value"));
    }

    Ok(map)
}

/// JSON text of the non-string scalars in `values`.
fn scalar_texts(values: &Map<String, Value>) -> BTreeMap<String, String> {
    values
        .iter()
        .filter(|(_, value)| !value.is_string())
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}

/// Load a table file; the language code comes from the file name.
///
/// # Errors
/// Returns error if file read or JSON parse fails.
pub fn load_translation_file(file_path: &Path) -> Result<TranslationTable, I18nError> {
    let language = language_from_path(file_path)
        .ok_or_else(|| I18nError::parse(file_path, "file name is not a valid language code"))?;
    let content = std::fs::read_to_string(file_path).map_err(|e| I18nError::io(file_path, e))?;

    TranslationTable::parse(language, file_path, content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn table(language: &str, json_text: &str) -> TranslationTable {
        TranslationTable::parse(language, format!("/i18n/{language}.json"), json_text).unwrap()
    }

    #[googletest::test]
    fn test_parse_keeps_file_order() {
        let t = table("en", r#"{"zeta": "Z", "alpha": "A", "mid": "M"}"#);

        let keys: Vec<&str> = t.iter().map(|(k, _)| k).collect();
        expect_that!(keys, elements_are![eq(&"zeta"), eq(&"alpha"), eq(&"mid")]);
        expect_that!(t.get("alpha"), some(eq("A")));
        expect_that!(t.len(), eq(3));
    }

    #[googletest::test]
    fn test_parse_non_string_scalars() {
        let t = table("en", r#"{"number": 42, "boolean": true, "null": null}"#);

        expect_that!(t.get("number"), some(eq("42")));
        expect_that!(t.get("boolean"), some(eq("true")));
        expect_that!(t.get("null"), some(eq("null")));
    }

    #[rstest]
    #[case::not_json("{ nope")]
    #[case::array(r#"["a", "b"]"#)]
    #[case::nested_object(r#"{"common": {"hello": "Hello"}}"#)]
    #[case::nested_array(r#"{"items": ["a"]}"#)]
    fn test_parse_rejects_non_flat_documents(#[case] json_text: &str) {
        let result = TranslationTable::parse("en", "/i18n/en.json", json_text);

        let Err(I18nError::Parse { path, .. }) = result else {
            panic!("expected a parse error, got {result:?}");
        };
        assert_eq!(path, PathBuf::from("/i18n/en.json"));
    }

    #[rstest]
    #[case("/game/data/i18n/en.json", Some("en"))]
    #[case("/game/data/i18n/pt-BR.json", Some("pt-BR"))]
    #[case("relative/jp.txt", Some("jp"))]
    #[case("/", None)]
    fn test_language_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(language_from_path(Path::new(path)).as_deref(), expected);
    }

    #[googletest::test]
    fn test_display_name() {
        expect_that!(table("pt", r#"{"i18n-name": "Português"}"#).display_name(), some(eq("Português")));
        expect_that!(table("pt", "{}").display_name(), none());
    }

    #[googletest::test]
    fn test_backfill_appends_missing_keys_in_source_order() {
        let source = table("en", r#"{"i18n-name": "English", "hello": "Hello", "bye": "Bye"}"#);
        let mut target = table("pt", "{\n  \"i18n-name\": \"Português\"\n}");

        let added = target.backfill_from(&source);

        expect_that!(added, elements_are![eq("hello"), eq("bye")]);
        expect_that!(target.get("i18n-name"), some(eq("Português")));
        expect_that!(target.get("hello"), some(eq("Hello")));
        let hello_at = target.json_text().find("\"hello\"").unwrap();
        let bye_at = target.json_text().find("\"bye\"").unwrap();
        expect_that!(hello_at < bye_at, eq(true));
        expect_that!(target.json_text(), contains_substring("  \"i18n-name\": \"Português\""));
    }

    #[googletest::test]
    fn test_backfill_without_missing_keys_leaves_text_alone() {
        let source = table("en", r#"{"hello": "Hello"}"#);
        let mut target = table("pt", r#"{"hello":"Olá","extra":"x"}"#);

        let added = target.backfill_from(&source);

        expect_that!(added, is_empty());
        expect_that!(target.json_text(), eq(r#"{"hello":"Olá","extra":"x"}"#));
    }

    #[googletest::test]
    fn test_backfill_result_reparses_to_same_entries() {
        let source = table("en", r#"{"a": "A", "b": "B"}"#);
        let mut target = table("pt", r#"{"b": "Bê"}"#);

        target.backfill_from(&source);
        let reparsed = table("pt", target.json_text());

        expect_that!(reparsed.get("a"), some(eq("A")));
        expect_that!(reparsed.get("b"), some(eq("Bê")));
        expect_that!(reparsed.len(), eq(2));
    }

    #[googletest::test]
    fn test_backfill_escaped_value_round_trips() {
        let source = table("en", r#"{"quote": "Say \"hi\"\nnow \\ ok"}"#);
        let mut target = table("pt", "{\n  \"x\": \"y\"\n}");

        target.backfill_from(&source);
        let reparsed = table("pt", target.json_text());

        expect_that!(reparsed.get("quote"), some(eq("Say \"hi\"\nnow \\ ok")));
        expect_that!(reparsed.get("x"), some(eq("y")));
    }

    #[googletest::test]
    fn test_backfill_keeps_value_types() {
        let source = table("en", r#"{"count": 3, "ratio": 1.5, "on": true, "none": null}"#);
        let mut target = table("pt", "{}");

        target.backfill_from(&source);

        let written: Value = serde_json::from_str(target.json_text()).unwrap();
        assert_eq!(written, serde_json::json!({"count": 3, "ratio": 1.5, "on": true, "none": null}));
        expect_that!(target.get("ratio"), some(eq("1.5")));
        expect_that!(target.get("none"), some(eq("null")));
    }

    #[googletest::test]
    fn test_load_translation_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("de.json");
        std::fs::write(&path, r#"{"hello": "Hallo"}"#).unwrap();

        let t = load_translation_file(&path).unwrap();

        expect_that!(t.language(), eq("de"));
        expect_that!(t.get("hello"), some(eq("Hallo")));
        expect_that!(t.file_path(), eq(path.as_path()));
    }

    #[googletest::test]
    fn test_save_writes_current_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pt.json");
        std::fs::write(&path, "{}").unwrap();
        let mut t = load_translation_file(&path).unwrap();
        let source = table("en", r#"{"hello": "Hello"}"#);

        t.backfill_from(&source);
        t.save().unwrap();

        let on_disk = load_translation_file(&path).unwrap();
        expect_that!(on_disk.get("hello"), some(eq("Hello")));
    }
}
