//! Formatting-preserving edits of translation files.

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::{
    CstInputValue,
    CstRootNode,
};
use serde_json::{
    Map,
    Value,
};

/// Append `entries` to the top-level object of `json_text` using CST so the
/// existing indentation, ordering and comments survive.
///
/// Returns `None` if the text cannot be parsed. String values are only
/// quote-escaped by the CST writer, so callers should read the result back
/// before trusting it.
#[must_use]
pub fn append_entries_to_json_text(json_text: &str, entries: &[(&str, &Value)]) -> Option<String> {
    let root = CstRootNode::parse(json_text, &ParseOptions::default()).ok()?;
    let root_obj = root.object_value_or_set();

    for (key, value) in entries {
        root_obj.append(key, cst_input(value));
    }

    Some(root.to_string())
}

/// Convert a JSON value to its CST input form, keeping its type.
fn cst_input(value: &Value) -> CstInputValue {
    match value {
        Value::Null => CstInputValue::Null,
        Value::Bool(b) => CstInputValue::Bool(*b),
        Value::Number(n) => CstInputValue::Number(n.to_string()),
        Value::String(s) => CstInputValue::String(s.clone()),
        Value::Array(items) => CstInputValue::Array(items.iter().map(cst_input).collect()),
        Value::Object(map) => CstInputValue::Object(
            map.iter().map(|(key, value)| (key.clone(), cst_input(value))).collect(),
        ),
    }
}

/// Render a table from scratch as two-space indented JSON.
#[must_use]
pub fn render_entries(entries: &Map<String, Value>) -> String {
    format!("{:#}", Value::Object(entries.clone()))
}
