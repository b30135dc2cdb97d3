use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::DataRecord;

/// Structural fields never shown in hover labels.
const EXCLUDED_LABEL_FIELDS: [&str; 5] = ["x", "y", "ix", "bookstack", "tile_key"];

/// Substring marking internal dictionary-index columns.
const DICTIONARY_INDEX_MARKER: &str = "_dict_index";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelFormat {
    /// One `key: value` line per field.
    #[default]
    PlainText,
    /// `<strong>key</strong>: value<br />` per field, HTML-escaped.
    Html,
}

/// Fields of `record` that belong in its label, in record order.
///
/// With `include`, only the named fields are listed and their values are
/// shown as-is. Without it, structural fields, dictionary-index columns and
/// null or empty-string values are skipped.
#[must_use]
pub fn label_fields<'a>(
    record: &'a DataRecord,
    include: Option<&[String]>,
) -> Vec<(&'a str, &'a Value)> {
    record
        .iter()
        .filter(|(name, value)| match include {
            Some(include) => include.iter().any(|wanted| wanted == name),
            None => is_default_label_field(name, value),
        })
        .collect()
}

fn is_default_label_field(name: &str, value: &Value) -> bool {
    if EXCLUDED_LABEL_FIELDS.contains(&name) || name.contains(DICTIONARY_INDEX_MARKER) {
        return false;
    }
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

#[must_use]
pub fn format_label_text(
    record: &DataRecord,
    include: Option<&[String]>,
    format: LabelFormat,
) -> String {
    let fields = label_fields(record, include);
    match format {
        LabelFormat::PlainText => fields
            .into_iter()
            .map(|(name, value)| format!("{name}: {}", value_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        LabelFormat::Html => {
            let mut output = String::new();
            for (name, value) in fields {
                output.push_str("<strong>");
                output.push_str(&escape_html(name));
                output.push_str("</strong>: ");
                output.push_str(&escape_html(&value_text(value)));
                output.push_str("<br />");
            }
            output
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
