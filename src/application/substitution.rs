// Placeholder substitution over rendered dashboard templates
use crate::domain::placeholder::PlaceholderTokens;
use crate::error::Result;
use serde_json::{Map, Value};

/// How placeholders are replaced in the rendered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SubstitutionMode {
    /// Replace markers in the serialized JSON text. Values are not escaped.
    #[default]
    Literal,
    /// Replace markers inside string leaves and keys, then re-serialize.
    Tree,
}

/// Replace every known `${name}` marker in `json` with its token value
pub fn substitute(json: &str, tokens: &PlaceholderTokens, mode: SubstitutionMode) -> Result<String> {
    match mode {
        SubstitutionMode::Literal => Ok(replace_markers(json, tokens)),
        SubstitutionMode::Tree => {
            let document: Value = serde_json::from_str(json)?;
            Ok(serde_json::to_string_pretty(&walk(document, tokens))?)
        }
    }
}

/// Single left-to-right pass, so inserted values are never re-expanded.
/// Unknown markers are copied through unchanged.
pub fn replace_markers(text: &str, tokens: &PlaceholderTokens) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => match tokens.get(&after[..end]) {
                Some(value) => {
                    result.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    result.push_str("${");
                    rest = after;
                }
            },
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

fn walk(value: Value, tokens: &PlaceholderTokens) -> Value {
    match value {
        Value::String(s) => Value::String(replace_markers(&s, tokens)),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| walk(v, tokens)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (replace_markers(&k, tokens), walk(v, tokens)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
