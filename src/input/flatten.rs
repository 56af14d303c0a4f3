//! Flattening of nested translation documents into dotted keys.

use std::collections::HashMap;

use thiserror::Error;

use super::document::Document;

/// Separator placed between nested keys and list indexes.
pub const KEY_SEPARATOR: &str = ".";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported value type {kind} at '{key}'")]
pub struct UnsupportedValueType {
    pub key: String,
    pub kind: &'static str,
}

/// Flatten a mapping into a dotted key map.
///
/// Nested mappings contribute `parent.child` keys and lists contribute
/// `parent.<index>` keys. Integers and booleans are rendered as text; floats and
/// nulls are rejected.
///
/// # Examples
/// ```
/// use template_i18n::input::document::Document;
/// use template_i18n::input::flatten::flatten;
///
/// let entries = vec![(
///     "menu".to_string(),
///     Document::List(vec![Document::String("Home".to_string())]),
/// )];
///
/// let flattened = flatten(&entries).unwrap();
/// assert_eq!(flattened.get("menu.0"), Some(&"Home".to_string()));
/// ```
pub fn flatten(entries: &[(String, Document)]) -> Result<HashMap<String, String>, UnsupportedValueType> {
    let mut result = HashMap::new();
    flatten_entries(entries, None, &mut result)?;
    Ok(result)
}

fn flatten_entries(
    entries: &[(String, Document)],
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) -> Result<(), UnsupportedValueType> {
    for (key, value) in entries {
        let full_key = join_key(prefix, key);
        flatten_value(value, &full_key, result)?;
    }
    Ok(())
}

fn flatten_value(
    value: &Document,
    key: &str,
    result: &mut HashMap<String, String>,
) -> Result<(), UnsupportedValueType> {
    match value {
        Document::String(s) => {
            result.insert(key.to_string(), s.clone());
        }
        Document::Integer(i) => {
            result.insert(key.to_string(), i.to_string());
        }
        Document::Bool(b) => {
            result.insert(key.to_string(), b.to_string());
        }
        Document::Map(entries) => flatten_entries(entries, Some(key), result)?,
        Document::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(item, &join_key(Some(key), &index.to_string()), result)?;
            }
        }
        Document::Float(_) | Document::Null => {
            return Err(UnsupportedValueType { key: key.to_string(), kind: value.kind() });
        }
    }
    Ok(())
}

fn join_key(prefix: Option<&str>, key: &str) -> String {
    prefix.map_or_else(|| key.to_string(), |p| format!("{p}{KEY_SEPARATOR}{key}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn entries(json: &str) -> Vec<(String, Document)> {
        match serde_json::from_str::<Document>(json).unwrap() {
            Document::Map(entries) => entries,
            _ => Vec::new(),
        }
    }

    #[googletest::test]
    fn test_flatten_simple() {
        let result = flatten(&entries(r#"{"hello": "Hello", "goodbye": "Goodbye"}"#)).unwrap();

        expect_that!(result.get("hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_nested() {
        let result = flatten(&entries(
            r#"{"common": {"hello": "Hello"}, "errors": {"notFound": "Not found"}}"#,
        ))
        .unwrap();

        expect_that!(result.get("common.hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("errors.notFound"), some(eq(&"Not found".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_lists_use_dotted_indexes() {
        let result =
            flatten(&entries(r#"{"a": {"b": ["zero", "one"]}, "rows": [{"name": "Alice"}]}"#))
                .unwrap();

        expect_that!(result.get("a.b.0"), some(eq(&"zero".to_string())));
        expect_that!(result.get("a.b.1"), some(eq(&"one".to_string())));
        expect_that!(result.get("rows.0.name"), some(eq(&"Alice".to_string())));
    }

    #[googletest::test]
    fn test_flatten_scalars_as_text() {
        let result = flatten(&entries(r#"{"count": 42, "negative": -1, "enabled": false}"#)).unwrap();

        expect_that!(result.get("count"), some(eq(&"42".to_string())));
        expect_that!(result.get("negative"), some(eq(&"-1".to_string())));
        expect_that!(result.get("enabled"), some(eq(&"false".to_string())));
    }

    #[rstest]
    #[case(r#"{"ratio": 0.5}"#, "ratio", "float")]
    #[case(r#"{"a": {"missing": null}}"#, "a.missing", "null")]
    #[case(r#"{"list": ["ok", 1.25]}"#, "list.1", "float")]
    fn flatten_rejects_unsupported_values(
        #[case] json: &str,
        #[case] key: &str,
        #[case] kind: &str,
    ) {
        let result = flatten(&entries(json));

        assert_that!(
            result,
            err(all![
                field!(UnsupportedValueType.key, eq(key)),
                field!(UnsupportedValueType.kind, eq(&kind))
            ])
        );
    }

    #[googletest::test]
    fn test_flatten_empty_mapping() {
        let result = flatten(&[]).unwrap();

        expect_that!(result.is_empty(), eq(true));
    }
}
