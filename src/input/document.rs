//! Format-independent parsed document.

use std::fmt;

use serde::de::{
    self,
    Deserialize,
    Deserializer,
    MapAccess,
    SeqAccess,
    Visitor,
};

/// A value parsed from a JSON, YAML or TOML translation file.
///
/// Mappings keep the order in which the parser yielded their entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Document>),
    Map(Vec<(String, Document)>),
}

impl Document {
    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }

    /// Looks up a direct child of a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

/// Builds a [`Document`] from whatever the underlying format reports.
struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a translation document value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Document, E> {
        Ok(Document::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Document, E> {
        Ok(Document::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Document, E> {
        i64::try_from(value)
            .map(Document::Integer)
            .map_err(|_| E::custom(format!("integer {value} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Document, E> {
        Ok(Document::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Document, E> {
        Ok(Document::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Document, E> {
        Ok(Document::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        Document::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        // Keys must deserialize as strings; anything else fails with the format's own error.
        while let Some((key, value)) = map.next_entry::<String, Document>()? {
            entries.push((key, value));
        }
        Ok(Document::Map(entries))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn deserialize_json_keeps_every_variant() {
        let document: Document = serde_json::from_str(
            r#"{"s": "text", "i": -3, "b": true, "f": 1.5, "n": null, "l": ["a", 1]}"#,
        )
        .unwrap();

        assert_that!(document.get("s"), some(eq(&Document::String("text".to_string()))));
        assert_that!(document.get("i"), some(eq(&Document::Integer(-3))));
        assert_that!(document.get("b"), some(eq(&Document::Bool(true))));
        assert_that!(document.get("f"), some(eq(&Document::Float(1.5))));
        assert_that!(document.get("n"), some(eq(&Document::Null)));
        assert_that!(
            document.get("l"),
            some(eq(&Document::List(vec![
                Document::String("a".to_string()),
                Document::Integer(1)
            ])))
        );
    }

    #[rstest]
    fn deserialize_yaml_preserves_mapping_order() {
        let document: Document = serde_yaml::from_str("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();

        let Document::Map(entries) = document else {
            panic!("expected a mapping");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_that!(keys, elements_are![eq(&"zeta"), eq(&"alpha"), eq(&"mid")]);
    }

    #[rstest]
    fn deserialize_toml_tables() {
        let document: Document = toml::from_str("[lang.en]\ngreeting = \"hi\"\n").unwrap();

        let greeting = document.get("lang").and_then(|l| l.get("en")).and_then(|e| e.get("greeting"));
        assert_that!(greeting, some(eq(&Document::String("hi".to_string()))));
    }

    #[rstest]
    #[case(Document::Null, "null")]
    #[case(Document::Float(0.5), "float")]
    #[case(Document::Map(vec![]), "mapping")]
    fn kind_names(#[case] document: Document, #[case] expected: &str) {
        assert_that!(document.kind(), eq(expected));
    }
}
