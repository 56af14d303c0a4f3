//! Finds translation references in template source.
//!
//! Two call shapes are recognised:
//!
//! - filters: `{{ "Some key"|trans }}` (any filter arguments after `trans` are ignored)
//! - blocks: `{% trans "en" %}Some key{% endtrans %}`, where the body is the key
//!
//! Keys that are only known at render time are reported as [`Reference::Dynamic`].

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static FILTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\{\{-?\s*(?P<subject>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|[^|}"']+?)\s*\|\s*trans\b"#,
    )
    .expect("filter pattern is valid")
});

#[allow(clippy::expect_used)]
static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\{%-?\s*trans\b(?P<arg>[^%]*?)-?%\}(?P<body>.*?)\{%-?\s*endtrans\s*-?%\}",
    )
    .expect("block pattern is valid")
});

/// A translation reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A literal key.
    Key(String),
    /// A key computed at render time; the expression is kept for diagnostics.
    Dynamic(String),
}

/// Every translation reference in `source`, filters first, each in source order.
#[must_use]
pub fn scan(source: &str) -> Vec<Reference> {
    let filters = FILTER_PATTERN.captures_iter(source).filter_map(|captures| {
        let subject = captures.name("subject")?.as_str().trim();
        Some(string_literal(subject).map_or_else(
            || Reference::Dynamic(subject.to_string()),
            Reference::Key,
        ))
    });

    let blocks = BLOCK_PATTERN.captures_iter(source).filter_map(|captures| {
        let arg = captures.name("arg")?.as_str().trim();
        let body = captures.name("body")?.as_str();
        Some(block_reference(arg, body))
    });

    filters.chain(blocks).collect()
}

fn block_reference(arg: &str, body: &str) -> Reference {
    // A string argument names the language and the body is the key; anything else
    // is an expression producing the key.
    if string_literal(arg).is_none() {
        return Reference::Dynamic(arg.to_string());
    }
    if body.contains("{{") || body.contains("{%") {
        return Reference::Dynamic(body.to_string());
    }
    Reference::Key(body.to_string())
}

/// Contents of a single- or double-quoted template string, unescaped.
fn string_literal(token: &str) -> Option<String> {
    let quote = token.chars().next().filter(|c| matches!(c, '"' | '\''))?;
    let inner = token.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(escaped) => value.push(escaped),
                None => value.push('\\'),
            }
        } else {
            value.push(c);
        }
    }
    Some(value)
}
