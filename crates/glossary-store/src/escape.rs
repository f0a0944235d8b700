//! Injection-safe binding of user-supplied values into SPARQL query text.
//!
//! Every search term, letter, URI, and language code passes through this
//! module before it is embedded in a query. Literals are backslash-escaped
//! for single-quoted SPARQL strings, regex patterns additionally escape
//! their metacharacters, and URIs and language codes are validated rather
//! than escaped — anything that does not validate is rejected as
//! `Error::InvalidInput`.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use glossary_core::{Error, Result};

static LANGUAGE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("valid regex")
});

/// Escape a value for embedding inside a single-quoted SPARQL literal.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for embedding inside a quoted `regex()` pattern.
///
/// Regex metacharacters are escaped first, then the result is
/// literal-escaped so the SPARQL string parser hands the regex engine a
/// single level of backslashes.
pub fn escape_regex(value: &str) -> String {
    escape_literal(&regex::escape(value))
}

/// Validate a language tag (`en`, `de-AT`, ...). Returns the tag unchanged.
pub fn validate_language(language: &str) -> Result<&str> {
    if LANGUAGE_TAG.is_match(language) {
        Ok(language)
    } else {
        Err(Error::InvalidInput(format!(
            "invalid language tag: {language:?}"
        )))
    }
}

/// Validate an absolute URI for embedding inside `<...>`.
///
/// Rejects relative references and any character that would terminate or
/// confuse the IRIREF production (`< > " { } | ^ \``, backslash,
/// whitespace, control characters).
pub fn validate_uri(uri: &str) -> Result<&str> {
    if uri.chars().any(|c| {
        c.is_whitespace()
            || c.is_control()
            || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
    }) {
        return Err(Error::InvalidInput(format!(
            "URI contains forbidden characters: {uri:?}"
        )));
    }
    match Url::parse(uri) {
        Ok(_) => Ok(uri),
        Err(_) => Err(Error::InvalidInput(format!("not an absolute URI: {uri:?}"))),
    }
}
