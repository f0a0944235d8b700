//! Label utilities: whitespace normalization, slugs, definition cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(" +").expect("valid regex"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new("-+").expect("valid regex"));

/// Trim a label and collapse internal space runs to single spaces.
pub fn normalize_label(label: &str) -> String {
    SPACE_RUNS.replace_all(label.trim(), " ").into_owned()
}

/// Trim a definition; empty input yields an empty string.
pub fn clean_definition(definition: &str) -> String {
    definition.trim().to_string()
}

/// Fold one lowercased character to its ASCII slug form.
///
/// Accented letters map to their base letter, umlauts to `<letter>e`, and
/// ligatures to their expanded pair (`æ` → `ae`, `ß` → `sz`).
fn fold_char(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'á' | 'â' | 'ã' => "a",
        'è' | 'é' | 'ê' => "e",
        'ì' | 'í' | 'î' => "i",
        'ò' | 'ó' | 'ô' | 'õ' => "o",
        'ù' | 'ú' | 'û' => "u",
        'ý' => "y",
        'ñ' => "n",
        'ç' => "c",
        'ä' => "ae",
        'ë' => "ee",
        'ï' => "ie",
        'ö' => "oe",
        'ü' => "ue",
        'ÿ' => "ye",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "sz",
        _ => return None,
    })
}

/// Convert a string to a slug, for use in URLs or CSS classes.
///
/// Lowercases, folds accented letters to ASCII, replaces every remaining
/// character outside `[a-z0-9-]` with a dash, collapses dash runs, and
/// strips a trailing dash.
pub fn slugify(string: &str) -> String {
    let mut folded = String::with_capacity(string.len());
    for c in string.trim().to_lowercase().chars() {
        match fold_char(c) {
            Some(ascii) => folded.push_str(ascii),
            None if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' => folded.push(c),
            None => folded.push('-'),
        }
    }
    let collapsed = DASH_RUNS.replace_all(&folded, "-");
    collapsed
        .strip_suffix('-')
        .unwrap_or(collapsed.as_ref())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label_collapses_spaces() {
        assert_eq!(normalize_label("  Cat   food  "), "Cat food");
        assert_eq!(normalize_label("Cat"), "Cat");
    }

    #[test]
    fn test_normalize_label_only_touches_spaces() {
        // Tabs are not space runs; only literal spaces collapse.
        assert_eq!(normalize_label("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_clean_definition() {
        assert_eq!(clean_definition("  a small mammal  "), "a small mammal");
        assert_eq!(clean_definition("   "), "");
        assert_eq!(clean_definition(""), "");
    }

    #[test]
    fn test_slugify_plain() {
        assert_eq!(slugify("Cat food"), "cat-food");
        assert_eq!(slugify("  HTTP 2.0  "), "http-2-0");
    }

    #[test]
    fn test_slugify_accents() {
        assert_eq!(slugify("Señor café"), "senor-cafe");
        assert_eq!(slugify("Käse"), "kaese");
        assert_eq!(slugify("Über"), "ueber");
        assert_eq!(slugify("Straße"), "strasze");
        assert_eq!(slugify("Œuvre"), "oeuvre");
    }

    #[test]
    fn test_slugify_collapses_and_trims_dashes() {
        assert_eq!(slugify("cat & dog!"), "cat-dog");
        assert_eq!(slugify("trailing? "), "trailing");
    }

    #[test]
    fn test_slugify_unmapped_unicode_becomes_dash() {
        assert_eq!(slugify("smørrebrød"), "sm-rrebr-d");
    }
}
