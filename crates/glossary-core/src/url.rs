//! Canonical concept URL composition with glossary-language fallback.

use crate::config::GlossaryConfig;
use crate::defaults;

/// Builds language- and site-prefix-aware canonical URLs for concepts.
///
/// When the active site language has no glossary-language mapping, or the
/// requested glossary language is not among the mapped ones, the composer
/// substitutes the first glossary language configured for the site's
/// default language, falling back to the literal `en` if even that is
/// absent.
pub struct UrlComposer<'a> {
    config: &'a GlossaryConfig,
}

impl<'a> UrlComposer<'a> {
    pub fn new(config: &'a GlossaryConfig) -> Self {
        Self { config }
    }

    /// Resolve the glossary language actually used in the URL.
    pub fn resolve_glossary_language(&self, requested: &str) -> String {
        let mapping = &self.config.language_mapping;
        let site_languages = mapping
            .get(&self.config.url.site_language)
            .map(|m| m.glossary_languages.as_slice())
            .unwrap_or(&[]);

        if site_languages.iter().any(|l| l == requested) {
            return requested.to_string();
        }

        mapping
            .get(&self.config.url.default_site_language)
            .and_then(|m| m.glossary_languages.first())
            .cloned()
            .unwrap_or_else(|| defaults::FALLBACK_GLOSSARY_LANGUAGE.to_string())
    }

    /// Compose the canonical URL for a concept.
    ///
    /// Shape: base URL + optional language prefix + glossary base path +
    /// `/<glossary language>/<label>?uri=<uri>`. Label and URI are
    /// percent-encoded.
    pub fn compose(&self, uri: &str, label: &str, glossary_language: &str) -> String {
        let language = self.resolve_glossary_language(glossary_language);
        let url = &self.config.url;

        let mut out = format!("{}/", url.base_url.trim_end_matches('/'));
        if let Some(prefix) = url.language_prefix.as_deref() {
            if !prefix.is_empty() {
                out.push_str(prefix);
                out.push('/');
            }
        }
        out.push_str(&url.base_path);
        out.push('/');
        out.push_str(&language);
        out.push('/');
        out.push_str(&urlencoding::encode(label));
        out.push_str("?uri=");
        out.push_str(&urlencoding::encode(uri));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LanguageMapping, UrlSettings};

    fn config() -> GlossaryConfig {
        GlossaryConfig::new("http://localhost:8890/sparql")
            .languages(["en", "de"])
            .map_language("en", LanguageMapping::new(["en", "de"]))
            .url_settings(UrlSettings {
                base_url: "https://example.com".to_string(),
                language_prefix: None,
                base_path: "glossary".to_string(),
                site_language: "fr".to_string(),
                default_site_language: "en".to_string(),
            })
    }

    #[test]
    fn test_fallback_to_default_site_language_mapping() {
        // Site language "fr" has no mapping; default "en" maps to
        // ["en", "de"]; requesting "es" resolves to "en".
        let config = config();
        let composer = UrlComposer::new(&config);
        assert_eq!(composer.resolve_glossary_language("es"), "en");
    }

    #[test]
    fn test_requested_language_kept_when_mapped() {
        let mut config = config();
        config.url.site_language = "en".to_string();
        let composer = UrlComposer::new(&config);
        assert_eq!(composer.resolve_glossary_language("de"), "de");
    }

    #[test]
    fn test_fallback_to_literal_en_without_any_mapping() {
        let mut config = config();
        config.language_mapping.clear();
        let composer = UrlComposer::new(&config);
        assert_eq!(composer.resolve_glossary_language("de"), "en");
    }

    #[test]
    fn test_compose_shape() {
        let config = config();
        let composer = UrlComposer::new(&config);
        let url = composer.compose("http://example.com/concepts/1", "Cat food", "es");
        assert_eq!(
            url,
            "https://example.com/glossary/en/Cat%20food?uri=http%3A%2F%2Fexample.com%2Fconcepts%2F1"
        );
    }

    #[test]
    fn test_compose_with_language_prefix() {
        let mut config = config();
        config.url.language_prefix = Some("fr".to_string());
        let composer = UrlComposer::new(&config);
        let url = composer.compose("http://example.com/concepts/1", "Chat", "en");
        assert!(url.starts_with("https://example.com/fr/glossary/en/Chat?uri="));
    }
}
