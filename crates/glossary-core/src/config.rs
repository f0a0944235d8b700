//! Glossary configuration.
//!
//! Constructed once per glossary instance and read-only afterwards; the one
//! exception is the precomputed a-z availability table, which is recomputed
//! on demand and handed back for persistence by an external collaborator.

use std::collections::HashMap;
use std::time::Duration;

use crate::defaults;
use crate::models::CharacterAvailability;

/// Glossary languages allowed for one site language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMapping {
    /// Ordered; the first entry is the fallback for this site language.
    pub glossary_languages: Vec<String>,
}

impl LanguageMapping {
    pub fn new<S: Into<String>>(glossary_languages: impl IntoIterator<Item = S>) -> Self {
        Self {
            glossary_languages: glossary_languages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Settings feeding canonical concept URL construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSettings {
    /// Site base URL without trailing slash, e.g. `https://example.com`.
    pub base_url: String,
    /// Optional language path prefix of the active site language.
    pub language_prefix: Option<String>,
    /// Glossary base path, e.g. `glossary`.
    pub base_path: String,
    /// The active site language.
    pub site_language: String,
    /// The site's default language, used for glossary-language fallback.
    pub default_site_language: String,
}

impl Default for UrlSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            language_prefix: None,
            base_path: "glossary".to_string(),
            site_language: defaults::DEFAULT_LANGUAGE.to_string(),
            default_site_language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Advanced settings; currently only the persisted a-z availability table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedSettings {
    pub char_a_z: Option<CharacterAvailability>,
}

/// Configuration of one glossary instance.
#[derive(Debug, Clone)]
pub struct GlossaryConfig {
    /// SPARQL endpoint URL. `None` means the store is unavailable and all
    /// read operations degrade to empty results.
    pub endpoint_url: Option<String>,
    /// Supported languages in priority order; the first is the default.
    pub languages: Vec<String>,
    /// Site language → allowed glossary languages.
    pub language_mapping: HashMap<String, LanguageMapping>,
    pub url: UrlSettings,
    pub advanced: AdvancedSettings,
    /// Timeout applied to store round trips.
    pub query_timeout: Duration,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            languages: vec![defaults::DEFAULT_LANGUAGE.to_string()],
            language_mapping: HashMap::new(),
            url: UrlSettings::default(),
            advanced: AdvancedSettings::default(),
            query_timeout: Duration::from_secs(defaults::QUERY_TIMEOUT_SECS),
        }
    }
}

impl GlossaryConfig {
    /// Create a configuration pointing at a SPARQL endpoint.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Self::default()
        }
    }

    /// Set the supported languages. The first entry becomes the default;
    /// an empty list falls back to the built-in default language.
    pub fn languages<S: Into<String>>(mut self, languages: impl IntoIterator<Item = S>) -> Self {
        self.languages = languages.into_iter().map(Into::into).collect();
        if self.languages.is_empty() {
            self.languages.push(defaults::DEFAULT_LANGUAGE.to_string());
        }
        self
    }

    /// Map a site language onto its allowed glossary languages.
    pub fn map_language(mut self, site_language: impl Into<String>, mapping: LanguageMapping) -> Self {
        self.language_mapping.insert(site_language.into(), mapping);
        self
    }

    /// Set the URL composition settings.
    pub fn url_settings(mut self, url: UrlSettings) -> Self {
        self.url = url;
        self
    }

    /// Set the store round-trip timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// The default glossary language (first configured language).
    pub fn default_language(&self) -> &str {
        self.languages
            .first()
            .map(String::as_str)
            .unwrap_or(defaults::DEFAULT_LANGUAGE)
    }

    /// Identity key for the instance registry: two configurations with the
    /// same key share one cached glossary instance.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.endpoint_url.as_deref().unwrap_or("-"),
            self.url.base_url,
            self.url.base_path,
            self.languages.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_first_configured() {
        let config = GlossaryConfig::new("http://localhost:8890/sparql").languages(["de", "en"]);
        assert_eq!(config.default_language(), "de");
    }

    #[test]
    fn test_empty_language_list_falls_back() {
        let config = GlossaryConfig::default().languages(Vec::<String>::new());
        assert_eq!(config.default_language(), "en");
    }

    #[test]
    fn test_cache_key_distinguishes_endpoints() {
        let a = GlossaryConfig::new("http://one/sparql");
        let b = GlossaryConfig::new("http://two/sparql");
        assert_ne!(a.cache_key(), b.cache_key());

        let c = GlossaryConfig::new("http://one/sparql");
        assert_eq!(a.cache_key(), c.cache_key());
    }
}
