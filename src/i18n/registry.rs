//! Language registry: Single source of truth for the three content languages.
//!
//! The registry holds the metadata for every language a `LocalizedContent`
//! carries a slot for, including the historical aliases older clients still
//! send (`jp` for Japanese). It is initialized once via `OnceLock` and is
//! immutable thereafter.

use crate::i18n::Language;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language this entry describes
    pub language: Language,

    /// Canonical ISO 639-1 code (e.g., "en", "uz", "ja")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language
    pub native_name: &'static str,

    /// Alternate codes accepted on input and normalized onto `code`
    pub aliases: &'static [&'static str],

    /// Suffix of the flat legacy column (`ja` is stored as `_jp`)
    pub legacy_suffix: &'static str,

    /// Whether unrecognized input falls back to this language (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code or one of its aliases.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the code or alias is known
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        let code = code.trim();
        self.languages.iter().find(|lang| {
            lang.code.eq_ignore_ascii_case(code)
                || lang.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(code))
        })
    }

    /// Get the configuration for a language.
    pub fn config_for(&self, language: Language) -> &LanguageConfig {
        // Every Language variant has an entry in default_languages()
        self.languages
            .iter()
            .find(|lang| lang.language == language)
            .unwrap_or(&self.languages[0])
    }

    /// Get all languages in slot order (en, uz, ja).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if zero or several defaults are defined (a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }
}

/// Default language configurations: English (default), Uzbek, Japanese.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            language: Language::En,
            code: "en",
            name: "English",
            native_name: "English",
            aliases: &[],
            legacy_suffix: "en",
            is_default: true,
        },
        LanguageConfig {
            language: Language::Uz,
            code: "uz",
            name: "Uzbek",
            native_name: "Oʻzbekcha",
            aliases: &[],
            legacy_suffix: "uz",
            is_default: false,
        },
        LanguageConfig {
            language: Language::Ja,
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            aliases: &["jp"],
            legacy_suffix: "jp",
            is_default: false,
        },
    ]
}
