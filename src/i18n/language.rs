//! Language type: the closed set of content languages.
//!
//! Every `LocalizedContent` has exactly one slot per `Language`. Metadata
//! (names, aliases, legacy column suffix) lives in the registry; this type
//! only carries identity and the alias-aware constructors.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A content language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Uz,
    #[serde(alias = "jp")]
    Ja,
}

impl Language {
    /// All languages in slot order. Fallback and iteration order depend on it.
    pub const ALL: [Language; 3] = [Language::En, Language::Uz, Language::Ja];

    /// Create a Language from a code string, accepting aliases (`jp`).
    ///
    /// # Returns
    /// * `Ok(Language)` if the code or alias is known
    /// * `Err` if the code is not recognized
    ///
    /// # Example
    /// ```ignore
    /// let japanese = Language::from_code("jp")?;
    /// assert_eq!(japanese, Language::Ja);
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(config.language),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Normalize any language code onto a Language.
    ///
    /// Unlike `from_code`, this never fails: unrecognized input resolves to
    /// the registry's default language (English).
    pub fn normalize(code: &str) -> Language {
        Self::from_code(code).unwrap_or_else(|_| Self::default_language())
    }

    /// The language unrecognized input falls back to.
    pub fn default_language() -> Language {
        LanguageRegistry::get().default_language().language
    }

    /// Get the canonical ISO 639-1 code ("en", "uz", "ja").
    pub fn code(&self) -> &'static str {
        self.config().code
    }

    /// Get the full language configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get().config_for(*self)
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Suffix used by the flat legacy columns (`jp` for Japanese).
    pub fn legacy_suffix(&self) -> &'static str {
        self.config().legacy_suffix
    }

    /// The two other languages, in slot order.
    pub fn others(&self) -> [Language; 2] {
        match self {
            Language::En => [Language::Uz, Language::Ja],
            Language::Uz => [Language::En, Language::Ja],
            Language::Ja => [Language::En, Language::Uz],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_canonical() {
        assert_eq!(Language::from_code("en").unwrap(), Language::En);
        assert_eq!(Language::from_code("uz").unwrap(), Language::Uz);
        assert_eq!(Language::from_code("ja").unwrap(), Language::Ja);
    }

    #[test]
    fn test_from_code_jp_alias() {
        assert_eq!(Language::from_code("jp").unwrap(), Language::Ja);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== normalize Tests ====================

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(Language::normalize("jp"), Language::Ja);
        assert_eq!(Language::normalize("ja"), Language::Ja);
        assert_eq!(Language::normalize("uz"), Language::Uz);
    }

    #[test]
    fn test_normalize_unknown_defaults_to_english() {
        assert_eq!(Language::normalize("ru"), Language::En);
        assert_eq!(Language::normalize(""), Language::En);
        assert_eq!(Language::normalize("japanese"), Language::En);
    }

    // ==================== Metadata Tests ====================

    #[test]
    fn test_codes_and_names() {
        assert_eq!(Language::Ja.code(), "ja");
        assert_eq!(Language::Ja.name(), "Japanese");
        assert_eq!(Language::Uz.name(), "Uzbek");
        assert_eq!(Language::En.native_name(), "English");
    }

    #[test]
    fn test_legacy_suffix() {
        assert_eq!(Language::En.legacy_suffix(), "en");
        assert_eq!(Language::Uz.legacy_suffix(), "uz");
        assert_eq!(Language::Ja.legacy_suffix(), "jp");
    }

    #[test]
    fn test_others_excludes_self_in_slot_order() {
        assert_eq!(Language::En.others(), [Language::Uz, Language::Ja]);
        assert_eq!(Language::Uz.others(), [Language::En, Language::Ja]);
        assert_eq!(Language::Ja.others(), [Language::En, Language::Uz]);
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Language::Ja.to_string(), "ja");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serde_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Ja).unwrap(), "\"ja\"");
        let parsed: Language = serde_json::from_str("\"uz\"").unwrap();
        assert_eq!(parsed, Language::Uz);
    }

    #[test]
    fn test_serde_accepts_jp_alias() {
        let parsed: Language = serde_json::from_str("\"jp\"").unwrap();
        assert_eq!(parsed, Language::Ja);
    }
}
