//! Legacy bridge between `LocalizedContent` and the flat per-language
//! columns older clients still read (`<field>_en`, `<field>_uz`, `<field>_jp`).
//!
//! The flat columns are a derived copy: every write of a localized value
//! rewrites all three, and they are never edited on their own.

use crate::content::LocalizedContent;
use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// The three legacy columns of one localized field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMirror {
    pub en: String,
    pub uz: String,
    /// Japanese lives under the historical `jp` suffix.
    pub jp: String,
}

impl LegacyMirror {
    /// Mirror a localized value into flat columns.
    pub fn from_content(content: &LocalizedContent) -> Self {
        Self {
            en: content.en.clone(),
            uz: content.uz.clone(),
            jp: content.ja.clone(),
        }
    }

    /// Mirror read back from nullable columns; `NULL` reads as empty.
    pub fn from_columns(en: Option<String>, uz: Option<String>, jp: Option<String>) -> Self {
        Self {
            en: en.unwrap_or_default(),
            uz: uz.unwrap_or_default(),
            jp: jp.unwrap_or_default(),
        }
    }

    /// Promote flat columns to a localized value.
    ///
    /// Pre-migration rows never went through the synchronizer, so the result
    /// is unlocked.
    pub fn to_content(&self) -> LocalizedContent {
        LocalizedContent {
            en: self.en.clone(),
            uz: self.uz.clone(),
            ja: self.jp.clone(),
            translation_locked: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.uz.is_empty() && self.jp.is_empty()
    }
}

/// Name of the legacy column holding `lang` for `field`.
pub fn legacy_column(field: &str, lang: Language) -> String {
    format!("{}_{}", field, lang.legacy_suffix())
}

/// The three legacy column names for `field`, in slot order.
pub fn column_names(field: &str) -> [String; 3] {
    Language::ALL.map(|lang| legacy_column(field, lang))
}

/// The value readers should see for a field.
///
/// The JSONB value wins unless it is missing or entirely empty, in which
/// case the legacy columns are promoted.
pub fn effective_content(
    stored: Option<&LocalizedContent>,
    legacy: &LegacyMirror,
) -> LocalizedContent {
    match stored {
        Some(content) if !content.is_empty() => content.clone(),
        Some(content) if legacy.is_empty() => content.clone(),
        _ => legacy.to_content(),
    }
}
