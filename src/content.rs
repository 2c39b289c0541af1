//! The trilingual value stored for every localized field.

use crate::i18n::Language;
use serde::{Deserialize, Deserializer, Serialize};

/// One field's text in all three content languages.
///
/// Every slot is always a string; "no content" is the empty string. When
/// `translation_locked` is set, the synchronizer never overwrites a slot
/// with machine translation again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedContent {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub en: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uz: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ja: String,
    #[serde(default)]
    pub translation_locked: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl LocalizedContent {
    /// All slots empty, unlocked.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Place `text` in the slot for `lang` (aliases accepted), leaving the
    /// other two slots empty and the value unlocked.
    pub fn from_single_language(text: impl Into<String>, lang: &str) -> Self {
        let mut content = Self::empty();
        content.set(Language::normalize(lang), text);
        content
    }

    /// Read one slot.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Uz => &self.uz,
            Language::Ja => &self.ja,
        }
    }

    /// Overwrite one slot.
    pub fn set(&mut self, lang: Language, text: impl Into<String>) {
        let text = text.into();
        match lang {
            Language::En => self.en = text,
            Language::Uz => self.uz = text,
            Language::Ja => self.ja = text,
        }
    }

    /// True when every slot is the empty string.
    pub fn is_empty(&self) -> bool {
        Language::ALL.iter().all(|lang| self.get(*lang).is_empty())
    }

    /// Pick one display string for a viewer; see [`resolve`].
    pub fn resolve(&self, preferred: Language) -> &str {
        resolve(self, preferred)
    }
}

/// Pick one display string for a viewer.
///
/// Returns the preferred slot if non-empty, otherwise the first non-empty
/// slot in the fixed order en, uz, ja, otherwise `""`.
pub fn resolve(content: &LocalizedContent, preferred: Language) -> &str {
    let wanted = content.get(preferred);
    if !wanted.is_empty() {
        return wanted;
    }

    Language::ALL
        .iter()
        .map(|lang| content.get(*lang))
        .find(|text| !text.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(en: &str, uz: &str, ja: &str) -> LocalizedContent {
        LocalizedContent {
            en: en.to_string(),
            uz: uz.to_string(),
            ja: ja.to_string(),
            translation_locked: false,
        }
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_empty() {
        let empty = LocalizedContent::empty();
        assert_eq!(empty, content("", "", ""));
        assert!(!empty.translation_locked);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_from_single_language_places_text() {
        let value = LocalizedContent::from_single_language("Salom", "uz");
        assert_eq!(value, content("", "Salom", ""));
    }

    #[test]
    fn test_from_single_language_normalizes_jp() {
        let value = LocalizedContent::from_single_language("会議", "jp");
        assert_eq!(value.ja, "会議");
        assert_eq!(value.en, "");
        assert!(!value.translation_locked);
    }

    #[test]
    fn test_from_single_language_unknown_goes_to_english() {
        let value = LocalizedContent::from_single_language("Hello", "de");
        assert_eq!(value, content("Hello", "", ""));
    }

    #[test]
    fn test_get_and_set() {
        let mut value = LocalizedContent::empty();
        value.set(Language::Ja, "タスク");
        assert_eq!(value.get(Language::Ja), "タスク");
        assert!(!value.is_empty());
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_preferred_slot() {
        let value = content("Meeting", "Yig'ilish", "会議");
        assert_eq!(resolve(&value, Language::Uz), "Yig'ilish");
        assert_eq!(value.resolve(Language::Ja), "会議");
    }

    #[test]
    fn test_resolve_fallback_order() {
        assert_eq!(resolve(&content("", "X", "Y"), Language::En), "X");
        assert_eq!(resolve(&content("", "", "Y"), Language::Uz), "Y");
        assert_eq!(resolve(&content("", "", ""), Language::En), "");
    }

    #[test]
    fn test_resolve_falls_back_to_english_before_uzbek() {
        assert_eq!(resolve(&content("E", "U", ""), Language::Ja), "E");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(content("a", "b", "c")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"en": "a", "uz": "b", "ja": "c", "translation_locked": false})
        );
    }

    #[test]
    fn test_deserialize_fills_missing_slots() {
        let value: LocalizedContent = serde_json::from_str(r#"{"ja": "会議"}"#).unwrap();
        assert_eq!(value, content("", "", "会議"));
        assert!(!value.translation_locked);
    }

    #[test]
    fn test_deserialize_null_slot_is_empty_string() {
        let value: LocalizedContent =
            serde_json::from_str(r#"{"en": null, "uz": "x", "ja": "", "translation_locked": true}"#)
                .unwrap();
        assert_eq!(value.en, "");
        assert_eq!(value.uz, "x");
        assert!(value.translation_locked);
    }
}
