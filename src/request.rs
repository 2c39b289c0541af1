//! Extraction of per-language edits from loosely shaped request bodies.
//!
//! Clients in the field send a localized field under several historical
//! names (`title_en`, `titleEn`, `title_jp`, bare `title`, ...). This module
//! turns any of those shapes into a [`LanguageUpdates`], keeping "key
//! absent" distinct from "key present with an empty string".

use crate::i18n::Language;
use serde_json::{Map, Value};

/// A partial set of per-language values.
///
/// `None` means the language was not mentioned; `Some("")` is an explicit
/// clear of that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageUpdates {
    pub en: Option<String>,
    pub uz: Option<String>,
    pub ja: Option<String>,
}

impl LanguageUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for callers constructing updates in code.
    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    pub fn get(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::En => self.en.as_deref(),
            Language::Uz => self.uz.as_deref(),
            Language::Ja => self.ja.as_deref(),
        }
    }

    pub fn set(&mut self, lang: Language, text: impl Into<String>) {
        let text = Some(text.into());
        match lang {
            Language::En => self.en = text,
            Language::Uz => self.uz = text,
            Language::Ja => self.ja = text,
        }
    }

    /// Languages present in this update, in slot order.
    pub fn changed_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|lang| self.get(*lang).is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.changed_languages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The only present slot, if exactly one language is present.
    pub fn single(&self) -> Option<(Language, &str)> {
        match self.changed_languages().as_slice() {
            [lang] => self.get(*lang).map(|text| (*lang, text)),
            _ => None,
        }
    }
}

/// Field-name variants accepted for one language, in priority order.
pub fn alias_keys(prefix: &str, lang: Language) -> Vec<String> {
    match lang {
        Language::En => vec![format!("{prefix}_en"), format!("{prefix}En")],
        Language::Uz => vec![format!("{prefix}_uz"), format!("{prefix}Uz")],
        Language::Ja => vec![
            format!("{prefix}_ja"),
            format!("{prefix}Ja"),
            format!("{prefix}_jp"),
            format!("{prefix}Jp"),
        ],
    }
}

/// Value under the first of `keys` present in the object.
///
/// The first present key decides: a `null` or non-string value there makes
/// the language absent rather than falling through to a lower alias.
fn first_present<'a>(object: &'a Map<String, Value>, keys: &[String]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| object.get(key))
        .and_then(Value::as_str)
}

/// Per-language updates for one field, and how the body named them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdates {
    pub updates: LanguageUpdates,
    /// True when only the bare `field_prefix` key was given.
    pub bare: bool,
}

/// Parse the updates a body carries for `field_prefix`.
///
/// Returns `None` when the body does not mention the field at all; the
/// caller must then leave the field untouched. A bare `field_prefix` string
/// is only honored when no language-suffixed key yields a value, and is
/// taken as English.
pub fn parse_field_updates(body: &Value, field_prefix: &str) -> Option<FieldUpdates> {
    let object = body.as_object()?;

    let mut updates = LanguageUpdates::new();
    for lang in Language::ALL {
        if let Some(text) = first_present(object, &alias_keys(field_prefix, lang)) {
            updates.set(lang, text);
        }
    }
    if !updates.is_empty() {
        return Some(FieldUpdates {
            updates,
            bare: false,
        });
    }

    let text = object.get(field_prefix).and_then(Value::as_str)?;
    Some(FieldUpdates {
        updates: updates.with(Language::En, text),
        bare: true,
    })
}

/// Extract the per-language updates a body carries for `field_prefix`.
pub fn extract_language_updates(body: &Value, field_prefix: &str) -> Option<LanguageUpdates> {
    parse_field_updates(body, field_prefix).map(|field| field.updates)
}

/// The creation-time source language, if the body names one.
pub fn extract_source_language(body: &Value) -> Option<&str> {
    ["sourceLang", "source_lang"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
}

/// Whether the body asks for auto-translation; defaults to `true`.
pub fn extract_auto_translate(body: &Value) -> bool {
    ["autoTranslate", "auto_translate"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_bool))
        .unwrap_or(true)
}
