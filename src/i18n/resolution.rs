//! Viewer language resolution.
//!
//! Picks the one language a request should be answered in. Sources are
//! passed in explicitly; nothing here reads ambient state.

use crate::i18n::Language;
use axum::http::HeaderMap;

/// Custom header carrying a bare language code.
pub const LANGUAGE_HEADER: &str = "x-language";

/// The language hints available for one request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageRequest<'a> {
    /// Explicit override supplied by the caller (e.g. `?lang=ja`)
    pub explicit: Option<&'a str>,

    /// Raw header value (`X-Language: jp` or `Accept-Language: ja-JP,ja;q=0.9`)
    pub header: Option<&'a str>,

    /// Preference stored on the user's profile
    pub user_preference: Option<&'a str>,
}

impl<'a> LanguageRequest<'a> {
    /// Build a request from an optional override and the request headers.
    ///
    /// `X-Language` takes precedence over `Accept-Language`.
    pub fn from_headers(explicit: Option<&'a str>, headers: &'a HeaderMap) -> Self {
        let header = header_value(headers, LANGUAGE_HEADER)
            .or_else(|| header_value(headers, axum::http::header::ACCEPT_LANGUAGE.as_str()));

        Self {
            explicit: explicit.filter(|value| !value.trim().is_empty()),
            header,
            user_preference: None,
        }
    }

    /// Attach a stored user preference.
    pub fn with_user_preference(mut self, preference: Option<&'a str>) -> Self {
        self.user_preference = preference;
        self
    }
}

/// A usable header value: present, valid UTF-8 and not blank.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// Determine the effective language for a request.
///
/// Priority: explicit override, then header, then stored preference, then
/// English. The first source that is present wins and is normalized, so an
/// unrecognized explicit value resolves to English rather than falling
/// through to the header.
pub fn get_user_language(request: &LanguageRequest<'_>) -> Language {
    if let Some(explicit) = request.explicit {
        return Language::normalize(explicit);
    }
    if let Some(header) = request.header {
        return Language::normalize(primary_tag(header));
    }
    if let Some(preference) = request.user_preference {
        return Language::normalize(preference);
    }
    Language::default_language()
}

/// Extract the primary subtag of the first entry in a language header.
///
/// `"ja-JP,ja;q=0.9,en;q=0.8"` yields `"ja"`; a bare `"jp"` yields `"jp"`.
fn primary_tag(header: &str) -> &str {
    header
        .split(',')
        .next()
        .and_then(|entry| entry.split(';').next())
        .and_then(|tag| tag.split(['-', '_']).next())
        .map(str::trim)
        .unwrap_or("")
}
