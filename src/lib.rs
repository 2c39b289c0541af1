//! Trilingual content synchronization for J/Space projects and tasks.
//!
//! A localized field is stored as a [`LocalizedContent`] (`en`, `uz`, `ja`
//! plus a `translation_locked` flag). Edits arrive as loosely shaped request
//! bodies, are parsed by [`request`], folded into the stored value by
//! [`sync`], and persisted together with flat legacy columns by [`db`].

pub mod api;
pub mod config;
pub mod content;
pub mod db;
pub mod entities;
pub mod i18n;
pub mod legacy;
pub mod request;
pub mod sync;
pub mod translation;

pub use content::{resolve, LocalizedContent};
pub use i18n::Language;
pub use request::{extract_language_updates, LanguageUpdates};
pub use sync::update_field;
pub use translation::{ProviderError, TranslationProvider};
