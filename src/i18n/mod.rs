//! Internationalization (i18n) module for the three content languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages, their aliases
//!   and legacy column suffixes
//! - `language`: The closed `Language` type with alias-aware constructors
//! - `resolution`: Picks a viewer's effective language from request hints
//! - `metrics`: Translation observability counters
//!
//! # Example
//!
//! ```rust,ignore
//! use jspace_content::i18n::{get_user_language, Language, LanguageRequest};
//!
//! assert_eq!(Language::normalize("jp"), Language::Ja);
//!
//! let request = LanguageRequest { explicit: Some("uz"), ..Default::default() };
//! assert_eq!(get_user_language(&request), Language::Uz);
//! ```

mod language;
mod metrics;
mod registry;
mod resolution;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolution::{get_user_language, LanguageRequest, LANGUAGE_HEADER};
