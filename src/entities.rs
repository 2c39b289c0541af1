//! Projects and tasks: the entities that own localized fields, and the
//! create / patch pipeline that runs request bodies through the parser and
//! the synchronizer.

use crate::content::LocalizedContent;
use crate::i18n::Language;
use crate::request::{
    extract_auto_translate, extract_language_updates, extract_source_language, parse_field_updates,
};
use crate::sync::update_field;
use crate::translation::{translate, TranslationProvider};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub const PROJECT_NAME: &str = "name";
pub const TASK_TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: LocalizedContent,
    pub description: LocalizedContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: LocalizedContent,
    pub description: LocalizedContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Localized fields of a project, as written to storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectContent {
    pub name: LocalizedContent,
    pub description: LocalizedContent,
}

/// Localized fields of a task, as written to storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskContent {
    pub title: LocalizedContent,
    pub description: LocalizedContent,
}

/// Seed a localized field when its owning entity is created.
///
/// A single value (bare or language-suffixed) goes through the initial
/// translation: a bare value is read in `sourceLang`, a suffixed one in its
/// own language. Several language values are stored as given and locked.
/// A field absent from the body is empty.
pub async fn create_field(
    provider: &dyn TranslationProvider,
    body: &Value,
    field: &str,
) -> LocalizedContent {
    let Some(parsed) = parse_field_updates(body, field) else {
        return LocalizedContent::empty();
    };

    match parsed.updates.single() {
        Some((lang, text)) => {
            let source = if parsed.bare {
                extract_source_language(body).unwrap_or(Language::En.code())
            } else {
                lang.code()
            };
            translate(provider, text, source).await
        }
        None => update_field(provider, None, &parsed.updates, false).await,
    }
}

/// Apply a partial update to one localized field.
///
/// Returns `None` when the body does not mention the field, in which case
/// the stored value must be left alone.
pub async fn patch_field(
    provider: &dyn TranslationProvider,
    existing: &LocalizedContent,
    body: &Value,
    field: &str,
) -> Option<LocalizedContent> {
    let updates = extract_language_updates(body, field)?;
    let auto_translate = extract_auto_translate(body);
    Some(update_field(provider, Some(existing), &updates, auto_translate).await)
}

impl ProjectContent {
    pub async fn create(provider: &dyn TranslationProvider, body: &Value) -> Self {
        let (name, description) = futures::join!(
            create_field(provider, body, PROJECT_NAME),
            create_field(provider, body, DESCRIPTION),
        );
        Self { name, description }
    }

    /// The project's fields after applying `body`, or `None` if the body
    /// touches none of them.
    pub async fn patch(&self, provider: &dyn TranslationProvider, body: &Value) -> Option<Self> {
        let (name, description) = futures::join!(
            patch_field(provider, &self.name, body, PROJECT_NAME),
            patch_field(provider, &self.description, body, DESCRIPTION),
        );
        if name.is_none() && description.is_none() {
            return None;
        }
        Some(Self {
            name: name.unwrap_or_else(|| self.name.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
        })
    }
}

impl TaskContent {
    pub async fn create(provider: &dyn TranslationProvider, body: &Value) -> Self {
        let (title, description) = futures::join!(
            create_field(provider, body, TASK_TITLE),
            create_field(provider, body, DESCRIPTION),
        );
        Self { title, description }
    }

    /// The task's fields after applying `body`, or `None` if the body
    /// touches none of them.
    pub async fn patch(&self, provider: &dyn TranslationProvider, body: &Value) -> Option<Self> {
        let (title, description) = futures::join!(
            patch_field(provider, &self.title, body, TASK_TITLE),
            patch_field(provider, &self.description, body, DESCRIPTION),
        );
        if title.is_none() && description.is_none() {
            return None;
        }
        Some(Self {
            title: title.unwrap_or_else(|| self.title.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
        })
    }
}

impl Project {
    pub fn content(&self) -> ProjectContent {
        ProjectContent {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn view(&self, lang: Language) -> ProjectView {
        ProjectView {
            id: self.id,
            language: lang,
            name: self.name.resolve(lang).to_string(),
            description: self.description.resolve(lang).to_string(),
            name_i18n: self.name.clone(),
            description_i18n: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Task {
    pub fn content(&self) -> TaskContent {
        TaskContent {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    pub fn view(&self, lang: Language) -> TaskView {
        TaskView {
            id: self.id,
            project_id: self.project_id,
            language: lang,
            title: self.title.resolve(lang).to_string(),
            description: self.description.resolve(lang).to_string(),
            title_i18n: self.title.clone(),
            description_i18n: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A project as one viewer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: i64,
    pub language: Language,
    pub name: String,
    pub description: String,
    pub name_i18n: LocalizedContent,
    pub description_i18n: LocalizedContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task as one viewer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub project_id: i64,
    pub language: Language,
    pub title: String,
    pub description: String,
    pub title_i18n: LocalizedContent,
    pub description_i18n: LocalizedContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
