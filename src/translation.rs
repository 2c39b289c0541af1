use crate::config::Config;
use crate::content::LocalizedContent;
use crate::i18n::{Language, TranslationMetrics};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Failure of a single provider call. Never escapes `translate_or_fallback`.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("translation response contained no choices")]
    EmptyResponse,

    #[error("translation provider is not configured")]
    Unsupported,
}

/// A machine translation backend.
///
/// Calls are independent: no ordering guarantees, no retries.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, ProviderError>;
}

/// Build the provider described by the configuration.
///
/// Without an API key every call fails with `Unsupported`, so all target
/// slots degrade to the source text.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn TranslationProvider>> {
    match &config.openai_api_key {
        Some(api_key) => Ok(Arc::new(OpenAiTranslator::new(
            api_key.clone(),
            config.openai_model.clone(),
            config.openai_api_url.clone(),
            Duration::from_secs(config.translation_timeout_secs),
        )?)),
        None => {
            warn!("OPENAI_API_KEY not set, machine translation disabled");
            Ok(Arc::new(NoopTranslator))
        }
    }
}

/// Provider used when translation is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTranslator;

#[async_trait]
impl TranslationProvider for NoopTranslator {
    async fn translate(
        &self,
        _text: &str,
        _from: Language,
        _to: Language,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported)
    }
}

// ==================== OpenAI-compatible provider ====================

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Build the system prompt for translating short project/task text
fn build_translation_system_prompt(from: Language, to: Language) -> String {
    format!(
        r#"You are a professional translator for a project management application. Translate the user's text from {} to {}.

## Rules
- Return ONLY the translated text, with no quotes, notes or explanations
- Preserve line breaks, markdown and list formatting
- Do not translate URLs, email addresses, code identifiers or numbers
- Keep proper names of people, companies and products as written
- If the text is already in {}, return it unchanged"#,
        from.name(),
        to.name(),
        to.name()
    )
}

/// Translator backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: String, model: String, api_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            api_url,
        })
    }

    fn build_request(&self, text: &str, from: Language, to: Language) -> TranslationRequest {
        // Reasoning models don't support temperature - use reasoning_effort instead
        let is_reasoning = is_reasoning_model(&self.model);

        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(from, to),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: if is_reasoning { None } else { Some(0.3) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }
}

#[async_trait]
impl TranslationProvider for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, ProviderError> {
        if from == to {
            return Ok(text.to_string());
        }

        let request = self.build_request(text, from, to);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(ProviderError::EmptyResponse)
    }
}

// ==================== Fallback boundary ====================

/// Translate one string, degrading to the source text on any provider error.
///
/// This is the only place a `ProviderError` is handled: it is logged and
/// counted, never returned. Blank text is its own translation.
pub async fn translate_or_fallback(
    provider: &dyn TranslationProvider,
    text: &str,
    from: Language,
    to: Language,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let metrics = TranslationMetrics::global();
    metrics.record_provider_call();

    match provider.translate(text, from, to).await {
        Ok(translated) => translated,
        Err(e) => {
            metrics.record_provider_failure();
            metrics.record_fallback();
            warn!(
                "Translation {} -> {} failed, keeping source text: {}",
                from.code(),
                to.code(),
                e
            );
            text.to_string()
        }
    }
}

/// Build a full LocalizedContent from text authored in `source`.
///
/// The source slot is seeded from the literal input before any provider
/// call; the two other slots are translated concurrently and independently.
/// The result is unlocked.
pub async fn fan_out(
    provider: &dyn TranslationProvider,
    text: &str,
    source: Language,
) -> LocalizedContent {
    let mut content = LocalizedContent::empty();
    content.set(source, text);

    let [first, second] = source.others();
    let (first_text, second_text) = futures::join!(
        translate_or_fallback(provider, text, source, first),
        translate_or_fallback(provider, text, source, second),
    );

    content.set(first, first_text);
    content.set(second, second_text);
    content
}

/// Initial translation used when an owning entity is created.
///
/// Empty or whitespace-only text yields `LocalizedContent::empty()` with no
/// provider calls. Unrecognized source languages are treated as English.
pub async fn translate(
    provider: &dyn TranslationProvider,
    text: &str,
    source_lang: &str,
) -> LocalizedContent {
    if text.trim().is_empty() {
        return LocalizedContent::empty();
    }

    let source = Language::normalize(source_lang);
    debug!("Seeding localized content from {}", source.code());
    fan_out(provider, text, source).await
}
