//! Content synchronizer: folds a partial per-language edit into a stored
//! `LocalizedContent`.
//!
//! Rules, in order:
//! 1. A missing stored value starts from `LocalizedContent::empty()`.
//! 2. A locked value only takes the slots present in the update, verbatim.
//!    The provider is never called, whatever the caller asked for.
//! 3. An unlocked value edited in exactly one language (with auto-translate
//!    allowed) is rebuilt from that language: the edited slot is kept
//!    verbatim, the other two are translated, and the result is locked.
//! 4. Any other non-empty edit is applied verbatim and locks the value.
//!    An empty edit returns the stored value unchanged.
//!
//! There is no unlock path: a locked field stays locked until the owning
//! entity is deleted.

use crate::content::LocalizedContent;
use crate::i18n::TranslationMetrics;
use crate::request::LanguageUpdates;
use crate::translation::{fan_out, TranslationProvider};
use tracing::debug;

/// Compute the next value of a localized field.
///
/// Never fails and never mutates `existing`; provider errors degrade to the
/// source text inside [`fan_out`].
pub async fn update_field(
    provider: &dyn TranslationProvider,
    existing: Option<&LocalizedContent>,
    updates: &LanguageUpdates,
    auto_translate_allowed: bool,
) -> LocalizedContent {
    let current = existing.cloned().unwrap_or_default();

    if current.translation_locked {
        if auto_translate_allowed && !updates.is_empty() {
            TranslationMetrics::global().record_locked_skip();
        }
        debug!(
            "Field is translation-locked, applying {} slot(s) verbatim",
            updates.len()
        );
        return apply_verbatim(current, updates);
    }

    if auto_translate_allowed {
        if let Some((source, text)) = updates.single() {
            debug!("Single-language edit in {}, fanning out", source.code());
            let mut content = fan_out(provider, text, source).await;
            content.translation_locked = true;
            return content;
        }
    }

    debug!(
        "Applying {} slot(s) verbatim (auto-translate: {})",
        updates.len(),
        auto_translate_allowed
    );
    let mut content = apply_verbatim(current, updates);
    if !updates.is_empty() {
        content.translation_locked = true;
    }
    content
}

/// Overwrite the slots present in `updates`, keeping everything else.
fn apply_verbatim(mut content: LocalizedContent, updates: &LanguageUpdates) -> LocalizedContent {
    for lang in updates.changed_languages() {
        if let Some(text) = updates.get(lang) {
            content.set(lang, text);
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::translation::mock::MockTranslator;

    fn stored(en: &str, uz: &str, ja: &str, locked: bool) -> LocalizedContent {
        LocalizedContent {
            en: en.to_string(),
            uz: uz.to_string(),
            ja: ja.to_string(),
            translation_locked: locked,
        }
    }

    // ==================== Unlocked, single-language edits ====================

    #[tokio::test]
    async fn test_single_field_edit_fans_out_and_locks() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);
        let updates = LanguageUpdates::new().with(Language::Ja, "新しい");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result.ja, "新しい");
        assert_eq!(result.en, "[en] 新しい");
        assert_eq!(result.uz, "[uz] 新しい");
        assert!(result.translation_locked);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_single_field_edit_does_not_mutate_input() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);
        let snapshot = existing.clone();
        let updates = LanguageUpdates::new().with(Language::En, "New");

        update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(existing, snapshot);
    }

    #[tokio::test]
    async fn test_single_field_edit_with_provider_failure_copies_source() {
        let provider = MockTranslator::failing_for(&[Language::En, Language::Uz]);
        let existing = stored("Old", "Eski", "古い", false);
        let updates = LanguageUpdates::new().with(Language::Ja, "新しい");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result.en, "新しい");
        assert_eq!(result.uz, "新しい");
        assert_eq!(result.ja, "新しい");
        assert!(result.translation_locked);
    }

    #[tokio::test]
    async fn test_single_field_edit_without_auto_translate_is_verbatim() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);
        let updates = LanguageUpdates::new().with(Language::En, "New");

        let result = update_field(&provider, Some(&existing), &updates, false).await;

        assert_eq!(result, stored("New", "Eski", "古い", true));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_empty_edit_clears_every_slot() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);
        let updates = LanguageUpdates::new().with(Language::En, "");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result, stored("", "", "", true));
        assert_eq!(provider.call_count(), 0);
    }

    // ==================== Unlocked, multi-language edits ====================

    #[tokio::test]
    async fn test_multi_field_edit_is_verbatim_and_locks() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);
        let updates = LanguageUpdates::new()
            .with(Language::En, "A")
            .with(Language::Uz, "B");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result, stored("A", "B", "古い", true));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_update_leaves_value_unlocked() {
        let provider = MockTranslator::new();
        let existing = stored("Old", "Eski", "古い", false);

        let result = update_field(&provider, Some(&existing), &LanguageUpdates::new(), true).await;

        assert_eq!(result, existing);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_existing_starts_from_empty() {
        let provider = MockTranslator::new();
        let updates = LanguageUpdates::new()
            .with(Language::En, "A")
            .with(Language::Ja, "C");

        let result = update_field(&provider, None, &updates, true).await;

        assert_eq!(result, stored("A", "", "C", true));
    }

    #[tokio::test]
    async fn test_missing_existing_single_edit_fans_out() {
        let provider = MockTranslator::new();
        let updates = LanguageUpdates::new().with(Language::Uz, "Reja");

        let result = update_field(&provider, None, &updates, true).await;

        assert_eq!(result.uz, "Reja");
        assert_eq!(result.en, "[en] Reja");
        assert!(result.translation_locked);
    }

    // ==================== Locked values ====================

    #[tokio::test]
    async fn test_locked_applies_only_present_slots() {
        let provider = MockTranslator::new();
        let existing = stored("Title", "Sarlavha", "タイトル", true);
        let updates = LanguageUpdates::new().with(Language::En, "Updated");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result, stored("Updated", "Sarlavha", "タイトル", true));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_locked_allows_explicit_clear() {
        let provider = MockTranslator::new();
        let existing = stored("Title", "Sarlavha", "タイトル", true);
        let updates = LanguageUpdates::new().with(Language::Ja, "");

        let result = update_field(&provider, Some(&existing), &updates, true).await;

        assert_eq!(result, stored("Title", "Sarlavha", "", true));
    }

    #[tokio::test]
    async fn test_lock_is_monotonic_across_edits() {
        let provider = MockTranslator::new();
        let mut value = stored("Old", "Eski", "古い", false);

        let edits = [
            LanguageUpdates::new().with(Language::Ja, "一"),
            LanguageUpdates::new().with(Language::Uz, "ikki"),
            LanguageUpdates::new().with(Language::En, "three"),
            LanguageUpdates::new(),
        ];

        for (i, edit) in edits.iter().enumerate() {
            let before = value.clone();
            value = update_field(&provider, Some(&before), edit, true).await;
            assert!(value.translation_locked);

            if i > 0 {
                for lang in Language::ALL {
                    if edit.get(lang).is_none() {
                        assert_eq!(value.get(lang), before.get(lang), "{lang} changed");
                    }
                }
            }
        }

        // Only the first edit reached the provider
        assert_eq!(provider.call_count(), 2);
    }
}
