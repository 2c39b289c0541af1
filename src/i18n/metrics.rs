//! Translation metrics and observability module.
//!
//! Counts provider traffic and the degraded paths the synchronizer takes,
//! so translation outages show up somewhere other than in the stored text.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Number of calls made to the translation provider
    provider_calls: AtomicUsize,

    /// Number of provider calls that failed
    provider_failures: AtomicUsize,

    /// Number of slots filled with the source text after a failure
    fallbacks: AtomicUsize,

    /// Number of updates where a locked field skipped auto-translation
    locked_skips: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    fn new() -> Self {
        Self {
            provider_calls: AtomicUsize::new(0),
            provider_failures: AtomicUsize::new(0),
            fallbacks: AtomicUsize::new(0),
            locked_skips: AtomicUsize::new(0),
        }
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    /// Record a call to the translation provider.
    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed provider call.
    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a slot that fell back to the source text.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an update that honored a translation lock.
    pub fn record_locked_skip(&self) {
        self.locked_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn provider_calls(&self) -> usize {
        self.provider_calls.load(Ordering::Relaxed)
    }

    pub fn provider_failures(&self) -> usize {
        self.provider_failures.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn locked_skips(&self) -> usize {
        self.locked_skips.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.provider_calls();
        let failures = self.provider_failures();
        let provider_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            provider_calls: calls,
            provider_failures: failures,
            provider_success_rate,
            fallbacks: self.fallbacks(),
            locked_skips: self.locked_skips(),
        }
    }

    /// Reset all metrics to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.provider_calls.store(0, Ordering::Relaxed);
        self.provider_failures.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.locked_skips.store(0, Ordering::Relaxed);
    }
}

/// Metrics report containing current translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of provider calls made
    pub provider_calls: usize,

    /// Number of provider failures
    pub provider_failures: usize,

    /// Provider success rate as a percentage (0-100)
    pub provider_success_rate: f64,

    /// Number of slots that degraded to the source text
    pub fallbacks: usize,

    /// Number of updates that honored a translation lock
    pub locked_skips: usize,
}

impl MetricsReport {
    /// Format the report as a human-readable string.
    pub fn format(&self) -> String {
        format!(
            "Translation Metrics:\n\
             - Provider calls: {}\n\
             - Provider failures: {}\n\
             - Provider success rate: {:.1}%\n\
             - Source-text fallbacks: {}\n\
             - Locked-field skips: {}",
            self.provider_calls,
            self.provider_failures,
            self.provider_success_rate,
            self.fallbacks,
            self.locked_skips
        )
    }
}
