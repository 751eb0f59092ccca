//! Serial batch driver
//!
//! Runs the orchestrator over a list of inputs one at a time, in order,
//! with a pacing delay between calls. The serialization is deliberate
//! backpressure: the external endpoint is shared and rate-sensitive, so a
//! batch must never turn into a burst. One failing item is captured inline
//! and never aborts the rest of the batch.

use crate::error::TcResult;
use crate::orchestrator::{TranslationResult, Translator};
use serde::Serialize;
use std::time::Duration;

/// Outcome of one batch entry, success or captured failure
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    /// The item translated normally
    Translated(TranslationResult),
    /// The item failed; the batch carried on
    Failed { input: String, reason: String },
}

impl BatchItem {
    pub fn is_translated(&self) -> bool {
        matches!(self, BatchItem::Translated(_))
    }
}

/// Drives a [`Translator`] over multiple inputs sequentially
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pacing: Duration,
}

impl Default for BatchRunner {
    fn default() -> Self {
        BatchRunner::new()
    }
}

impl BatchRunner {
    /// Default pacing between consecutive successful calls
    const DEFAULT_PACING: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        BatchRunner {
            pacing: Self::DEFAULT_PACING,
        }
    }

    /// Runner with a custom pacing delay
    pub fn with_pacing(pacing: Duration) -> Self {
        BatchRunner { pacing }
    }

    /// Translate every input, in input order
    ///
    /// Calls are strictly sequential (never parallel), with the pacing delay
    /// inserted after each successful call except the last item. Per-item
    /// failures become [`BatchItem::Failed`] entries carrying the original
    /// input and the failure reason.
    pub async fn run(
        &self,
        translator: &Translator,
        texts: &[String],
        target: &str,
        source: &str,
        domain: Option<&str>,
    ) -> Vec<BatchItem> {
        let mut items = Vec::with_capacity(texts.len());

        for (index, text) in texts.iter().enumerate() {
            match translator.translate(text, target, source, domain).await {
                Ok(result) => {
                    items.push(BatchItem::Translated(result));
                    if index + 1 < texts.len() {
                        tokio::time::sleep(self.pacing).await;
                    }
                }
                Err(err) => {
                    tracing::error!(index, %err, "batch item failed");
                    items.push(BatchItem::Failed {
                        input: text.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        items
    }

    /// Synchronous batch entry point
    ///
    /// Bridged like [`Translator::translate_sync`], with the wait bound
    /// scaled to the batch: (per-item timeout + pacing) × item count.
    pub fn run_sync(
        &self,
        translator: &Translator,
        texts: &[String],
        target: &str,
        source: &str,
        domain: Option<&str>,
    ) -> TcResult<Vec<BatchItem>> {
        let runner = self.clone();
        let translator = translator.clone();
        let texts = texts.to_vec();
        let target = target.to_string();
        let source = source.to_string();
        let domain = domain.map(|d| d.to_string());

        let per_item = translator.timeout() + self.pacing;
        let bound = per_item * texts.len().max(1) as u32;

        crate::bridge::run_sync(
            async move {
                Ok(runner
                    .run(&translator, &texts, &target, &source, domain.as_deref())
                    .await)
            },
            bound,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockEngine, MockMode};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fast_runner() -> BatchRunner {
        BatchRunner::with_pacing(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::Suffix)))
            .build()
            .unwrap();
        let items = fast_runner()
            .run(&translator, &texts(&["one", "two"]), "fr", "en", None)
            .await;

        assert_eq!(items.len(), 2);
        match (&items[0], &items[1]) {
            (BatchItem::Translated(a), BatchItem::Translated(b)) => {
                assert_eq!(a.final_text, "one [fr]");
                assert_eq!(b.final_text, "two [fr]");
            }
            other => panic!("expected two successes, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failing_item_does_not_abort_batch() {
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::FailOn("poison".to_string()))))
            .build()
            .unwrap();
        let items = fast_runner()
            .run(
                &translator,
                &texts(&["first", "poison pill", "third"]),
                "fr",
                "en",
                None,
            )
            .await;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_translated());
        assert!(items[2].is_translated());
        match &items[1] {
            BatchItem::Failed { input, reason } => {
                assert_eq!(input, "poison pill");
                assert!(reason.contains("communication"));
            }
            other => panic!("expected failure at index 1, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::Identity)))
            .build()
            .unwrap();
        let items = fast_runner().run(&translator, &[], "fr", "en", None).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_pacing_applied_between_items() {
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::Identity)))
            .build()
            .unwrap();
        let runner = BatchRunner::with_pacing(Duration::from_millis(40));
        let start = std::time::Instant::now();
        runner
            .run(&translator, &texts(&["a", "b", "c"]), "fr", "en", None)
            .await;
        // Two gaps between three items; none after the last
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_batch_item_serializes_with_status_tag() {
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::Identity)))
            .build()
            .unwrap();
        let items = fast_runner()
            .run(&translator, &texts(&["hello"]), "fr", "en", None)
            .await;
        let value = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(value["status"], "translated");
        assert_eq!(value["final_text"], "hello");
    }

    #[test]
    fn test_run_sync_outside_runtime() {
        let mut map = HashMap::new();
        map.insert(("hello".to_string(), "fr".to_string()), "bonjour".to_string());
        let translator = Translator::builder()
            .engine(Arc::new(MockEngine::new(MockMode::Mappings(map))))
            .build()
            .unwrap();
        let items = fast_runner()
            .run_sync(&translator, &texts(&["hello"]), "fr", "en", None)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_translated());
    }
}
