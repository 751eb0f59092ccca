//! Mock translation engine for tests and offline use
//!
//! Deterministic, network-free stand-in for the external engine, so the
//! pipeline can be exercised without API access.
//!
//! # Example
//!
//! ```ignore
//! use terminex::{MockEngine, MockMode, TranslationEngine};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockEngine::new(MockMode::Suffix);
//!     let response = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(response.text, "hello [fr]");
//! }
//! ```

use crate::engine::{EngineResponse, TranslationEngine};
use crate::error::{TcError, TcResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Behaviors the mock engine can simulate
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return the input unchanged. Placeholders survive verbatim, which makes
    /// this the engine for round-trip tests.
    Identity,

    /// Append a target-language marker: "hello" → "hello [fr]"
    Suffix,

    /// Predefined (text, target) → translation mappings, falling back to
    /// Suffix behavior for unknown inputs
    Mappings(HashMap<(String, String), String>),

    /// Reverse word order, simulating a word-order-changing target language
    Reorder,

    /// Fail every call with a transport error
    Fail(String),

    /// Fail only calls whose input contains the needle; behave as Identity
    /// otherwise. Lets batch tests poison a single item.
    FailOn(String),

    /// Sleep far past any reasonable bound before answering, for timeout
    /// tests
    Hang,
}

/// Deterministic engine simulating various translation behaviors
#[derive(Debug, Clone)]
pub struct MockEngine {
    mode: MockMode,
    /// Simulated network delay in milliseconds
    delay_ms: u64,
}

impl MockEngine {
    pub fn new(mode: MockMode) -> Self {
        MockEngine { mode, delay_ms: 0 }
    }

    /// Mock with a simulated per-call network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        MockEngine { mode, delay_ms }
    }

    fn detected(&self, source: &str) -> Option<String> {
        if source == "auto" {
            Some("en".to_string())
        } else {
            Some(source.to_string())
        }
    }

    fn apply(&self, text: &str, source: &str, target: &str) -> TcResult<EngineResponse> {
        let translated = match &self.mode {
            MockMode::Identity => text.to_string(),
            MockMode::Suffix => format!("{} [{}]", text, target),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                map.get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{} [{}]", text, target))
            }
            MockMode::Reorder => {
                let words: Vec<&str> = text.split_whitespace().collect();
                words.into_iter().rev().collect::<Vec<_>>().join(" ")
            }
            MockMode::Fail(msg) => return Err(TcError::EngineCommunication(msg.clone())),
            MockMode::FailOn(needle) => {
                if text.contains(needle.as_str()) {
                    return Err(TcError::EngineCommunication(format!(
                        "simulated transport failure on '{}'",
                        needle
                    )));
                }
                text.to_string()
            }
            MockMode::Hang => text.to_string(),
        };

        Ok(EngineResponse {
            text: translated,
            detected_source: self.detected(source),
        })
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TcResult<EngineResponse> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if matches!(self.mode, MockMode::Hang) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        self.apply(text, source, target)
    }

    fn engine_name(&self) -> &str {
        "Mock Engine"
    }
}
