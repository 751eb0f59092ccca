//! Google Translate web endpoint engine
//!
//! Talks to the free `translate_a/single` endpoint (client `gtx`), the same
//! one the popular unofficial client libraries use. No API key is required;
//! in exchange the endpoint is rate-sensitive, which is why the batch layer
//! paces calls instead of parallelizing them.
//!
//! # Example
//!
//! ```ignore
//! use terminex::{GoogleWebEngine, TranslationEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = GoogleWebEngine::new()?;
//!     let response = engine.translate("Hello, world!", "en", "fr").await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

use crate::engine::{EngineResponse, TranslationEngine};
use crate::error::{TcError, TcResult};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Engine backed by the free Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleWebEngine {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleWebEngine {
    /// Per-request HTTP timeout; the bridge applies its own outer bound
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create an engine with a reusable HTTP client
    pub fn new() -> TcResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                TcError::EngineCommunication(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(GoogleWebEngine {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the engine at a different endpoint (tests, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Pull the translated text out of the endpoint's nested-array payload
    ///
    /// The payload is a bare JSON array: element 0 holds the translation
    /// segments (each itself an array whose first element is the translated
    /// chunk), element 2 the detected source language.
    fn parse_payload(payload: &serde_json::Value) -> TcResult<EngineResponse> {
        let segments = payload
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                TcError::EngineResponse("Missing translation segments in payload".to_string())
            })?;

        let mut text = String::new();
        for segment in segments {
            if let Some(chunk) = segment.get(0).and_then(|v| v.as_str()) {
                text.push_str(chunk);
            }
        }

        if text.is_empty() {
            return Err(TcError::EngineResponse(
                "Engine returned an empty translation".to_string(),
            ));
        }

        let detected_source = payload
            .get(2)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(EngineResponse {
            text,
            detected_source,
        })
    }
}

impl std::fmt::Debug for GoogleWebEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleWebEngine")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationEngine for GoogleWebEngine {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TcResult<EngineResponse> {
        if text.is_empty() {
            return Ok(EngineResponse {
                text: String::new(),
                detected_source: None,
            });
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TcError::EngineCommunication(format!(
                "Engine answered {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TcError::EngineResponse(format!("Unparseable payload: {}", e)))?;

        Self::parse_payload(&payload)
    }

    fn engine_name(&self) -> &str {
        "Google Translate (web)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========== Payload Parsing Tests ==========

    #[test]
    fn test_parse_single_segment() {
        let payload = json!([[["Bonjour le monde", "Hello world", null, null, 1]], null, "en"]);
        let response = GoogleWebEngine::parse_payload(&payload).unwrap();
        assert_eq!(response.text, "Bonjour le monde");
        assert_eq!(response.detected_source.as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_joins_multiple_segments() {
        let payload = json!([
            [
                ["Bonjour. ", "Hello. ", null],
                ["Au revoir.", "Goodbye.", null]
            ],
            null,
            "en"
        ]);
        let response = GoogleWebEngine::parse_payload(&payload).unwrap();
        assert_eq!(response.text, "Bonjour. Au revoir.");
    }

    #[test]
    fn test_parse_missing_segments_is_response_error() {
        let payload = json!({"unexpected": "shape"});
        match GoogleWebEngine::parse_payload(&payload) {
            Err(TcError::EngineResponse(msg)) => assert!(msg.contains("segments")),
            other => panic!("expected EngineResponse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_translation_is_response_error() {
        let payload = json!([[], null, "en"]);
        assert!(matches!(
            GoogleWebEngine::parse_payload(&payload),
            Err(TcError::EngineResponse(_))
        ));
    }

    #[test]
    fn test_parse_without_detected_source() {
        let payload = json!([[["Hallo", "Hello", null]]]);
        let response = GoogleWebEngine::parse_payload(&payload).unwrap();
        assert_eq!(response.text, "Hallo");
        assert_eq!(response.detected_source, None);
    }

    // ========== Construction Tests ==========

    #[test]
    fn test_debug_output_names_endpoint() {
        let engine = GoogleWebEngine::new().unwrap();
        assert!(format!("{:?}", engine).contains("translate_a/single"));
    }

    #[tokio::test]
    async fn test_empty_text_short_circuits() {
        let engine = GoogleWebEngine::new().unwrap();
        let response = engine.translate("", "en", "fr").await.unwrap();
        assert_eq!(response.text, "");
    }

    // ========== Integration Tests (require network) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_endpoint_translation() {
        let engine = GoogleWebEngine::new().unwrap();
        let response = engine.translate("Hello", "en", "fr").await.unwrap();
        assert!(!response.text.is_empty());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_endpoint_preserves_placeholders() {
        let engine = GoogleWebEngine::new().unwrap();
        let response = engine
            .translate("The <12> price rose sharply", "en", "fr")
            .await
            .unwrap();
        assert!(response.text.contains("12"));
    }
}
