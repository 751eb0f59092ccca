//! Translation engine abstraction
//!
//! The pipeline treats the external translator as an opaque function
//! `translate(text, source, target) -> text`: possibly imperfect, reached
//! over the network, and interchangeable. Implementations handle the actual
//! translation work, whether through an API ([`GoogleWebEngine`]) or
//! deterministic logic ([`MockEngine`]).
//!
//! [`GoogleWebEngine`]: crate::google_translate::GoogleWebEngine
//! [`MockEngine`]: crate::mock::MockEngine

use crate::error::TcResult;
use async_trait::async_trait;

/// What an engine returns for one translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    /// The translated text
    pub text: String,
    /// Source language the engine detected, when it reports one
    pub detected_source: Option<String>,
}

/// Generic contract for external translation engines
///
/// All methods are async: real engines are I/O-bound. Implementations must
/// be shareable across calls; the orchestrator holds one engine handle for
/// its whole lifetime rather than rebuilding a client per request.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate `text` between two engine-form language codes
    ///
    /// # Errors
    ///
    /// * `TcError::EngineCommunication` - transport failure reaching the engine
    /// * `TcError::EngineTimeout` - the engine's own request timeout fired
    /// * `TcError::EngineResponse` - the engine answered with an unusable payload
    async fn translate(&self, text: &str, source: &str, target: &str)
    -> TcResult<EngineResponse>;

    /// Identifier for logging and diagnostics
    fn engine_name(&self) -> &str;
}
