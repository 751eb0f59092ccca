//! Translation orchestration
//!
//! [`Translator`] drives the full pipeline for one call: resolve language
//! codes and the requested domain against the configured terminology stores,
//! shield matched terms behind placeholders, run one or two engine hops,
//! restore the terms with source-matching casing, and assemble a
//! [`TranslationResult`].
//!
//! The engine handle and the stores are injected at construction and reused
//! across calls; nothing network-related is rebuilt per request.
//!
//! # Example
//!
//! ```ignore
//! use terminex::{MockEngine, MockMode, Translator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = Translator::builder()
//!         .engine(Arc::new(MockEngine::new(MockMode::Identity)))
//!         .build()?;
//!     let result = translator.translate("Hello", "fr", "en", None).await?;
//!     println!("{}", result.final_text);
//!     Ok(())
//! }
//! ```

use crate::bridge;
use crate::engine::TranslationEngine;
use crate::error::{TcError, TcResult};
use crate::language::{is_supported, to_engine_code};
use crate::matcher::{self, MatchRecord};
use crate::terminology::{TermLoader, TerminologyStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One curated term that was enforced during a translation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermUse {
    pub term: String,
    pub translation: String,
    pub id: u32,
}

impl From<&MatchRecord> for TermUse {
    fn from(record: &MatchRecord) -> Self {
        TermUse {
            term: record.term.canonical.clone(),
            translation: record.term.translation.clone(),
            id: record.term.id,
        }
    }
}

/// Everything one translation call produced
///
/// Serializes as a flat mapping for downstream consumers. The diagnostic
/// fields (`preprocessed_text`, `raw_engine_output`,
/// `pivot_intermediate_text`, `elapsed_seconds`, `warnings`) record what the
/// pipeline actually did, not just the final text.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub final_text: String,
    pub source_language: String,
    pub target_language: String,
    pub domain: Option<String>,
    pub terms_used: Vec<TermUse>,
    pub preprocessed_text: String,
    pub raw_engine_output: String,
    pub pivot_intermediate_text: Option<String>,
    pub elapsed_seconds: f64,
    pub warnings: Vec<String>,
}

/// Builder for [`Translator`]
pub struct TranslatorBuilder {
    engine: Option<Arc<dyn TranslationEngine>>,
    stores: Vec<TerminologyStore>,
    pivot: Option<String>,
    timeout: Duration,
}

impl TranslatorBuilder {
    /// The external engine to call. Required.
    pub fn engine(mut self, engine: Arc<dyn TranslationEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Add a terminology store
    pub fn store(mut self, store: TerminologyStore) -> Self {
        self.stores.push(store);
        self
    }

    /// Add a terminology store by running a loader
    pub fn load_store(mut self, loader: &dyn TermLoader) -> TcResult<Self> {
        self.stores.push(TerminologyStore::from_loader(loader)?);
        Ok(self)
    }

    /// Route every translation through an intermediate pivot language
    ///
    /// With a pivot configured, each call performs two sequential hops
    /// (source → pivot, pivot → target). The hop is skipped when the pivot
    /// equals the resolved source or target code, since that hop would be a
    /// no-op engine call.
    pub fn pivot(mut self, code: &str) -> Self {
        self.pivot = Some(to_engine_code(code));
        self
    }

    /// Bound applied by the synchronous entry points (default: 30 s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> TcResult<Translator> {
        let engine = self.engine.ok_or_else(|| {
            TcError::Configuration("No translation engine configured".to_string())
        })?;
        Ok(Translator {
            engine,
            stores: Arc::new(self.stores),
            pivot: self.pivot,
            timeout: self.timeout,
        })
    }
}

/// The terminology-controlled translation orchestrator
#[derive(Clone)]
pub struct Translator {
    engine: Arc<dyn TranslationEngine>,
    stores: Arc<Vec<TerminologyStore>>,
    pivot: Option<String>,
    timeout: Duration,
}

impl Translator {
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder {
            engine: None,
            stores: Vec::new(),
            pivot: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// The (domain, language) pairs the configured stores expose
    pub fn available_pairs(&self) -> Vec<(Option<&str>, &str)> {
        self.stores
            .iter()
            .map(|s| (s.domain(), s.language()))
            .collect()
    }

    /// Timeout bound used by the synchronous entry points
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pick the store for a requested (domain, target language)
    ///
    /// No domain requested: a domain-less store matching the target language
    /// is used when one exists (language-wide terminology); otherwise the
    /// call proceeds without terminology. A requested domain must resolve,
    /// and failure names the request and lists what is configured.
    fn resolve_store(
        &self,
        domain: Option<&str>,
        target: &str,
    ) -> TcResult<Option<&TerminologyStore>> {
        match domain {
            None => Ok(self
                .stores
                .iter()
                .find(|s| s.domain().is_none() && s.matches_language(target))),
            Some(requested) => {
                if self.stores.is_empty() {
                    return Err(TcError::Configuration(format!(
                        "Domain '{}' requested but no terminology store is configured",
                        requested
                    )));
                }
                self.stores
                    .iter()
                    .find(|s| {
                        s.domain()
                            .is_some_and(|d| d.eq_ignore_ascii_case(requested))
                            && s.matches_language(target)
                    })
                    .map(Some)
                    .ok_or_else(|| {
                        let pairs: Vec<String> = self
                            .stores
                            .iter()
                            .map(|s| {
                                format!("({}, {})", s.domain().unwrap_or("-"), s.language())
                            })
                            .collect();
                        TcError::Configuration(format!(
                            "Domain '{}' with language '{}' not found; available (domain, language) pairs: {}",
                            requested,
                            target,
                            pairs.join(", ")
                        ))
                    })
            }
        }
    }

    /// Translate one text with terminology control
    ///
    /// `source` may be `"auto"`, in which case the engine's detected source
    /// language is reported in the result. `domain` scopes which terminology
    /// applies; without one, a language-wide store is used if configured.
    ///
    /// # Errors
    ///
    /// * `TcError::Configuration` - unresolvable domain/language pair
    /// * `TcError::EngineCommunication` / `EngineTimeout` / `EngineResponse` -
    ///   surfaced from the engine, never retried here
    pub async fn translate(
        &self,
        text: &str,
        target: &str,
        source: &str,
        domain: Option<&str>,
    ) -> TcResult<TranslationResult> {
        let started = Instant::now();

        let source_engine = to_engine_code(source);
        let target_engine = to_engine_code(target);

        let mut warnings = Vec::new();
        if source != "auto" && !is_supported(source) {
            tracing::warn!(code = %source, "source language may not be supported by the engine");
            warnings.push(format!(
                "Source language '{}' may not be supported by the engine",
                source
            ));
        }
        if !is_supported(target) {
            tracing::warn!(code = %target, "target language may not be supported by the engine");
            warnings.push(format!(
                "Target language '{}' may not be supported by the engine",
                target
            ));
        }

        let store = self.resolve_store(domain, target)?;
        let (preprocessed, records) = match store {
            Some(store) => matcher::preprocess(text, store),
            None => (text.to_string(), Vec::new()),
        };
        tracing::debug!(
            engine = self.engine.engine_name(),
            terms = records.len(),
            preprocessed = %preprocessed,
            "preprocessed input"
        );

        // The second hop depends on the first hop's output, so hops are
        // strictly sequential.
        let pivot = self
            .pivot
            .as_deref()
            .filter(|p| *p != target_engine && *p != source_engine);

        let mut pivot_intermediate_text = None;
        let (raw_engine_output, detected_source) = match pivot {
            Some(pivot) => {
                let first = self
                    .engine
                    .translate(&preprocessed, &source_engine, pivot)
                    .await?;
                pivot_intermediate_text = Some(first.text.clone());
                let second = self.engine.translate(&first.text, pivot, &target_engine).await?;
                (second.text, first.detected_source)
            }
            None => {
                let response = self
                    .engine
                    .translate(&preprocessed, &source_engine, &target_engine)
                    .await?;
                (response.text, response.detected_source)
            }
        };

        let final_text = matcher::postprocess(&raw_engine_output, &records);

        let source_language = if source == "auto" {
            detected_source.unwrap_or_else(|| "auto".to_string())
        } else {
            source.to_string()
        };

        Ok(TranslationResult {
            original_text: text.to_string(),
            final_text,
            source_language,
            target_language: target.to_string(),
            domain: domain.map(|d| d.to_string()),
            terms_used: records.iter().map(TermUse::from).collect(),
            preprocessed_text: preprocessed,
            raw_engine_output,
            pivot_intermediate_text,
            elapsed_seconds: started.elapsed().as_secs_f64(),
            warnings,
        })
    }

    /// Synchronous entry point
    ///
    /// Bridges into the async pipeline under this translator's timeout; safe
    /// to call whether or not a runtime is already running in the caller's
    /// context. See [`bridge::run_sync`] for the scheduling contract.
    pub fn translate_sync(
        &self,
        text: &str,
        target: &str,
        source: &str,
        domain: Option<&str>,
    ) -> TcResult<TranslationResult> {
        let this = self.clone();
        let text = text.to_string();
        let target = target.to_string();
        let source = source.to_string();
        let domain = domain.map(|d| d.to_string());
        bridge::run_sync(
            async move {
                this.translate(&text, &target, &source, domain.as_deref())
                    .await
            },
            self.timeout,
        )
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("engine", &self.engine.engine_name())
            .field("stores", &self.stores.len())
            .field("pivot", &self.pivot)
            .field("timeout", &self.timeout)
            .finish()
    }
}
