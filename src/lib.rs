//! Terminology-controlled machine translation
//!
//! This crate translates free text through an external translation engine
//! while guaranteeing that curated domain terms (names, technical
//! vocabulary, brand terms) come out as their fixed, pre-approved
//! equivalents rather than whatever the generic engine would produce. It is
//! aimed at localization work in low-resource languages, where a generic
//! translator routinely mistranslates specialized vocabulary.
//!
//! # Overview
//!
//! Several components work together:
//!
//! 1. **Terminology store** - in-memory index of curated terms for one
//!    (language\[, domain\]) pair, built from a pluggable loader
//! 2. **Term matcher** - finds term occurrences (whole-word,
//!    case-insensitive, longest-first) and shields them behind `<id>`
//!    placeholders the engine will not translate
//! 3. **Engine trait & implementations** - generic contract for external
//!    engines, with a Google web-endpoint client and a deterministic mock
//! 4. **Orchestrator** - resolves languages and domains, sequences one or
//!    two engine hops (optional pivot language), restores terms with
//!    source-matching casing, and assembles the result record
//! 5. **Execution bridge & batch runner** - synchronous entry points over
//!    the async pipeline, and a serial, rate-limited multi-item driver
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terminex::{CsvTermLoader, GoogleWebEngine, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = CsvTermLoader::from_filename("corpora/agric_twi.csv")?;
//!     let translator = Translator::builder()
//!         .engine(Arc::new(GoogleWebEngine::new()?))
//!         .load_store(&loader)?
//!         .pivot("th")
//!         .build()?;
//!
//!     let result = translator
//!         .translate("Cocoa prices rose at the north bank", "twi", "en", Some("agric"))
//!         .await?;
//!     println!("{}", result.final_text);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod bridge;
pub mod casing;
pub mod engine;
pub mod error;
pub mod google_translate;
pub mod language;
pub mod matcher;
pub mod mock;
pub mod orchestrator;
pub mod terminology;


pub use batch::{BatchItem, BatchRunner};
pub use bridge::run_sync;
pub use engine::{EngineResponse, TranslationEngine};
pub use error::{TcError, TcResult};
pub use google_translate::GoogleWebEngine;
pub use language::{from_engine_code, is_supported, to_engine_code};
pub use matcher::{MatchRecord, postprocess, preprocess};
pub use mock::{MockEngine, MockMode};
pub use orchestrator::{TermUse, TranslationResult, Translator, TranslatorBuilder};
pub use terminology::{CsvTermLoader, InMemoryTermLoader, Term, TermLoader, TerminologyStore};
