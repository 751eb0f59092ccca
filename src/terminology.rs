//! Terminology corpus: terms, stores, and loaders
//!
//! A [`TerminologyStore`] is an in-memory index of curated [`Term`] records
//! for one (language[, domain]) pair. It is built once from a
//! [`TermLoader`], read-only afterwards, and safe to share across threads.
//!
//! The corpus format itself is a collaborator, not core: any loader that
//! yields `Term` records plus the language/domain they belong to will do.
//! [`CsvTermLoader`] covers the common case of tabular
//! `id,term,translation` files.

use crate::error::{TcError, TcResult};
use crate::language::to_engine_code;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A curated (source form, translation) pair with a stable numeric id
///
/// `canonical` is the lowercased, trimmed surface form used for matching;
/// `translation` is the pre-approved target-language equivalent, stored
/// exactly as curated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Unique within the store that loaded it
    pub id: u32,
    /// Lowercased, trimmed source surface form
    pub canonical: String,
    /// Pre-approved target-language equivalent
    pub translation: String,
    /// Corpus language code this term translates into
    pub language: String,
}

impl Term {
    /// Create a term, normalizing the canonical form
    pub fn new(id: u32, canonical: &str, translation: &str, language: &str) -> Self {
        Term {
            id,
            canonical: canonical.trim().to_lowercase(),
            translation: translation.trim().to_string(),
            language: language.to_string(),
        }
    }
}

/// A source of terms plus the (language[, domain]) they belong to
pub trait TermLoader {
    /// Produce the full term list
    fn load(&self) -> TcResult<Vec<Term>>;

    /// Corpus language code the terms translate into
    fn language(&self) -> &str;

    /// Subject area the terms are scoped to, if any
    fn domain(&self) -> Option<&str> {
        None
    }
}

/// Read-only index of terms for one (language[, domain]) pair
#[derive(Debug, Clone)]
pub struct TerminologyStore {
    language: String,
    domain: Option<String>,
    terms: HashMap<String, Term>,
}

impl TerminologyStore {
    /// Build a store by running a loader
    pub fn from_loader(loader: &dyn TermLoader) -> TcResult<Self> {
        Ok(Self::from_terms(
            loader.language(),
            loader.domain(),
            loader.load()?,
        ))
    }

    /// Build a store from already-materialized terms
    ///
    /// Canonical forms must be unique; a duplicate replaces the earlier entry
    /// and is reported at warn level.
    pub fn from_terms(
        language: &str,
        domain: Option<&str>,
        terms: impl IntoIterator<Item = Term>,
    ) -> Self {
        let mut index = HashMap::new();
        for term in terms {
            if let Some(previous) = index.insert(term.canonical.clone(), term) {
                tracing::warn!(
                    canonical = %previous.canonical,
                    "duplicate canonical form in terminology corpus, keeping the later entry"
                );
            }
        }
        TerminologyStore {
            language: language.to_string(),
            domain: domain.map(|d| d.to_string()),
            terms: index,
        }
    }

    /// Look up a term by its canonical form (case-insensitive)
    pub fn get(&self, canonical: &str) -> Option<&Term> {
        self.terms.get(&canonical.trim().to_lowercase())
    }

    /// Iterate over all terms, in no particular order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Corpus language code this store's translations target
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Subject area this store is scoped to, if any
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Whether `code` names this store's language, in corpus or engine form
    pub fn matches_language(&self, code: &str) -> bool {
        let code = code.to_lowercase();
        self.language.eq_ignore_ascii_case(&code)
            || to_engine_code(&self.language) == to_engine_code(&code)
    }
}

/// Loader over an in-memory term list, for embedding and tests
pub struct InMemoryTermLoader {
    language: String,
    domain: Option<String>,
    terms: Vec<Term>,
}

impl InMemoryTermLoader {
    pub fn new(language: &str, domain: Option<&str>, terms: Vec<Term>) -> Self {
        InMemoryTermLoader {
            language: language.to_string(),
            domain: domain.map(|d| d.to_string()),
            terms,
        }
    }
}

impl TermLoader for InMemoryTermLoader {
    fn load(&self) -> TcResult<Vec<Term>> {
        Ok(self.terms.clone())
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// One row of a terminology CSV file
#[derive(Debug, Deserialize)]
struct CsvTermRecord {
    id: u32,
    term: String,
    translation: String,
}

/// Loader for tabular `id,term,translation` CSV files
///
/// Corpus files are conventionally named after their scope:
/// `terminologies_{language}.csv` for language-wide terminology, or
/// `{domain}_{language}.csv` for a domain-scoped file. Use
/// [`CsvTermLoader::from_filename`] to let the filename supply the scope,
/// or [`CsvTermLoader::new`] to state it explicitly.
pub struct CsvTermLoader {
    path: PathBuf,
    language: String,
    domain: Option<String>,
}

impl CsvTermLoader {
    /// Loader with an explicitly stated (language[, domain]) scope
    pub fn new(path: impl Into<PathBuf>, language: &str, domain: Option<&str>) -> Self {
        CsvTermLoader {
            path: path.into(),
            language: language.to_string(),
            domain: domain.map(|d| d.to_string()),
        }
    }

    /// Loader whose scope is inferred from the filename stem
    ///
    /// `terminologies_twi.csv` → language `twi`, no domain;
    /// `agric_twi.csv` → domain `agric`, language `twi`.
    pub fn from_filename(path: impl Into<PathBuf>) -> TcResult<Self> {
        let path = path.into();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                TcError::Configuration(format!(
                    "Cannot infer terminology scope from path '{}'",
                    path.display()
                ))
            })?
            .to_string();

        let (domain, language) = if let Some(language) = stem.strip_prefix("terminologies_") {
            (None, language.to_string())
        } else if let Some((domain, language)) = stem.rsplit_once('_') {
            (Some(domain.to_string()), language.to_string())
        } else {
            return Err(TcError::Configuration(format!(
                "Terminology filename '{}' does not follow 'terminologies_{{lang}}.csv' \
                 or '{{domain}}_{{lang}}.csv'",
                path.display()
            )));
        };

        Ok(CsvTermLoader {
            path,
            language,
            domain,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TermLoader for CsvTermLoader {
    fn load(&self) -> TcResult<Vec<Term>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            TcError::Configuration(format!(
                "Failed to open terminology file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut terms = Vec::new();
        for record in reader.deserialize() {
            let record: CsvTermRecord = record.map_err(|e| {
                TcError::Configuration(format!(
                    "Invalid record in terminology file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;
            terms.push(Term::new(
                record.id,
                &record.term,
                &record.translation,
                &self.language,
            ));
        }

        tracing::debug!(
            count = terms.len(),
            language = %self.language,
            domain = self.domain.as_deref().unwrap_or("-"),
            "loaded terminology corpus"
        );
        Ok(terms)
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_terms() -> Vec<Term> {
        vec![
            Term::new(1, "bank", "banki", "twi"),
            Term::new(2, "north bank", "banki atifi", "twi"),
            Term::new(3, "  Cocoa ", "kookoo", "twi"),
        ]
    }

    // ========== Term Tests ==========

    #[test]
    fn test_term_normalizes_canonical() {
        let term = Term::new(3, "  Cocoa ", "kookoo", "twi");
        assert_eq!(term.canonical, "cocoa");
        assert_eq!(term.translation, "kookoo");
    }

    // ========== Store Tests ==========

    #[test]
    fn test_store_lookup_case_insensitive() {
        let store = TerminologyStore::from_terms("twi", None, sample_terms());
        assert_eq!(store.get("BANK").unwrap().id, 1);
        assert_eq!(store.get("cocoa").unwrap().id, 3);
        assert!(store.get("river").is_none());
    }

    #[test]
    fn test_store_scope() {
        let store = TerminologyStore::from_terms("twi", Some("agric"), sample_terms());
        assert_eq!(store.language(), "twi");
        assert_eq!(store.domain(), Some("agric"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_store_duplicate_keeps_later_entry() {
        let store = TerminologyStore::from_terms(
            "twi",
            None,
            vec![
                Term::new(1, "bank", "banki", "twi"),
                Term::new(9, "bank", "sikakorabea", "twi"),
            ],
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("bank").unwrap().id, 9);
    }

    #[test]
    fn test_store_matches_language_either_form() {
        let store = TerminologyStore::from_terms("twi", None, vec![]);
        assert!(store.matches_language("twi"));
        assert!(store.matches_language("tw"));
        assert!(!store.matches_language("fra"));
    }

    #[test]
    fn test_empty_store() {
        let store = TerminologyStore::from_terms("twi", None, vec![]);
        assert!(store.is_empty());
    }

    // ========== Loader Tests ==========

    #[test]
    fn test_in_memory_loader() {
        let loader = InMemoryTermLoader::new("twi", Some("agric"), sample_terms());
        let store = TerminologyStore::from_loader(&loader).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.domain(), Some("agric"));
    }

    #[test]
    fn test_csv_filename_language_wide() {
        let loader = CsvTermLoader::from_filename("corpus/terminologies_twi.csv").unwrap();
        assert_eq!(loader.language(), "twi");
        assert_eq!(loader.domain(), None);
    }

    #[test]
    fn test_csv_filename_domain_scoped() {
        let loader = CsvTermLoader::from_filename("corpus/agric_twi.csv").unwrap();
        assert_eq!(loader.language(), "twi");
        assert_eq!(loader.domain(), Some("agric"));
    }

    #[test]
    fn test_csv_filename_unparseable() {
        let result = CsvTermLoader::from_filename("corpus/glossary.csv");
        assert!(matches!(result, Err(TcError::Configuration(_))));
    }

    #[test]
    fn test_csv_missing_file_is_configuration_error() {
        let loader = CsvTermLoader::new("/nonexistent/agric_twi.csv", "twi", Some("agric"));
        match loader.load() {
            Err(TcError::Configuration(msg)) => assert!(msg.contains("agric_twi.csv")),
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }
}
