//! Term matching: placeholder substitution and restoration
//!
//! Before a text goes to the translation engine, every occurrence of a stored
//! term is replaced by a placeholder of the form `<id>`, shielding it from
//! the engine's general-purpose vocabulary. After translation the
//! placeholders are substituted with the curated equivalents, re-cased to
//! match the source occurrence.
//!
//! Terms are applied longest-first so that a short term never fragments a
//! compound term containing it (`"bank"` must not fire inside
//! `"north bank"`). Placeholders themselves are immune to later matches:
//! matching is whole-word and the placeholder bodies carry no letters.

use crate::casing::project;
use crate::terminology::{Term, TerminologyStore};
use regex::Regex;

/// A single protected term occurrence set within one translation call
///
/// `original_span` is the exact substring matched in the source text (first
/// occurrence, when the term appears more than once); it drives case
/// restoration during postprocessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The `<id>` token standing in for the term
    pub placeholder: String,
    /// The matched term
    pub term: Term,
    /// Exact source substring that was matched
    pub original_span: String,
}

/// The placeholder token for a term id
pub fn placeholder_for(id: u32) -> String {
    format!("<{}>", id)
}

/// Replace every stored-term occurrence in `text` with its placeholder
///
/// Returns the placeholder-bearing text and one [`MatchRecord`] per term
/// that matched at least once. With an empty store this is a no-op: the
/// input text comes back unchanged with no records. (Terminology is
/// reinforcement, not a requirement, so an empty corpus is not an error.)
///
/// Guarantees: no two records overlap in the original text, and every
/// placeholder present in the output has a record.
pub fn preprocess(text: &str, store: &TerminologyStore) -> (String, Vec<MatchRecord>) {
    if store.is_empty() {
        return (text.to_string(), Vec::new());
    }

    // Longest canonical form first; ties broken by ascending id for determinism
    let mut terms: Vec<&Term> = store.terms().collect();
    terms.sort_by(|a, b| {
        b.canonical
            .len()
            .cmp(&a.canonical.len())
            .then(a.id.cmp(&b.id))
    });

    let mut current = text.to_string();
    let mut records = Vec::new();

    for term in terms {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&term.canonical));
        let matcher = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(err) => {
                tracing::warn!(term = %term.canonical, %err, "skipping unmatchable term");
                continue;
            }
        };

        let placeholder = placeholder_for(term.id);
        let mut first_span: Option<String> = None;
        let replaced = matcher.replace_all(&current, |caps: &regex::Captures| {
            if first_span.is_none() {
                first_span = Some(caps[0].to_string());
            }
            placeholder.clone()
        });

        if let Some(original_span) = first_span {
            current = replaced.into_owned();
            records.push(MatchRecord {
                placeholder,
                term: term.clone(),
                original_span,
            });
        }
    }

    (current, records)
}

/// Substitute placeholders in engine output with case-projected translations
///
/// Engines occasionally mangle placeholder tokens; occurrences with inserted
/// spaces (`< 12 >`) or HTML-escaped brackets (`&lt;12&gt;`) are recognized
/// alongside the literal `<12>`.
pub fn postprocess(text: &str, records: &[MatchRecord]) -> String {
    let mut result = text.to_string();

    for record in records {
        let pattern = format!(r"(?:<|&lt;)\s*{}\s*(?:>|&gt;)", record.term.id);
        let matcher = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        let replacement = project(&record.original_span, &record.term.translation);
        // NoExpand: curated translations are literal text, never group refs
        result = matcher
            .replace_all(&result, regex::NoExpand(&replacement))
            .into_owned();
    }

    result
}
