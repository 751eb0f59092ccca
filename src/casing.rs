//! Surface-case projection
//!
//! When a protected term is restored after translation, its canonical
//! replacement is re-cased to match how the term appeared in the source text.
//! This is a surface heuristic only: it never attempts morphological
//! inflection or any grammatical agreement with the surrounding text.

/// Project the casing of `original_span` onto `replacement`
///
/// Rules, in priority order:
/// 1. all-uppercase original → all-uppercase replacement
/// 2. all-lowercase original → all-lowercase replacement
/// 3. original starts with an uppercase letter (title case, sentence case,
///    or any first-upper mixed case) → replacement with its first letter
///    uppercased
/// 4. anything else → all-lowercase replacement
///
/// # Example
///
/// ```ignore
/// assert_eq!(project("BANK", "banki"), "BANKI");
/// assert_eq!(project("Bank", "banki"), "Banki");
/// assert_eq!(project("bank", "banki"), "banki");
/// ```
pub fn project(original_span: &str, replacement: &str) -> String {
    if original_span.is_empty() || replacement.is_empty() {
        return replacement.to_string();
    }

    let has_upper = original_span.chars().any(|c| c.is_uppercase());
    let has_lower = original_span.chars().any(|c| c.is_lowercase());

    if has_upper && !has_lower {
        return replacement.to_uppercase();
    }
    if !has_upper {
        return replacement.to_lowercase();
    }

    let first_is_upper = original_span
        .chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.is_uppercase())
        .unwrap_or(false);

    if first_is_upper {
        capitalize_first(replacement)
    } else {
        replacement.to_lowercase()
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
