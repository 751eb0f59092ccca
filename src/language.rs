//! Language code resolution
//!
//! Bidirectional mapping between the terminology corpus's language codes
//! (ISO 639-3 style, three letters) and the translation engine's codes
//! (ISO 639-1 style, two letters), plus a membership check against the
//! engine's known language set.
//!
//! Conversion is best-effort normalization, not validation: a code with no
//! table entry passes through unchanged, and an unsupported code never blocks
//! a translation (the orchestrator only emits an advisory).

/// Corpus code → engine code.
///
/// Keys are unique, so lookups are deterministic. Twi maps to `tw`, the
/// dedicated ISO 639-1 Twi code; Akan as a whole stays reachable via `aka`.
const CODE_MAPPING: &[(&str, &str)] = &[
    ("twi", "tw"),    // Twi
    ("aka", "ak"),    // Akan
    ("fra", "fr"),    // French
    ("deu", "de"),    // German
    ("spa", "es"),    // Spanish
    ("por", "pt"),    // Portuguese
    ("ita", "it"),    // Italian
    ("rus", "ru"),    // Russian
    ("zho", "zh-cn"), // Chinese Simplified
    ("cmn", "zh-cn"), // Mandarin
    ("jpn", "ja"),    // Japanese
    ("kor", "ko"),    // Korean
    ("ara", "ar"),    // Arabic
    ("hin", "hi"),    // Hindi
    ("ben", "bn"),    // Bengali
    ("urd", "ur"),    // Urdu
    ("swa", "sw"),    // Swahili
    ("yor", "yo"),    // Yoruba
    ("ibo", "ig"),    // Igbo
    ("hau", "ha"),    // Hausa
    ("amh", "am"),    // Amharic
    ("orm", "om"),    // Oromo
    ("som", "so"),    // Somali
    ("wol", "wo"),    // Wolof
    ("ful", "ff"),    // Fulah
    ("mand", "man"),  // Mandingo
    ("ewe", "ee"),    // Ewe
    ("tir", "ti"),    // Tigrinya
];

/// Languages the external engine is known to handle.
const ENGINE_LANGUAGES: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "eu", "be", "bn", "bs", "bg", "ca", "ceb", "zh", "zh-cn",
    "zh-tw", "co", "hr", "cs", "da", "nl", "en", "eo", "et", "fi", "fr", "fy", "gl", "ka", "de",
    "el", "gu", "ht", "ha", "haw", "he", "hi", "hmn", "hu", "is", "ig", "id", "ga", "it", "ja",
    "jv", "kn", "kk", "km", "rw", "ko", "ku", "ky", "lo", "la", "lv", "lt", "lb", "mk", "mg", "ms",
    "ml", "mt", "mi", "mr", "mn", "my", "ne", "no", "ny", "or", "ps", "fa", "pl", "pt", "pa", "ro",
    "ru", "sm", "gd", "sr", "st", "sn", "sd", "si", "sk", "sl", "so", "es", "su", "sw", "sv", "tl",
    "tg", "ta", "tt", "te", "th", "tr", "tk", "uk", "ur", "ug", "uz", "vi", "cy", "xh", "yi", "yo",
    "zu",
];

/// Convert a language code to the engine's form
///
/// Two-letter codes are already in engine form and pass through unchanged
/// (lowercased). Longer codes are looked up in the mapping table; codes
/// without an entry pass through unchanged.
///
/// # Example
///
/// ```ignore
/// assert_eq!(to_engine_code("fra"), "fr");
/// assert_eq!(to_engine_code("fr"), "fr");
/// assert_eq!(to_engine_code("xyz"), "xyz"); // best-effort pass-through
/// ```
pub fn to_engine_code(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let code = code.to_lowercase();
    if code.len() == 2 {
        return code;
    }

    CODE_MAPPING
        .iter()
        .find(|(corpus, _)| *corpus == code)
        .map(|(_, engine)| (*engine).to_string())
        .unwrap_or(code)
}

/// Convert an engine code back to the corpus's form
///
/// The first table entry whose engine code matches wins, so reverse lookups
/// are deterministic even where two corpus codes share an engine code
/// (`zho` and `cmn` both map to `zh-cn`; `zh-cn` converts back to `zho`).
/// Unmapped codes pass through unchanged.
pub fn from_engine_code(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let code = code.to_lowercase();
    CODE_MAPPING
        .iter()
        .find(|(_, engine)| *engine == code)
        .map(|(corpus, _)| (*corpus).to_string())
        .unwrap_or(code)
}

/// Whether a code (in either form) is in the engine's known language set
///
/// A `false` here does not block translation; the orchestrator records an
/// advisory warning and proceeds.
pub fn is_supported(code: &str) -> bool {
    let engine_code = to_engine_code(code);
    ENGINE_LANGUAGES.contains(&engine_code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_letter_to_engine() {
        assert_eq!(to_engine_code("fra"), "fr");
        assert_eq!(to_engine_code("deu"), "de");
        assert_eq!(to_engine_code("swa"), "sw");
    }

    #[test]
    fn test_engine_form_passes_through() {
        assert_eq!(to_engine_code("fr"), "fr");
        assert_eq!(to_engine_code("en"), "en");
    }

    #[test]
    fn test_unmapped_code_passes_through() {
        assert_eq!(to_engine_code("xyz"), "xyz");
        assert_eq!(to_engine_code("qqq"), "qqq");
    }

    #[test]
    fn test_case_normalized() {
        assert_eq!(to_engine_code("FRA"), "fr");
        assert_eq!(to_engine_code("FR"), "fr");
    }

    #[test]
    fn test_twi_resolves_deterministically() {
        // twi has exactly one entry; Akan is reachable through aka
        assert_eq!(to_engine_code("twi"), "tw");
        assert_eq!(to_engine_code("aka"), "ak");
    }

    #[test]
    fn test_chinese_maps_to_engine_variant() {
        assert_eq!(to_engine_code("zho"), "zh-cn");
        assert_eq!(to_engine_code("cmn"), "zh-cn");
    }

    #[test]
    fn test_to_engine_code_idempotent() {
        for (corpus, _) in CODE_MAPPING {
            let once = to_engine_code(corpus);
            assert_eq!(to_engine_code(&once), once, "not idempotent for {corpus}");
        }
        for engine in ENGINE_LANGUAGES {
            assert_eq!(to_engine_code(engine), *engine);
        }
    }

    #[test]
    fn test_from_engine_code() {
        assert_eq!(from_engine_code("fr"), "fra");
        assert_eq!(from_engine_code("tw"), "twi");
        assert_eq!(from_engine_code("ak"), "aka");
    }

    #[test]
    fn test_from_engine_code_first_match_wins() {
        // zho appears before cmn in the table
        assert_eq!(from_engine_code("zh-cn"), "zho");
    }

    #[test]
    fn test_from_engine_code_unmapped() {
        assert_eq!(from_engine_code("en"), "en");
    }

    #[test]
    fn test_empty_code() {
        assert_eq!(to_engine_code(""), "");
        assert_eq!(from_engine_code(""), "");
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("fr"));
        assert!(is_supported("fra"));
        assert!(is_supported("en"));
        assert!(is_supported("zho"));
    }

    #[test]
    fn test_low_resource_codes_unsupported() {
        // Twi/Akan are outside the engine's set; callers get an advisory only
        assert!(!is_supported("twi"));
        assert!(!is_supported("aka"));
        assert!(!is_supported("ewe"));
    }
}
