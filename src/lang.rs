//! Language detection and disambiguation
//!
//! Decides whether an utterance should be treated as English or Hindi using
//! two cheap signals: Devanagari script presence and a count of common
//! English function words. The recognizer's language hint is only trusted as
//! far as these signals allow.
//!
//! Rule order matters and is observable behavior: lexical evidence wins over
//! script, script wins over the default, and the default is English. A short
//! Hindi sentence that happens to contain two or more English-looking tokens
//! will classify as English; that bias is deliberate.

use std::fmt;

/// Common English function words that strongly indicate English
pub const ENGLISH_INDICATORS: &[&str] = &[
    "the", "is", "are", "was", "were", "this", "that", "these", "those", "a", "an",
    "and", "or", "but", "if", "of", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "from", "up",
    "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both",
    "each", "few", "more", "most", "other", "some", "such", "no", "not", "only",
    "own", "same", "so", "than", "too", "very",
];

/// Indicator matches required to classify fresh text as English
const CLASSIFY_THRESHOLD: usize = 2;

/// Indicator matches required to override a Hindi recognition result
///
/// Stricter than [`CLASSIFY_THRESHOLD`]: overriding an explicit Hindi
/// recognition needs stronger evidence than an initial classification.
const OVERRIDE_THRESHOLD: usize = 3;

/// Languages the pipeline supports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    /// English
    En,
    /// Hindi
    Hi,
}

impl Lang {
    /// ISO 639-1 code used by the translation and synthesis services
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Human-readable name for logs and CLI output
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
        }
    }

    /// BCP-47 tag passed to the speech recognizer as a language hint
    #[must_use]
    pub const fn recognition_hint(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Hi => "hi-IN",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Report whether the text contains at least one Devanagari character
/// (U+0900..=U+097F, the block used to write Hindi)
///
/// Empty or ASCII-only input returns false.
#[must_use]
pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Count whitespace-separated tokens that exactly match an English indicator
///
/// Matching is case-insensitive and whole-token; substrings do not count.
/// The empty string yields 0.
#[must_use]
pub fn count_indicators(text: &str) -> usize {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| ENGLISH_INDICATORS.contains(&token.as_str()))
        .count()
}

/// Classify text with no prior language commitment
///
/// First matching rule wins:
/// 1. two or more indicator matches is English,
/// 2. any Devanagari character is Hindi,
/// 3. otherwise English.
#[must_use]
pub fn classify(text: &str) -> Lang {
    let indicators = count_indicators(text);
    if indicators >= CLASSIFY_THRESHOLD {
        tracing::debug!(indicators, "indicator matches confirm English");
        return Lang::En;
    }

    if contains_devanagari(text) {
        tracing::debug!("Devanagari script present, confirming Hindi");
        return Lang::Hi;
    }

    Lang::En
}

/// Resolve the final language for an utterance given the recognizer's
/// tentative tag
///
/// Text recognized as English is re-classified from scratch. Text recognized
/// as Hindi keeps its tag unless the indicator count reaches the stricter
/// override threshold, in which case it flips to English. Total for any
/// input, including empty; never produces a tag outside [`Lang`].
#[must_use]
pub fn disambiguate(text: &str, tentative: Lang) -> Lang {
    match tentative {
        Lang::En => classify(text),
        Lang::Hi => {
            let indicators = count_indicators(text);
            if indicators >= OVERRIDE_THRESHOLD {
                tracing::info!(
                    indicators,
                    "strong English evidence in Hindi-tagged text, overriding to English"
                );
                Lang::En
            } else {
                Lang::Hi
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devanagari_detection() {
        assert!(contains_devanagari("नमस्ते"));
        assert!(contains_devanagari("mixed नमस्ते text"));
        assert!(!contains_devanagari("hello world"));
        assert!(!contains_devanagari(""));
    }

    #[test]
    fn indicator_counting_is_whole_token_and_case_insensitive() {
        assert_eq!(count_indicators("The cat IS here"), 3);
        // "theater" contains "the" but is not a token match
        assert_eq!(count_indicators("theater inside"), 0);
        assert_eq!(count_indicators(""), 0);
    }

    #[test]
    fn classify_prefers_lexical_evidence_over_script() {
        // Two indicators beat the Devanagari character
        assert_eq!(classify("the नमस्ते is"), Lang::En);
    }

    #[test]
    fn classify_defaults_to_english() {
        assert_eq!(classify(""), Lang::En);
        assert_eq!(classify("bonjour monde"), Lang::En);
    }
}
