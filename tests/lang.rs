//! Language disambiguation tests
//!
//! Exercises the classification rules, the Hindi-override threshold, and the
//! asymmetry between fresh classification and override.

use vaani::lang::{classify, contains_devanagari, count_indicators, disambiguate, Lang};

#[test]
fn two_indicators_classify_as_english() {
    // "the", "is", "on", "a" all match
    assert_eq!(classify("the cat is on a mat"), Lang::En);
}

#[test]
fn indicators_beat_devanagari_in_fresh_classification() {
    // Lexical rule fires before the script check
    let text = "the word नमस्ते is common";
    assert!(contains_devanagari(text));
    assert!(count_indicators(text) >= 2);
    assert_eq!(classify(text), Lang::En);
}

#[test]
fn devanagari_with_few_indicators_is_hindi() {
    let text = "आप कैसे हैं";
    assert!(contains_devanagari(text));
    assert_eq!(count_indicators(text), 0);
    assert_eq!(classify(text), Lang::Hi);
    assert_eq!(disambiguate(text, Lang::En), Lang::Hi);
}

#[test]
fn no_evidence_defaults_to_english() {
    assert_eq!(classify("bonjour monde"), Lang::En);
    assert_eq!(classify("hello friend"), Lang::En);
}

#[test]
fn hindi_tag_overrides_to_english_at_three_indicators() {
    // "this", "is", "the" = 3 matches
    let text = "this is the plan";
    assert_eq!(count_indicators(text), 3);
    assert_eq!(disambiguate(text, Lang::Hi), Lang::En);
}

#[test]
fn hindi_tag_survives_two_indicators() {
    // "is", "so" = exactly 2 matches, no Devanagari: enough to classify
    // fresh text as English, not enough to override a Hindi recognition
    let text = "chai is so strong";
    assert_eq!(count_indicators(text), 2);
    assert!(!contains_devanagari(text));

    assert_eq!(disambiguate(text, Lang::En), Lang::En);
    assert_eq!(disambiguate(text, Lang::Hi), Lang::Hi);
}

#[test]
fn quick_brown_fox_asymmetry() {
    // Only "the" matches; below both thresholds
    let text = "the quick brown fox";
    assert_eq!(count_indicators(text), 1);

    // Fresh classification defaults to English
    assert_eq!(disambiguate(text, Lang::En), Lang::En);
    // A confirmed Hindi recognition is not casually overridden
    assert_eq!(disambiguate(text, Lang::Hi), Lang::Hi);
}

#[test]
fn empty_input_is_total() {
    assert_eq!(count_indicators(""), 0);
    assert!(!contains_devanagari(""));
    assert_eq!(classify(""), Lang::En);
    assert_eq!(disambiguate("", Lang::En), Lang::En);
    assert_eq!(disambiguate("", Lang::Hi), Lang::Hi);
}

#[test]
fn counting_ignores_token_order_and_case() {
    assert_eq!(count_indicators("IS the THE is"), 4);
    assert_eq!(
        count_indicators("is the cat"),
        count_indicators("cat the is")
    );
}

#[test]
fn counting_is_whole_token_only() {
    // "these" matches as a token; "theses" must not
    assert_eq!(count_indicators("these"), 1);
    assert_eq!(count_indicators("theses"), 0);
    assert_eq!(count_indicators("other otherwise"), 1);
}

#[test]
fn devanagari_boundaries() {
    // First and last code points of the block
    assert!(contains_devanagari("\u{0900}"));
    assert!(contains_devanagari("\u{097F}"));
    // Neighbors just outside the block
    assert!(!contains_devanagari("\u{08FF}"));
    assert!(!contains_devanagari("\u{0980}"));
}

#[test]
fn lang_metadata() {
    assert_eq!(Lang::En.code(), "en");
    assert_eq!(Lang::Hi.code(), "hi");
    assert_eq!(Lang::En.recognition_hint(), "en-US");
    assert_eq!(Lang::Hi.recognition_hint(), "hi-IN");
    assert_eq!(Lang::Hi.display_name(), "Hindi");
    assert_eq!(Lang::En.to_string(), "en");
}
