//! Pipeline adapter tests with test doubles
//!
//! Verifies the translation short-circuit and degradation rules and the
//! English-first recognition fallback, without any network or audio hardware.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vaani::lang::Lang;
use vaani::recognize::{recognize_with_fallback, Recognize, RECOGNITION_ORDER};
use vaani::translate::{Translate, Translator};
use vaani::{Error, Result};

/// Backend double that records calls and echoes a marked translation
struct CountingBackend {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Translate for CountingBackend {
    async fn translate(&self, text: &str, _source: Lang, target: Lang) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{target}] {text}"))
    }
}

/// Backend double that always fails
struct FailingBackend {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Translate for FailingBackend {
    async fn translate(&self, _text: &str, _source: Lang, _target: Lang) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Translation("service unavailable".to_string()))
    }
}

#[tokio::test]
async fn identical_languages_short_circuit_without_backend_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = Translator::new(Box::new(CountingBackend {
        calls: Arc::clone(&calls),
    }));

    let out = translator.translate("नमस्ते", Lang::Hi, Lang::Hi).await;

    assert_eq!(out, "नमस्ते");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cross_language_translation_invokes_backend_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = Translator::new(Box::new(CountingBackend {
        calls: Arc::clone(&calls),
    }));

    let out = translator.translate("hello", Lang::En, Lang::Hi).await;

    assert_eq!(out, "[hi] hello");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn backend_failure_degrades_to_original_text() {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = Translator::new(Box::new(FailingBackend {
        calls: Arc::clone(&calls),
    }));

    let out = translator.translate("hello", Lang::En, Lang::Hi).await;

    // Failure is swallowed; the caller just gets the untranslated text
    assert_eq!(out, "hello");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Recognizer double scripted per language hint
struct ScriptedRecognizer {
    english: Result<&'static str>,
    hindi: Result<&'static str>,
    attempted: Mutex<Vec<Lang>>,
}

impl ScriptedRecognizer {
    fn new(english: Result<&'static str>, hindi: Result<&'static str>) -> Self {
        Self {
            english,
            hindi,
            attempted: Mutex::new(Vec::new()),
        }
    }

    fn attempted(&self) -> Vec<Lang> {
        self.attempted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Recognize for ScriptedRecognizer {
    async fn recognize(&self, _audio: &[u8], lang: Lang) -> Result<String> {
        self.attempted.lock().unwrap().push(lang);
        let scripted = match lang {
            Lang::En => &self.english,
            Lang::Hi => &self.hindi,
        };
        match scripted {
            Ok(text) => Ok((*text).to_string()),
            Err(_) => Err(Error::Recognition("no speech detected".to_string())),
        }
    }
}

#[tokio::test]
async fn english_success_short_circuits_hindi_attempt() {
    let recognizer = ScriptedRecognizer::new(
        Ok("what time is it"),
        Err(Error::Recognition("unused".to_string())),
    );

    let (text, tentative) = recognize_with_fallback(&recognizer, &[], &RECOGNITION_ORDER)
        .await
        .unwrap();

    assert_eq!(text, "what time is it");
    assert_eq!(tentative, Lang::En);
    assert_eq!(recognizer.attempted(), vec![Lang::En]);
}

#[tokio::test]
async fn hindi_fallback_runs_after_english_failure() {
    let recognizer = ScriptedRecognizer::new(
        Err(Error::Recognition("no speech detected".to_string())),
        Ok("आप कैसे हैं"),
    );

    let (text, tentative) = recognize_with_fallback(&recognizer, &[], &RECOGNITION_ORDER)
        .await
        .unwrap();

    assert_eq!(text, "आप कैसे हैं");
    assert_eq!(tentative, Lang::Hi);
    assert_eq!(recognizer.attempted(), vec![Lang::En, Lang::Hi]);
}

#[tokio::test]
async fn both_attempts_failing_is_a_recognition_error() {
    let recognizer = ScriptedRecognizer::new(
        Err(Error::Recognition("no speech detected".to_string())),
        Err(Error::Recognition("no speech detected".to_string())),
    );

    let result = recognize_with_fallback(&recognizer, &[], &RECOGNITION_ORDER).await;

    assert!(matches!(result, Err(Error::Recognition(_))));
    assert_eq!(recognizer.attempted(), vec![Lang::En, Lang::Hi]);
}

#[test]
fn recognition_order_is_english_first() {
    assert_eq!(RECOGNITION_ORDER, [Lang::En, Lang::Hi]);
}
