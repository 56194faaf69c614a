//! Text translation between English and Hindi
//!
//! The pipeline consumes translation through [`Translator`], which never
//! fails: identical source and target short-circuit without touching the
//! backend, and a backend error degrades to passing the original text
//! through. The reply is then simply untranslated rather than missing.

use async_trait::async_trait;

use crate::lang::Lang;
use crate::{Error, Result};

/// Translation backend contract
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate text from `source` to `target`
    ///
    /// # Errors
    ///
    /// Returns error if the backend request fails or yields no translation
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String>;
}

/// Google web-translate backend
pub struct GoogleTranslator {
    client: reqwest::Client,
}

impl GoogleTranslator {
    /// Create a new translator backend
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translate for GoogleTranslator {
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String> {
        let url = format!(
            "https://translate.googleapis.com/translate_a/single?client=gtx&sl={}&tl={}&dt=t&q={}",
            source.code(),
            target.code(),
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Translation(format!(
                "translate API error {status}: {body}"
            )));
        }

        // Response shape is nested arrays: [[["translated", "original", ...], ...], ...]
        let body: serde_json::Value = response.json().await?;
        let translated: String = body
            .get(0)
            .and_then(serde_json::Value::as_array)
            .map(|segments| {
                segments
                    .iter()
                    .filter_map(|seg| seg.get(0).and_then(serde_json::Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(Error::Translation("empty translation result".to_string()));
        }

        Ok(translated)
    }
}

/// Degrading translation adapter used by the pipeline
///
/// Wraps a [`Translate`] backend and absorbs its failures.
pub struct Translator {
    backend: Box<dyn Translate>,
}

impl Translator {
    /// Wrap a translation backend
    #[must_use]
    pub fn new(backend: Box<dyn Translate>) -> Self {
        Self { backend }
    }

    /// Translate text, degrading to the original on any failure
    ///
    /// When `source` equals `target` the input is returned unchanged and the
    /// backend is never invoked. Some backends degrade or error on identical
    /// language pairs, so the short-circuit is a correctness requirement.
    pub async fn translate(&self, text: &str, source: Lang, target: Lang) -> String {
        if source == target {
            return text.to_string();
        }

        match self.backend.translate(text, source, target).await {
            Ok(translated) => {
                tracing::info!(%source, %target, translated = %translated, "translated");
                translated
            }
            Err(e) => {
                tracing::warn!(
                    %source,
                    %target,
                    error = %e,
                    "translation failed, passing original text through"
                );
                text.to_string()
            }
        }
    }
}
