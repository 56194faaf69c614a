//! Speech recognition adapter
//!
//! Recognition is biased toward English: the pipeline tries an ordered list
//! of language hints and takes the first attempt that yields a usable
//! transcript. The ordering lives in [`RECOGNITION_ORDER`], not in nested
//! error handling.

use async_trait::async_trait;

use crate::lang::Lang;
use crate::{Error, Result};

/// Language attempts in preference order (English first, Hindi fallback)
pub const RECOGNITION_ORDER: [Lang; 2] = [Lang::En, Lang::Hi];

/// Response from the Whisper transcription API
#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Speech recognition backend contract
#[async_trait]
pub trait Recognize: Send + Sync {
    /// Transcribe WAV audio under a language hint
    ///
    /// # Errors
    ///
    /// Returns error if no speech is detected or the service is unavailable
    async fn recognize(&self, audio: &[u8], lang: Lang) -> Result<String>;
}

/// Transcribes speech via the `OpenAI` Whisper API
pub struct WhisperRecognizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl WhisperRecognizer {
    /// Create a new recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for Whisper".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Recognize for WhisperRecognizer {
    async fn recognize(&self, audio: &[u8], lang: Lang) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), %lang, "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("utterance.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Recognition(e.to_string()))?,
            )
            .text("model", self.model.clone())
            .text("language", lang.code());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Whisper request failed");
                e
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Whisper API error");
            return Err(Error::Recognition(format!(
                "Whisper API error {status}: {body}"
            )));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse response");
            e
        })?;

        let transcript = result.text.trim().to_string();
        if transcript.is_empty() {
            return Err(Error::Recognition(format!(
                "no speech detected under {} hint",
                lang.recognition_hint()
            )));
        }

        Ok(transcript)
    }
}

/// Run recognition attempts in order, short-circuiting on the first success
///
/// Returns the transcript together with the language hint that produced it
/// (the tentative tag, pending disambiguation).
///
/// # Errors
///
/// Returns `Error::Recognition` when every attempt fails
pub async fn recognize_with_fallback(
    recognizer: &dyn Recognize,
    audio: &[u8],
    attempts: &[Lang],
) -> Result<(String, Lang)> {
    for &lang in attempts {
        match recognizer.recognize(audio, lang).await {
            Ok(text) => {
                tracing::info!(%lang, transcript = %text, "recognized");
                return Ok((text, lang));
            }
            Err(e) => {
                tracing::debug!(%lang, error = %e, "recognition attempt failed");
            }
        }
    }

    Err(Error::Recognition(
        "no usable transcription from any language attempt".to_string(),
    ))
}
