//! Per-utterance voice interaction pipeline
//!
//! One strictly sequential run: recognize → disambiguate → translate to
//! English → generate → translate back → synthesize → play. Translation and
//! generation failures degrade inside their adapters; recognition failure
//! aborts the run quietly, synthesis failure aborts it loudly.

use crate::config::Config;
use crate::generate::ResponseGenerator;
use crate::lang::{self, Lang};
use crate::recognize::{self, Recognize, WhisperRecognizer, RECOGNITION_ORDER};
use crate::translate::{GoogleTranslator, Translator};
use crate::voice::{AudioPlayback, Synthesizer};
use crate::{Error, Result};

/// The assembled pipeline for one or more utterance runs
///
/// Holds only read-only service adapters; runs share no mutable state, so a
/// long-running variant can process utterances back to back off one instance.
pub struct Pipeline {
    // Absent when no OpenAI key is configured; only audio runs need it
    recognizer: Option<Box<dyn Recognize>>,
    translator: Translator,
    generator: ResponseGenerator,
    synthesizer: Synthesizer,
}

impl Pipeline {
    /// Assemble the pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the Gemini credential is missing
    pub fn from_config(config: &Config) -> Result<Self> {
        let recognizer = match &config.openai_api_key {
            Some(key) => Some(Box::new(WhisperRecognizer::new(
                key.clone(),
                config.stt_model.clone(),
            )?) as Box<dyn Recognize>),
            None => None,
        };

        let generator = ResponseGenerator::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.max_tokens,
        )?;

        Ok(Self {
            recognizer,
            translator: Translator::new(Box::new(GoogleTranslator::new())),
            generator,
            synthesizer: Synthesizer::new(),
        })
    }

    /// Run the full pipeline on one captured utterance
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when no recognizer is configured,
    /// `Error::Recognition` when no language attempt yields a transcript, or
    /// `Error::Synthesis`/`Error::Audio` when the reply cannot be spoken
    pub async fn run_audio(&self, wav: &[u8], playback: &mut AudioPlayback) -> Result<()> {
        let recognizer = self
            .recognizer
            .as_deref()
            .ok_or_else(|| Error::Config("OPENAI_API_KEY not set".to_string()))?;

        let (text, tentative) =
            recognize::recognize_with_fallback(recognizer, wav, &RECOGNITION_ORDER).await?;

        let language = lang::disambiguate(&text, tentative);
        tracing::info!(
            transcript = %text,
            tentative = %tentative,
            resolved = %language,
            "utterance disambiguated"
        );

        self.respond(&text, language, playback).await
    }

    /// Generate and speak a reply to already-recognized text
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    pub async fn respond(
        &self,
        text: &str,
        language: Lang,
        playback: &mut AudioPlayback,
    ) -> Result<()> {
        // No-op when the utterance is already English
        let english = self.translator.translate(text, language, Lang::En).await;

        let reply = self.generator.reply(&english).await;

        let localized = self.translator.translate(&reply, Lang::En, language).await;
        tracing::info!(reply = %localized, %language, "speaking reply");

        let audio = self.synthesizer.synthesize(&localized, language).await?;
        playback.play_mp3(&audio).await?;

        Ok(())
    }
}
