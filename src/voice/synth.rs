//! Speech synthesis via the Google Translate TTS endpoint
//!
//! Failures here propagate: there is no fallback for producing audio, so a
//! run that cannot be spoken is a failed run.

use crate::lang::Lang;
use crate::{Error, Result};

/// The TTS endpoint rejects queries much longer than this
const MAX_CHUNK_LEN: usize = 200;

/// Synthesizes speech from text
pub struct Synthesizer {
    client: reqwest::Client,
}

impl Synthesizer {
    /// Create a new synthesizer
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Synthesize text to MP3 bytes in the given language
    ///
    /// Long text is synthesized in chunks and the MP3 streams concatenated;
    /// the decoder handles back-to-back frames.
    ///
    /// # Errors
    ///
    /// Returns error if any chunk fails to synthesize
    pub async fn synthesize(&self, text: &str, lang: Lang) -> Result<Vec<u8>> {
        let mut audio = Vec::new();

        for chunk in split_chunks(text, MAX_CHUNK_LEN) {
            audio.extend(self.synthesize_chunk(&chunk, lang).await?);
        }

        if audio.is_empty() {
            return Err(Error::Synthesis("nothing to synthesize".to_string()));
        }

        tracing::info!(bytes = audio.len(), %lang, "synthesis complete");
        Ok(audio)
    }

    async fn synthesize_chunk(&self, chunk: &str, lang: Lang) -> Result<Vec<u8>> {
        let url = format!(
            "https://translate.google.com/translate_tts?ie=UTF-8&client=tw-ob&tl={}&q={}",
            lang.code(),
            urlencoding::encode(chunk)
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "TTS request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TTS API error");
            return Err(Error::Synthesis(format!("TTS API error {status}: {body}")));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into whitespace-respecting chunks of at most `max_len` bytes
///
/// A single word longer than the limit becomes its own chunk rather than
/// being split mid-word.
fn split_chunks(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::split_chunks;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_chunks("hello world", 200), vec!["hello world"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_chunks("", 200).is_empty());
        assert!(split_chunks("   ", 200).is_empty());
    }

    #[test]
    fn long_text_splits_on_word_boundaries() {
        let chunks = split_chunks("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
    }

    #[test]
    fn oversized_word_stays_whole() {
        let chunks = split_chunks("supercalifragilistic yes", 10);
        assert_eq!(chunks, vec!["supercalifragilistic", "yes"]);
    }
}
