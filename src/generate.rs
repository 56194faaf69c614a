//! Reply generation via the Gemini API
//!
//! Consumes English text and produces a cleaned English reply. Generation
//! failures never abort a run; the caller gets a fixed apology instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Fixed reply used when generation fails (already clean for synthesis)
pub const FALLBACK_REPLY: &str = "I couldnt generate a response at this time";

/// Instruction prefix keeping replies short and speakable
const PROMPT_PREFIX: &str = "Provide a well-structured and informative response. \
    Ensure clarity while adding relevant details, explanations, or examples. \
    Keep the response natural and suitable for spoken conversation. \
    Do not use special characters, symbols, or emojis. \
    Here is the input: ";

/// Characters outside this class are stripped before synthesis
static NON_SPEAKABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid regex"));

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    text: String,
}

/// Generates conversational replies using Gemini
pub struct ResponseGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ResponseGenerator {
    /// Create a new generator
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Gemini API key required".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            max_tokens,
        })
    }

    /// Generate a cleaned reply, degrading to [`FALLBACK_REPLY`] on failure
    pub async fn reply(&self, text: &str) -> String {
        match self.generate(text).await {
            Ok(raw) => clean_reply(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "generation failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Call the Gemini `generateContent` endpoint
    async fn generate(&self, text: &str) -> Result<String> {
        tracing::debug!(model = %self.model, "generating reply");

        let prompt = format!("{PROMPT_PREFIX}{text}");
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: 0.7,
                top_p: 0.9,
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Gemini API error");
            return Err(Error::Generation(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let result: GenerateResponse = response.json().await?;
        let reply: String = result
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(Error::Generation("no candidates in response".to_string()));
        }

        tracing::info!(reply = %reply, "generated reply");
        Ok(reply)
    }
}

/// Strip everything outside letters, digits, and whitespace
///
/// The synthesizer reads the reply aloud, so markup and punctuation artifacts
/// from the model must not reach it.
#[must_use]
pub fn clean_reply(text: &str) -> String {
    NON_SPEAKABLE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_reply_strips_special_characters() {
        assert_eq!(clean_reply("Hello, world! (test)"), "Hello world test");
        assert_eq!(clean_reply("a*b&c"), "abc");
    }

    #[test]
    fn clean_reply_keeps_alphanumerics_and_whitespace() {
        assert_eq!(clean_reply("plain text 123"), "plain text 123");
        assert_eq!(clean_reply("line\nbreak\ttab"), "line\nbreak\ttab");
    }

    #[test]
    fn clean_reply_empty_input() {
        assert_eq!(clean_reply(""), "");
    }

    #[test]
    fn fallback_reply_is_already_clean() {
        assert_eq!(clean_reply(FALLBACK_REPLY), FALLBACK_REPLY);
    }
}
