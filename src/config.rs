//! Configuration for the vaani pipeline
//!
//! Everything is read from the environment once at startup. The Gemini
//! credential is the only hard requirement; without it the process refuses
//! to start.

use crate::{Error, Result};

/// Default Whisper model for transcription
const DEFAULT_STT_MODEL: &str = "whisper-1";

/// Default Gemini model for reply generation
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default cap on generated reply length, in tokens
const DEFAULT_MAX_TOKENS: u32 = 100;

/// Default microphone listen window in seconds
const DEFAULT_LISTEN_SECS: u64 = 5;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (required)
    pub gemini_api_key: String,

    /// `OpenAI` API key for Whisper transcription (required for live runs)
    pub openai_api_key: Option<String>,

    /// STT model identifier
    pub stt_model: String,

    /// Gemini model identifier
    pub gemini_model: String,

    /// Maximum generated reply length in tokens
    pub max_tokens: u32,

    /// Microphone listen window in seconds
    pub listen_secs: u64,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `GEMINI_API_KEY` is unset or empty, or if
    /// a numeric setting fails to parse.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "GEMINI_API_KEY not set; a Gemini API key is required".to_string(),
                )
            })?;

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let stt_model = std::env::var("VAANI_STT_MODEL")
            .unwrap_or_else(|_| DEFAULT_STT_MODEL.to_string());
        let gemini_model = std::env::var("VAANI_GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let max_tokens = parse_env("VAANI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let listen_secs = parse_env("VAANI_LISTEN_SECS", DEFAULT_LISTEN_SECS)?;

        Ok(Self {
            gemini_api_key,
            openai_api_key,
            stt_model,
            gemini_model,
            max_tokens,
            listen_secs,
        })
    }
}

/// Parse a numeric env var, falling back to a default when unset
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("invalid value for {name}: {value}"))),
        Err(_) => Ok(default),
    }
}
