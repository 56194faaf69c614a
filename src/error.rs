//! Error types for the vaani pipeline

use thiserror::Error;

/// Result type alias for vaani operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the voice pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, bad env value)
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio capture or playback error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech recognition error (no speech detected, service unavailable)
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Translation backend error
    #[error("translation error: {0}")]
    Translation(String),

    /// Response generation error
    #[error("generation error: {0}")]
    Generation(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
