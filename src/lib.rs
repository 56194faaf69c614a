//! Vaani - bilingual English/Hindi voice assistant pipeline
//!
//! Captures spoken audio, transcribes it with an English-first/Hindi-fallback
//! recognizer, resolves the utterance language with a small lexical and
//! script heuristic, routes the text through translation and a generative
//! model, and speaks the reply back in the speaker's language.
//!
//! # Architecture
//!
//! ```text
//! mic ──▶ recognize (en, then hi) ──▶ disambiguate ──▶ [hi→en]
//!                                                        │
//! speaker ◀── synthesize ◀── [en→hi] ◀── generate ◀──────┘
//! ```
//!
//! The disambiguation heuristic in [`lang`] is the core of the crate;
//! everything else is an adapter over an external service.

pub mod config;
pub mod error;
pub mod generate;
pub mod lang;
pub mod pipeline;
pub mod recognize;
pub mod translate;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use lang::Lang;
pub use pipeline::Pipeline;
