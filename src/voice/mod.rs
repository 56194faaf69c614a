//! Audio input/output
//!
//! Microphone capture, speaker playback, and speech synthesis. Recognition
//! lives in `recognize.rs`; this module only moves samples around.

mod capture;
mod playback;
mod synth;

pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
pub use playback::AudioPlayback;
pub use synth::Synthesizer;
