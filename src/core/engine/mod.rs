//! Synthesis engine abstraction.
//!
//! The neural model behind the gateway is an external collaborator. This module
//! defines the contract the rest of the service relies on:
//!
//! - a one-time [`SynthesisEngine::load`] invoked at startup with explicit
//!   [`LoadOptions`]
//! - a [`SynthesisEngine::generate`] call mapping `(text, voice_preset)` to a
//!   [`Waveform`]
//! - a fixed [`SynthesisEngine::sample_rate`] that never changes for the
//!   process lifetime
//!
//! [`RemoteEngine`] is the production implementation; it drives an inference
//! worker over HTTP.

mod remote;

pub use remote::{RemoteEngine, RemoteEngineConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Sample rate produced by the Bark family of models.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by a synthesis engine.
///
/// These never reach HTTP clients verbatim; the request boundary logs them and
/// replies with a generic internal error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Engine returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode engine audio: {0}")]
    Decode(String),

    #[error("Model load failed: {0}")]
    Load(String),

    #[error("Audio generation failed: {0}")]
    Generation(String),
}

/// Options passed to the engine's one-time load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Restrict checkpoint deserialization to plain tensors.
    ///
    /// Bark checkpoints carry pickled metadata, so this has to be `false` for
    /// the stock weights to load.
    pub weights_only: bool,
}

/// Mono audio produced by one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples, nominally within `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Samples per second
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Contract for the text-to-speech model the gateway fronts.
///
/// Implementations are shared read-only across concurrent requests, so they
/// must not mutate state inside [`generate`](SynthesisEngine::generate).
/// CPU-bound implementations are expected to move their work off the async
/// executor themselves (e.g. via `tokio::task::spawn_blocking`).
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Load model weights. Called exactly once, before serving traffic.
    async fn load(&self, options: &LoadOptions) -> EngineResult<()>;

    /// Synthesize `text` with the speaker selected by `voice_preset`.
    async fn generate(&self, text: &str, voice_preset: &str) -> EngineResult<Waveform>;

    /// Fixed output sample rate of this engine.
    fn sample_rate(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_duration() {
        let waveform = Waveform::new(vec![0.0; 12_000], DEFAULT_SAMPLE_RATE);
        assert!((waveform.duration_secs() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_waveform_zero_rate_has_no_duration() {
        let waveform = Waveform::new(vec![0.1, 0.2], 0);
        assert_eq!(waveform.duration_secs(), 0.0);
    }

    #[test]
    fn test_load_options_default_is_permissive() {
        assert!(!LoadOptions::default().weights_only);
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Status {
            status: 502,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "Engine returned HTTP 502: upstream down");
    }
}
