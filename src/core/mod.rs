pub mod audio;
pub mod engine;
pub mod readiness;
pub mod validation;
pub mod voice;

// Re-export commonly used types for convenience
pub use audio::{AudioError, AudioStore, StoredAudio, WAV_CONTENT_TYPE, encode_wav};
pub use engine::{
    DEFAULT_SAMPLE_RATE, EngineError, EngineResult, LoadOptions, RemoteEngine,
    RemoteEngineConfig, SynthesisEngine, Waveform,
};
pub use readiness::{Readiness, load_engine};
pub use validation::{DEFAULT_MAX_TEXT_CHARS, ValidationError, validate_speech_request};
pub use voice::{DEFAULT_VOICE_PRESET, Gender, VoicePreset, VoicePresetResolver};
