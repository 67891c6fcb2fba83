//! One-shot synthesis from the command line.
//!
//! This powers the `speak-gateway synth` CLI command: load the engine, render
//! a single text to a WAV file, and exit. Handy for checking that the
//! inference worker and its weights are healthy before putting the HTTP
//! service in front of them.
//!
//! ```text
//! $ speak-gateway synth --voice en-female --output intro.wav "Hello there"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::config::ServerConfig;
use crate::core::{
    Readiness, SynthesisEngine, VoicePresetResolver, encode_wav, validate_speech_request,
};

/// What to synthesize and where to put it.
#[derive(Debug, Clone)]
pub struct SynthOptions {
    pub text: String,
    /// Public voice code, resolved the same way `/speak` resolves it
    pub voice: Option<String>,
    pub output: PathBuf,
}

/// Load `engine`, synthesize `options.text`, and write the WAV to `options.output`.
///
/// Unlike the server, a failed load is fatal here.
pub async fn run(
    config: &ServerConfig,
    engine: &dyn SynthesisEngine,
    options: SynthOptions,
) -> Result<PathBuf> {
    engine
        .load(&config.load_options())
        .await
        .context("Failed to load synthesis models")?;

    validate_speech_request(Readiness::Ready, &options.text, config.max_text_chars)
        .map_err(|e| anyhow!(e))?;

    let resolver = VoicePresetResolver::new(config.default_voice_preset.clone());
    let voice_preset = resolver.resolve(options.voice.as_deref());
    info!(voice_preset, "Generating audio");

    let waveform = engine
        .generate(&options.text, voice_preset)
        .await
        .context("Audio generation failed")?;
    info!(
        duration_secs = waveform.duration_secs(),
        sample_rate = waveform.sample_rate,
        "Audio generated"
    );

    let encoded = encode_wav(&waveform).context("Failed to encode WAV")?;

    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&options.output, encoded)
        .await
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    info!(path = %options.output.display(), "Audio saved");
    Ok(options.output)
}
