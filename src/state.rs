//! Shared application state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::{AudioStore, Readiness, SynthesisEngine, VoicePresetResolver, load_engine};

/// State shared by every request handler.
///
/// Built once at startup. Nothing in here changes afterwards: the engine is
/// used read-only and `readiness` is the frozen outcome of the startup load.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: Arc<dyn SynthesisEngine>,
    pub readiness: Readiness,
    pub voices: VoicePresetResolver,
    pub audio_store: AudioStore,
}

impl AppState {
    /// Load the engine once and build the state around the outcome.
    ///
    /// A failed load still yields a usable state; it just reports not-ready.
    pub async fn new(config: ServerConfig, engine: Arc<dyn SynthesisEngine>) -> Arc<Self> {
        let readiness = load_engine(engine.as_ref(), &config.load_options()).await;
        Self::with_readiness(config, engine, readiness)
    }

    /// Build the state with an already-known readiness.
    pub fn with_readiness(
        config: ServerConfig,
        engine: Arc<dyn SynthesisEngine>,
        readiness: Readiness,
    ) -> Arc<Self> {
        let voices = VoicePresetResolver::new(config.default_voice_preset.clone());
        let audio_store = AudioStore::new(config.output_dir.clone());
        Arc::new(Self {
            config,
            engine,
            readiness,
            voices,
            audio_store,
        })
    }
}
