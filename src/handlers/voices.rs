use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::core::Gender;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    /// Public code accepted by `/speak`, e.g. "en-female"
    pub code: String,
    /// Engine preset the code maps to
    pub preset: String,
    /// Language of the voice
    pub language: String,
    /// Gender of the voice
    pub gender: Gender,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoicesResponse {
    /// Preset used when no code or an unknown code is sent
    pub default: String,
    pub voices: Vec<Voice>,
}

/// List the voice codes `/speak` understands.
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let voices = state
        .voices
        .presets()
        .map(|(code, preset)| Voice {
            code: code.to_string(),
            preset: preset.id.to_string(),
            language: preset.language.to_string(),
            gender: preset.gender,
        })
        .collect();

    Json(VoicesResponse {
        default: state.voices.default_preset().to_string(),
        voices,
    })
}
