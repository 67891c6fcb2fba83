use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{ValidationError, WAV_CONTENT_TYPE, validate_speech_request};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /speak`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakRequest {
    /// Text to synthesize
    pub text: String,
    /// Public voice code such as `en-female`
    #[serde(default)]
    pub voice: Option<String>,
}

/// Synthesize speech and return it as a WAV download.
///
/// Validation order: model readiness (503), empty text (400), length (413).
/// Engine and file failures are logged and reported as a generic 500.
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload.map_err(|rejection| reject_body(&state, rejection))?;
    validate_speech_request(state.readiness, &request.text, state.config.max_text_chars)?;

    let voice_preset = state.voices.resolve(request.voice.as_deref());
    info!(
        voice_preset,
        chars = request.text.chars().count(),
        "Generating audio for input text"
    );

    let waveform = state
        .engine
        .generate(&request.text, voice_preset)
        .await
        .map_err(|e| {
            error!(error = %e, voice_preset, "Error during audio generation");
            AppError::from(e)
        })?;

    let stored = state.audio_store.persist(waveform).await.map_err(|e| {
        error!(error = %e, "Failed to write generated audio");
        AppError::from(e)
    })?;

    info!(
        path = %stored.path.display(),
        size = stored.bytes.len(),
        "Audio saved"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(WAV_CONTENT_TYPE),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", stored.filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((StatusCode::OK, headers, stored.bytes).into_response())
}

/// Map an extractor rejection to an error response.
///
/// A body over the size limit cannot hold an acceptable text, so it gets the
/// same answer as an over-long text (after the readiness check).
fn reject_body(state: &AppState, rejection: JsonRejection) -> AppError {
    if rejection.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::from(rejection);
    }
    let err = if state.readiness.is_ready() {
        ValidationError::TextTooLong {
            max_chars: state.config.max_text_chars,
        }
    } else {
        ValidationError::ModelNotLoaded
    };
    AppError::from(err)
}
