//! HTTP-backed synthesis engine.
//!
//! The model itself runs in a separate inference worker (Python/Torch for the
//! Bark checkpoints). This engine drives that worker over two endpoints:
//!
//! - `POST {base_url}/preload` with `{"weights_only": bool}`
//! - `POST {base_url}/generate` with `{"text": ..., "history_prompt": ...}`,
//!   answered with a WAV body
//!
//! No request timeout is applied unless one is configured; a long generation
//! is bounded only by the caller.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use super::{
    DEFAULT_SAMPLE_RATE, EngineError, EngineResult, LoadOptions, SynthesisEngine, Waveform,
};

/// Connection settings for [`RemoteEngine`]
#[derive(Debug, Clone)]
pub struct RemoteEngineConfig {
    /// Base URL of the inference worker, e.g. `http://127.0.0.1:9000`
    pub base_url: String,
    /// Optional bearer token sent with every request
    pub api_key: Option<String>,
    /// Sample rate the worker's model produces
    pub sample_rate: u32,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for RemoteEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            api_key: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            timeout: None,
        }
    }
}

impl RemoteEngineConfig {
    /// Reject a base URL that is not http(s) or a zero sample rate.
    pub fn validate(&self) -> EngineResult<()> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            EngineError::InvalidConfiguration(format!(
                "Invalid engine URL '{}': {e}",
                self.base_url
            ))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(EngineError::InvalidConfiguration(format!(
                "Engine URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.sample_rate == 0 {
            return Err(EngineError::InvalidConfiguration(
                "Engine sample rate must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Synthesis engine that delegates to an out-of-process inference worker.
pub struct RemoteEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    sample_rate: u32,
}

impl RemoteEngine {
    pub fn new(config: RemoteEngineConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            sample_rate: config.sample_rate,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(self.endpoint(path));
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Turn a non-2xx reply into [`EngineError::Status`].
async fn check_status(response: reqwest::Response) -> EngineResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EngineError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Decode a WAV payload into a mono waveform, keeping the first channel.
pub(crate) fn decode_wav(bytes: &[u8]) -> EngineResult<Waveform> {
    let mut reader =
        hound::WavReader::new(Cursor::new(bytes)).map_err(|e| EngineError::Decode(e.to_string()))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| EngineError::Decode(e.to_string()))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| EngineError::Decode(e.to_string()))?
        }
    };

    let samples = interleaved.into_iter().step_by(channels).collect();
    Ok(Waveform::new(samples, spec.sample_rate))
}

#[async_trait]
impl SynthesisEngine for RemoteEngine {
    fn name(&self) -> &str {
        "remote"
    }

    async fn load(&self, options: &LoadOptions) -> EngineResult<()> {
        info!(
            url = %self.endpoint("preload"),
            weights_only = options.weights_only,
            "Requesting model preload"
        );
        let response = self
            .post("preload")
            .json(&json!({ "weights_only": options.weights_only }))
            .send()
            .await?;
        check_status(response).await.map_err(|e| match e {
            EngineError::Status { status, body } => {
                EngineError::Load(format!("worker answered HTTP {status}: {body}"))
            }
            other => other,
        })?;
        Ok(())
    }

    async fn generate(&self, text: &str, voice_preset: &str) -> EngineResult<Waveform> {
        debug!(chars = text.chars().count(), voice_preset, "Sending generation request");
        let response = self
            .post("generate")
            .json(&json!({ "text": text, "history_prompt": voice_preset }))
            .send()
            .await?;
        let body = check_status(response).await?.bytes().await?;
        let waveform = decode_wav(&body)?;

        if waveform.sample_rate != self.sample_rate {
            warn!(
                expected = self.sample_rate,
                actual = waveform.sample_rate,
                "Engine returned audio at an unexpected sample rate"
            );
        }
        Ok(waveform)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
