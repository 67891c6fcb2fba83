//! Waveform encoding and persistence.
//!
//! Every successful synthesis is written as an uncompressed WAV file with a
//! random name under the output directory. Names come from UUID v4 so
//! concurrent requests never collide and no locking is needed. Files are never
//! removed by the service.

use std::io::Cursor;
use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::engine::Waveform;

/// MIME type of the files produced here
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "audios";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),

    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding task failed: {0}")]
    Task(String),
}

/// Encode a waveform as 16-bit PCM mono WAV.
///
/// Samples are clamped to `[-1.0, 1.0]` before quantization.
pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, AudioError> {
    if waveform.sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate(waveform.sample_rate));
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + waveform.samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in &waveform.samples {
            let clamped = if sample.is_nan() {
                0.0
            } else {
                sample.clamp(-1.0, 1.0)
            };
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// A WAV file written to the output directory.
#[derive(Debug, Clone)]
pub struct StoredAudio {
    /// Bare file name, also used as the download name
    pub filename: String,
    pub path: PathBuf,
    /// Encoded file contents
    pub bytes: Bytes,
}

/// Writes encoded audio into a dedicated directory.
#[derive(Debug, Clone)]
pub struct AudioStore {
    output_dir: PathBuf,
}

impl AudioStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Fresh `audio_<uuid>.wav` name.
    pub fn generate_filename() -> String {
        format!("audio_{}.wav", Uuid::new_v4().simple())
    }

    /// Encode `waveform` and write it under a new unique name.
    ///
    /// The directory is created on demand. A failure mid-write may leave a
    /// partial file behind.
    pub async fn persist(&self, waveform: Waveform) -> Result<StoredAudio, AudioError> {
        let encoded = tokio::task::spawn_blocking(move || encode_wav(&waveform))
            .await
            .map_err(|e| AudioError::Task(e.to_string()))??;

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let filename = Self::generate_filename();
        let path = self.output_dir.join(&filename);
        tokio::fs::write(&path, &encoded).await?;

        debug!(path = %path.display(), size = encoded.len(), "Audio file written");

        Ok(StoredAudio {
            filename,
            path,
            bytes: Bytes::from(encoded),
        })
    }
}
