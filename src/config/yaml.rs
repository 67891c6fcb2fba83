use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// This structure represents the full configuration that can be loaded from a YAML file.
/// All fields are optional to allow partial configuration. Values set here override
/// environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///
/// engine:
///   url: "http://127.0.0.1:9000"
///   api_key: "worker-token"
///   sample_rate: 24000
///   weights_only: false
///   timeout_seconds: 300
///
/// speech:
///   output_dir: "audios"
///   max_text_chars: 500
///   default_voice: "v2/en_speaker_2"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub engine: Option<EngineYaml>,
    pub speech: Option<SpeechYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Synthesis engine configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EngineYaml {
    /// Base URL of the inference worker
    pub url: Option<String>,
    /// Bearer token for the inference worker
    pub api_key: Option<String>,
    /// Output sample rate of the model (Hz)
    pub sample_rate: Option<u32>,
    /// Forwarded to the one-time model load
    pub weights_only: Option<bool>,
    /// Per-request timeout for engine calls
    pub timeout_seconds: Option<u64>,
}

/// Speech output configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SpeechYaml {
    pub output_dir: Option<String>,
    pub max_text_chars: Option<usize>,
    /// Engine preset for missing or unknown voice codes
    pub default_voice: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
