//! Configuration module for the speak gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use speak_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

use crate::core::audio::DEFAULT_OUTPUT_DIR;
use crate::core::engine::{DEFAULT_SAMPLE_RATE, LoadOptions, RemoteEngineConfig};
use crate::core::validation::DEFAULT_MAX_TEXT_CHARS;
use crate::core::voice::DEFAULT_VOICE_PRESET;

/// Server configuration
///
/// Contains everything needed to run the gateway:
/// - Server settings (host, port)
/// - Synthesis engine connection and load options
/// - Speech settings (output directory, text limit, default voice)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Synthesis engine
    /// Base URL of the inference worker
    pub engine_url: String,
    /// Bearer token for the inference worker
    pub engine_api_key: Option<String>,
    /// Sample rate the engine produces (Hz)
    pub engine_sample_rate: u32,
    /// Passed through to the engine's one-time model load
    pub engine_weights_only: bool,
    /// Per-request timeout for engine calls. None means unbounded.
    pub engine_timeout_seconds: Option<u64>,

    // Speech settings
    /// Directory receiving one WAV file per successful request
    pub output_dir: PathBuf,
    /// Maximum accepted text length in characters
    pub max_text_chars: usize,
    /// Engine preset used for missing or unknown voice codes
    pub default_voice_preset: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            engine_url: "http://127.0.0.1:9000".to_string(),
            engine_api_key: None,
            engine_sample_rate: DEFAULT_SAMPLE_RATE,
            engine_weights_only: false,
            engine_timeout_seconds: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            default_voice_preset: DEFAULT_VOICE_PRESET.to_string(),
        }
    }
}

/// Zeroize the engine credential when the config is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.engine_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults. The result is validated before
    /// it is returned.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or validation fails.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = env::load_from_env()?;
        validation::validate_server_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // .env is loaded in main.rs at startup, so by now it is part of the environment
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        let config = merge::merge_config(Some(yaml_config))?;

        validation::validate_server_config(&config)?;

        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Options for the engine's one-time load
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            weights_only: self.engine_weights_only,
        }
    }

    /// Connection settings for the HTTP-backed engine
    pub fn remote_engine_config(&self) -> RemoteEngineConfig {
        RemoteEngineConfig {
            base_url: self.engine_url.clone(),
            api_key: self.engine_api_key.clone(),
            sample_rate: self.engine_sample_rate,
            timeout: self.engine_timeout_seconds.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    // Helper to clean up environment variables
    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("ENGINE_URL");
            env::remove_var("ENGINE_API_KEY");
            env::remove_var("ENGINE_SAMPLE_RATE");
            env::remove_var("ENGINE_WEIGHTS_ONLY");
            env::remove_var("ENGINE_TIMEOUT_SECONDS");
            env::remove_var("OUTPUT_DIR");
            env::remove_var("MAX_TEXT_CHARS");
            env::remove_var("DEFAULT_VOICE_PRESET");
        }
    }

    #[test]
    fn test_address() {
        let mut config = ServerConfig::default();
        config.host = "127.0.0.1".to_string();
        config.port = 8080;
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_load_options_follow_config() {
        let mut config = ServerConfig::default();
        assert!(!config.load_options().weights_only);

        config.engine_weights_only = true;
        assert!(config.load_options().weights_only);
    }

    #[test]
    fn test_remote_engine_config() {
        let mut config = ServerConfig::default();
        config.engine_url = "http://bark-worker:9000".to_string();
        config.engine_api_key = Some("secret".to_string());
        config.engine_timeout_seconds = Some(120);

        let remote = config.remote_engine_config();
        assert_eq!(remote.base_url, "http://bark-worker:9000");
        assert_eq!(remote.api_key.as_deref(), Some("secret"));
        assert_eq!(remote.sample_rate, 24_000);
        assert_eq!(remote.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_text_chars, 500);
        assert_eq!(config.output_dir, PathBuf::from("audios"));
        assert_eq!(config.default_voice_preset, "v2/en_speaker_2");
        assert!(config.engine_timeout_seconds.is_none());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_values() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PORT", "9100");
            env::set_var("MAX_TEXT_CHARS", "5000");
            env::set_var("ENGINE_WEIGHTS_ONLY", "true");
            env::set_var("OUTPUT_DIR", "/tmp/speech");
        }

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.max_text_chars, 5000);
        assert!(config.engine_weights_only);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/speech"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_text_limit() {
        cleanup_env_vars();
        unsafe {
            env::set_var("MAX_TEXT_CHARS", "0");
        }

        let result = ServerConfig::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_text_chars"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_port() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PORT", "not-a-port");
        }

        let result = ServerConfig::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_only() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml_content = r#"
server:
  host: "127.0.0.1"
  port: 8080

engine:
  url: "http://bark-worker:9000"
  weights_only: true
  timeout_seconds: 300

speech:
  output_dir: "/var/lib/speak/audios"
  max_text_chars: 1000
  default_voice: "v2/en_speaker_9"
"#;

        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.engine_url, "http://bark-worker:9000");
        assert!(config.engine_weights_only);
        assert_eq!(config.engine_timeout_seconds, Some(300));
        assert_eq!(config.output_dir, PathBuf::from("/var/lib/speak/audios"));
        assert_eq!(config.max_text_chars, 1000);
        assert_eq!(config.default_voice_preset, "v2/en_speaker_9");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml_content = r#"
server:
  host: "127.0.0.1"

speech:
  max_text_chars: 250
"#;

        fs::write(&config_path, yaml_content).unwrap();

        unsafe {
            env::set_var("HOST", "0.0.0.0");
            env::set_var("PORT", "9001");
            env::set_var("MAX_TEXT_CHARS", "700");
        }

        let config = ServerConfig::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_text_chars, 250);
        // ENV value kept where YAML is silent
        assert_eq!(config.port, 9001);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let config_path = PathBuf::from("/nonexistent/config.yaml");
        let result = ServerConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_invalid_engine_url() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "engine:\n  url: \"unix:///tmp/bark.sock\"\n").unwrap();

        let result = ServerConfig::from_file(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Engine URL must use http or https")
        );

        cleanup_env_vars();
    }
}
