use std::path::PathBuf;

use super::ServerConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;

/// Start from the environment and apply any values present in the YAML file.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(engine) = yaml.engine {
        if let Some(url) = engine.url {
            config.engine_url = url;
        }
        if engine.api_key.is_some() {
            config.engine_api_key = engine.api_key;
        }
        if let Some(rate) = engine.sample_rate {
            config.engine_sample_rate = rate;
        }
        if let Some(weights_only) = engine.weights_only {
            config.engine_weights_only = weights_only;
        }
        if engine.timeout_seconds.is_some() {
            config.engine_timeout_seconds = engine.timeout_seconds;
        }
    }

    if let Some(speech) = yaml.speech {
        if let Some(dir) = speech.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(max) = speech.max_text_chars {
            config.max_text_chars = max;
        }
        if let Some(preset) = speech.default_voice {
            config.default_voice_preset = preset;
        }
    }

    Ok(config)
}
