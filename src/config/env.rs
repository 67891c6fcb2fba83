use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::ServerConfig;

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(super) fn parse_var<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} ('{raw}'): {e}").into()),
        None => Ok(None),
    }
}

pub(super) fn parse_bool(key: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match var(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(format!("Invalid boolean for {key}: '{raw}'").into()),
        },
        None => Ok(None),
    }
}

/// Build a config from environment variables, falling back to defaults.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::default();

    if let Some(host) = var("HOST") {
        config.host = host;
    }
    if let Some(port) = parse_var::<u16>("PORT")? {
        config.port = port;
    }

    if let Some(url) = var("ENGINE_URL") {
        config.engine_url = url;
    }
    config.engine_api_key = var("ENGINE_API_KEY");
    if let Some(rate) = parse_var::<u32>("ENGINE_SAMPLE_RATE")? {
        config.engine_sample_rate = rate;
    }
    if let Some(weights_only) = parse_bool("ENGINE_WEIGHTS_ONLY")? {
        config.engine_weights_only = weights_only;
    }
    config.engine_timeout_seconds = parse_var::<u64>("ENGINE_TIMEOUT_SECONDS")?;

    if let Some(dir) = var("OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(max) = parse_var::<usize>("MAX_TEXT_CHARS")? {
        config.max_text_chars = max;
    }
    if let Some(preset) = var("DEFAULT_VOICE_PRESET") {
        config.default_voice_preset = preset;
    }

    Ok(config)
}
