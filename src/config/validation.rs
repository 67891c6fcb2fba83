use super::ServerConfig;

/// Reject configurations the service cannot run with.
pub(super) fn validate_server_config(
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.host.trim().is_empty() {
        return Err("host must not be empty".into());
    }

    config
        .remote_engine_config()
        .validate()
        .map_err(|e| e.to_string())?;

    if config.engine_timeout_seconds == Some(0) {
        return Err("engine timeout_seconds must be greater than zero when set".into());
    }
    if config.max_text_chars == 0 {
        return Err("max_text_chars must be greater than zero".into());
    }
    if config.default_voice_preset.trim().is_empty() {
        return Err("default voice preset must not be empty".into());
    }

    Ok(())
}
