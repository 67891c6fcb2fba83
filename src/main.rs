use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use speak_gateway::{
    RemoteEngine, ServerConfig, SynthesisEngine, routes, state::AppState, synth,
};

/// Speak Gateway - HTTP text-to-speech service
#[derive(Parser, Debug)]
#[command(name = "speak-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize a single text to a WAV file and exit
    Synth {
        /// Text to speak
        text: String,

        /// Voice code (e.g. en-female); unknown codes use the default preset
        #[arg(short = 'v', long = "voice")]
        voice: Option<String>,

        /// Output WAV path
        #[arg(short = 'o', long = "output", default_value = "speech.wav")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    let engine: Arc<dyn SynthesisEngine> = Arc::new(
        RemoteEngine::new(config.remote_engine_config())
            .map_err(|e| anyhow!("Failed to create synthesis engine: {e}"))?,
    );

    // Handle subcommands
    if let Some(Commands::Synth {
        text,
        voice,
        output,
    }) = cli.command
    {
        let path = synth::run(
            &config,
            engine.as_ref(),
            synth::SynthOptions {
                text,
                voice,
                output,
            },
        )
        .await?;
        println!("Audio written to {}", path.display());
        return Ok(());
    }

    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    // Load the engine once; the listener starts whatever the outcome
    let app_state = AppState::new(config, engine).await;
    if !app_state.readiness.is_ready() {
        tracing::warn!("Serving without a loaded model; /speak will answer 503 until restart");
    }

    let app = routes::create_app(app_state);

    info!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
