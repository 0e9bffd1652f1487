//! Speech service token relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                TOKEN RELAY                   │
//!   POST             │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   /api/get─────────┼─▶│   http   │──▶│  relay   │──▶│  issuer  │──┼──▶ speech service
//!   SpeechToken      │  │  server  │   │ handler  │   │ (reqwest)│  │    /sts/v1.0/issueToken
//!                    │  └──────────┘   └──────────┘   └──────────┘  │
//!   token ◀──────────┼── 200 + CORS  /  405  /  500  ◀──────────────┼───
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Runs either as a long-lived web server (`serve`, the default) or as a
//! function host custom handler (`function`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use speech_token_relay::config::RelayConfig;
use speech_token_relay::http::ServeMode;
use speech_token_relay::lifecycle::{self, Shutdown};
use speech_token_relay::observability::init_logging;

#[derive(Parser)]
#[command(name = "speech-token-relay")]
#[command(about = "Relays speech service access tokens to browser clients", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as a long-lived web server (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run as a function host custom handler on FUNCTIONS_CUSTOMHANDLER_PORT
    Function,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: RelayConfig = lifecycle::load_configuration(cli.config.as_deref())?;

    init_logging(&config.observability);
    tracing::info!("speech-token-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let mode = match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
            }
            ServeMode::WebServer
        }
        Commands::Function => ServeMode::FunctionHost,
    };

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    lifecycle::start(mode, config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
