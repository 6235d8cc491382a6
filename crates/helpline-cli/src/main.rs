//! helpline CLI: Terminal client for a customer support chat service

use clap::{Parser, Subcommand};
use helpline_core::{ChatClient, Config, UNREACHABLE_REPLY};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Terminal client for a customer support chat service
#[derive(Parser)]
#[command(name = "helpline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chat service base URL (overrides config and HELPLINE_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send a single message and print the reply
    Send {
        /// The message to send
        message: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

const DEFAULT_CONFIG_PATH: &str = ".helpline/config.json";

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never tear the TUI or pollute stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());
    let endpoint = config.resolve_endpoint(cli.endpoint.as_deref());

    match cli.command {
        None | Some(Commands::Tui) => {
            // Default: open TUI
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(helpline_tui::run_tui(&config, endpoint)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { message, json }) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(cmd_send(&endpoint, &message, json));
        }
    }
}

/// Load config from the given path, or from the default location if one
/// exists there. An unreadable or malformed explicit path is fatal; the
/// default path is allowed to be absent.
fn load_config(path: Option<&Path>) -> Config {
    if let Some(path) = path {
        match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    } else {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            match Config::load(default_path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading config {}: {e}", default_path.display());
                    std::process::exit(1);
                }
            }
        } else {
            Config::default()
        }
    }
}

async fn cmd_send(endpoint: &str, message: &str, json: bool) {
    let message = message.trim();
    if message.is_empty() {
        eprintln!("Error: message is empty");
        std::process::exit(1);
    }

    let client = match ChatClient::new(endpoint) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match client.send(message).await {
        Ok(reply) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reply).expect("failed to serialize")
                );
            } else {
                println!("{}", reply.reply);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "chat exchange failed");
            eprintln!("{UNREACHABLE_REPLY}");
            std::process::exit(1);
        }
    }
}
