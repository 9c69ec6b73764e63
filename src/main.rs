//! Grammar Key Generation Service CLI
//!
//! Starts the HTTP API server for grammar-based key generation,
//! entropy scoring, and AES text encryption.

use clap::Parser;
use grammar_keygen::api::{ApiServer, FileConfig, ServerConfig};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "grammar-keygen", version, about = "Grammar-based key generation service")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from configuration.
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Override the port from configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Grammar Keygen v{}", grammar_keygen::VERSION);

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(file) => file.server,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };

    if let Some(ip) = cli.bind {
        config.bind_addr.set_ip(ip);
    }
    if let Some(port) = cli.port {
        config.bind_addr.set_port(port);
    }

    let server = match ApiServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
