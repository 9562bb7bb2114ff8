// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Swarm Interface CLI
//!
//! The `swarm` binary both serves the backend-for-frontend and acts as a
//! client of it.
//!
//! ## Commands
//!
//! - `swarm serve` - Run the backend-for-frontend
//! - `swarm create|delete|start|show|list` - Swarm operations against a running server
//! - `swarm config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use swarm_core::domain::interface_config::InterfaceConfigManifest;
use swarm_interface::commands::{self, ConfigCommand, SwarmCommand};
use swarm_interface::server;

/// Swarm Interface - create, start and manage swarms
#[derive(Parser)]
#[command(name = "swarm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "SWARM_INTERFACE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Base URL of the swarm interface server (overrides client.base_url)
    #[arg(long, global = true, env = "SWARM_INTERFACE_URL", value_name = "URL")]
    url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SWARM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, env = "SWARM_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the backend-for-frontend server
    #[command(name = "serve")]
    Serve {
        /// Listen host (overrides server.bind_address)
        #[arg(long, env = "SWARM_HOST")]
        host: Option<String>,

        /// Listen port (overrides server.port)
        #[arg(long, env = "SWARM_PORT")]
        port: Option<u16>,
    },

    #[command(flatten)]
    Swarm(SwarmCommand),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format)?;

    match cli.command {
        Commands::Serve { host, port } => {
            info!("Starting swarm interface server");
            let config = InterfaceConfigManifest::load_or_default(cli.config)
                .context("Failed to load configuration")?;
            server::start_server(config, host, port).await
        }
        Commands::Swarm(command) => {
            commands::swarm::handle_command(command, cli.config, cli.url).await
        }
        Commands::Config { command } => {
            commands::config::handle_command(command, cli.config).await
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(())
}
