//! Room escape reservation service.
//!
//! ```sh
//! # Run with default config (~/.config/roomescape/config.toml)
//! roomescape-service
//!
//! # Custom config path and port
//! roomescape-service --config /etc/roomescape/config.toml --port 8081
//!
//! # Throwaway in-memory storage
//! roomescape-service --in-memory
//!
//! # Validate config without starting
//! roomescape-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use roomescape::config::{default_config_path, AppConfig};
use roomescape::server::{init_tracing, ServerHandle, ServerOptions};
use roomescape::shared::shutdown_signal;

/// Escape room reservation REST API.
#[derive(Parser, Debug)]
#[command(
    name = "roomescape-service",
    version,
    about = "Escape room reservation service",
    long_about = "REST API for booking escape room themes at fixed time slots.\n\n\
                  Default config: ~/.config/roomescape/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ROOMESCAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep data in memory instead of the configured database.
    #[arg(long)]
    in_memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.in_memory,
    })
    .await?;

    info!("🚀 Press Ctrl+C to shutdown gracefully.");
    shutdown_signal().await;
    handle.shutdown().await;

    Ok(())
}
