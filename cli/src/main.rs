//! User directory: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/user-directory/config.toml)
//! user-directory
//!
//! # Custom config path
//! user-directory --config /etc/user-directory/config.toml
//!
//! # Override port and role service
//! user-directory --port 8080 --role-service-url http://roles:5000
//!
//! # Validate config without starting
//! user-directory --check
//! ```
//!
//! A `.env` file in the working directory is loaded before anything else;
//! variables already set in the environment take precedence over it.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use user_directory::config::AppConfig;
use user_directory::server::{init_tracing, ServerHandle, ServerOptions};

/// User directory: users enriched with roles from the role service.
#[derive(Parser, Debug)]
#[command(
    name = "user-directory",
    version,
    about = "HTTP service for user records enriched with role data",
    long_about = "User directory: REST API over a relational user store. \
                  User listings are enriched with data from an external role service.\n\n\
                  Default config: ~/.config/user-directory/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "USER_DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the role service base URL.
    #[arg(long)]
    role_service_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load `.env` before clap reads `env` attributes
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(user_directory::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            if cli.check {
                eprintln!("❌ Invalid configuration: {}", e);
                std::process::exit(1);
            }
            // Fallback tracing init
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(
                    cli.log_level.as_deref().unwrap_or("info"),
                ))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    match dotenv {
        Ok(path) => info!("Environment loaded from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(url) = cli.role_service_url {
        info!("CLI override: role_service.base_url = {}", url);
        config.role_service.base_url = url;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file  : {}", config_path.display());
        println!("   API address  : {}", config.server.address());
        println!("   Database     : {}", config.database.url);
        println!("   Role service : {}", config.role_service.base_url);
        println!("   Log level    : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
