//! Statistics service entry point.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use simulacro_stats::api::{create_router, AppState};
use simulacro_stats::config::Config;
use simulacro_stats::db;
use simulacro_stats::metrics;
use simulacro_stats::reports::{CAMPAIGN_WINDOW, CURRENT_PERIOD_ID};
use simulacro_stats::utils::shutdown_signal;

/// Read-only statistics API for mock-exam enrollment and payments.
#[derive(Parser, Debug)]
#[command(name = "simulacro-stats")]
#[command(about = "Read-only statistics API for mock-exam enrollment and payments")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Check database connectivity.
    CheckDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("simulacro_stats=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckDb) => cmd_check_db().await,
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SIMULACRO STATS - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}@{}:{}/{}",
        config.db_user, config.db_host, config.db_port, config.db_name);
    println!("  Pool Size: {}", config.db_pool_size);
    println!("  Acquire Timeout: {}s", config.db_acquire_timeout_seconds);
    println!("  Query Timeout: {}s", config.db_query_timeout_seconds);
    println!("  Listen Port: {}", config.port);
    println!("  Static Dir: {}", config.static_dir);
    println!("  Payment Window: {} to {} ({} < amount <= {})",
        CAMPAIGN_WINDOW.start,
        CAMPAIGN_WINDOW.end,
        CAMPAIGN_WINDOW.min_exclusive,
        CAMPAIGN_WINDOW.max_inclusive);
    println!("  Period: {}", CURRENT_PERIOD_ID);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check database connectivity.
async fn cmd_check_db() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SIMULACRO STATS - DATABASE CHECK");
    println!("======================================================================");

    // Load configuration
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Host: {}:{}", config.db_host, config.db_port);
    println!("Database: {}", config.db_name);
    println!("User: {}", config.db_user);
    println!("======================================================================");

    // Acquire a connection and run SELECT 1
    print!("\nConnecting... ");
    let pool = db::create_pool(&config);
    match db::ping(&pool).await {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Database unreachable"));
        }
    }
    pool.close().await;

    println!("\n======================================================================");
    println!("DATABASE CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!(
        "Database: {}@{}:{}/{}",
        config.db_user, config.db_host, config.db_port, config.db_name
    );
    info!("Pool size: {}", config.db_pool_size);
    info!("Static files served from: {}", config.static_dir);

    // Pool is built lazily: the first request opens the first connection,
    // so startup succeeds even with the database down.
    let pool = db::create_pool(&config);
    let state = AppState::new(
        pool.clone(),
        Duration::from_secs(config.db_query_timeout_seconds),
    );

    let router = create_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing connection pool");
    pool.close().await;

    Ok(())
}
