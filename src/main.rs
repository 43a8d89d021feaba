//! Demo items API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use demo_api::api::{create_router, AppState};
use demo_api::config::Config;
use demo_api::metrics;
use demo_api::Result;
use demo_api::utils::shutdown_signal;

/// In-memory items CRUD service.
#[derive(Parser, Debug)]
#[command(name = "demo-api")]
#[command(about = "Create, list and fetch items held in process memory")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Bind address (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Bind port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Do not install the Prometheus exporter or serve /metrics.
    #[arg(long, global = true)]
    no_metrics: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

impl Args {
    /// Apply CLI overrides on top of the environment configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.verbose |= self.verbose;
        config.log_json |= self.log_json;
        if self.no_metrics {
            config.metrics_enabled = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    args.apply(&mut config);

    // Initialize logging
    init_logging(&config);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => Ok(cmd_serve(config).await?),
    }
}

fn init_logging(config: &Config) {
    let filter = if config.verbose {
        EnvFilter::new("demo_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEMO API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("  Verbose: {}", config.verbose);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e);
    }

    // Create app state; the store starts empty
    let mut app_state = AppState::new();
    if config.metrics_enabled {
        let handle = metrics::install_exporter()?;
        app_state = app_state.with_metrics(handle);
        info!("Prometheus metrics available at /metrics");
    }

    let router = create_router(app_state);

    // Start HTTP server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    info!("API docs at /docs");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
