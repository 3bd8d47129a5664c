use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use colored::*;
use config_engine::{ConfigEngine, ConfigValidator};
use error_common::{log_error, ClinicError, Result};
use logger_redacted::init_logging;
use revenue_engine::SystemClock;
use tracing::info;

use dashboard_server::{create_app, DashboardServer};

/// Clinic dashboard HTTP server
#[derive(Parser, Debug)]
#[command(name = "dashboard-server")]
#[command(about = "Revenue and financial aggregation API for the clinic admin dashboard")]
struct Args {
    /// Server bind address (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "dashboard.yaml")]
    config: PathBuf,

    /// JSON seed file with billing records and expenses (overrides configuration)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigEngine::new()
        .with_file(&args.config)
        .load()
        .map_err(|e| ClinicError::ConfigError(e.to_string()))?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.data.seed_file = Some(seed);
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    config
        .validate()
        .map_err(|e| ClinicError::ConfigError(e.to_string()))?;

    init_logging(&config.logging).map_err(|e| ClinicError::InternalError(e.to_string()))?;

    info!("🏥 {}", "Starting clinic dashboard server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let server = DashboardServer::from_config(&config, Arc::new(SystemClock))
        .await
        .inspect_err(|e| log_error("startup", e))?;
    let app = create_app(server);

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(bind.as_str())
        .await
        .map_err(|e| ClinicError::NetworkError(format!("Failed to bind to {}: {}", bind, e)))?;
    let addr: SocketAddr = listener
        .local_addr()
        .map_err(|e| ClinicError::NetworkError(e.to_string()))?;

    info!("🚀 {}", format!("Dashboard server running on http://{}", addr).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", addr).bright_blue());
    info!(
        "📊 {}",
        format!("Revenue endpoints: http://{}/api/v1/dashboard/revenue", addr).bright_blue()
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| ClinicError::ServerError(format!("HTTP server error: {}", e)))?;

    Ok(())
}
