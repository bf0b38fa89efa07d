//! DevOps info service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use devops_info_service::api::{serve, AppState};
use devops_info_service::config::Config;
use devops_info_service::info::StartTime;
use devops_info_service::utils::{init_logging, shutdown_signal};

/// HTTP service reporting host, runtime and health information.
///
/// All settings come from the environment: HOST, PORT, DEBUG, RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "devops-info-service")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Print the resolved configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start = StartTime::now();
    let args = Args::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            init_logging("info");
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&config.log_filter());

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config, start).await,
    }
}

/// Print the resolved configuration.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEVOPS INFO SERVICE - CONFIGURATION");
    println!("======================================================================");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Debug: {}", config.debug);
    println!("  Log Filter: {}", config.log_filter());
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config, start: StartTime) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    info!("Starting DevOps Info Service on {}", addr);
    info!("Debug mode: {}", config.debug);
    info!("Process started at {}", start.started_at());

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    serve(listener, AppState::with_start(start), shutdown_signal()).await?;

    info!("Server stopped after {}", start.uptime());
    Ok(())
}
