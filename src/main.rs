//! nlb-compat host server.
//!
//! Serves an application behind a TLS-terminating load balancer with the
//! client address and scheme restored from forwarding headers.
//!
//! ```text
//!     Load balancer ──▶ listener ──▶ trace/timeout ──▶ nlb-compat ──▶ handlers
//!   (X-Forwarded-For,                                  (REMOTE_ADDR, HTTPS,
//!    X-Forwarded-Proto)                                 SERVER_PORT, ...)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use nlb_compat::config::{load_config, validation::validate_config, ConfigError, NlbConfig};
use nlb_compat::observability::{logging, metrics};
use nlb_compat::{HttpServer, NlbError};

#[derive(Parser)]
#[command(name = "nlb-compat")]
#[command(about = "Restore client address and scheme behind a load balancer", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), NlbError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NlbConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("nlb-compat v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        forwarded_for = %config.headers.forwarded_for,
        forwarded_proto = %config.headers.forwarded_proto,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(config).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
