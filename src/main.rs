//! Miro MCP server entry point.
//!
//! Loads configuration, initializes logging on stderr, builds the tool
//! catalogue and serves it over the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use miro_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    if let Err(e) = run(config).await {
        error!("Fatal: {:#}", e);
        return Err(e);
    }

    info!("Server shutting down");
    Ok(())
}

async fn run(config: Config) -> Result<()> {
    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config).context("Failed to build the tool server")?;

    transport
        .run(server)
        .await
        .context("Transport stopped with an error")
}

/// Log to stderr so stdout stays free for STDIO protocol frames.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
