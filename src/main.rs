use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealplan_core::constants::DATA_DIR_ENV;
use mealplan_core::{CoreConfig, data_dir_from_env_value};
use mealplan_tools::{ToolRegistry, build_registry};

mod http;
mod mcp;

use mcp::McpHost;

/// Main entry point for the mealplan tool host
///
/// Serves the tool registry over one transport:
/// - `stdio` (default): a Model Context Protocol server on stdin/stdout
/// - `http`: the JSON API in [`http`]
///
/// Logs always go to stderr so stdout stays clean for the protocol.
///
/// # Environment Variables
/// - `MEALPLANPATH`: Data directory (default: current directory)
/// - `MEALPLAN_TRANSPORT`: `stdio` or `http` (default: "stdio")
/// - `MEALPLAN_ADDR`: HTTP listen address (default: "127.0.0.1:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory is missing or not a directory,
/// - the transport is unknown or fails to start, or
/// - the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mealplan=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = data_dir_from_env_value(std::env::var(DATA_DIR_ENV).ok())?;
    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    let registry = Arc::new(build_registry(cfg.clone()));
    let transport = std::env::var("MEALPLAN_TRANSPORT").unwrap_or_else(|_| "stdio".into());

    match transport.as_str() {
        "stdio" => {
            tracing::info!(
                "++ Starting mealplan MCP server on stdio ({} tools, data in {})",
                registry.tool_count(),
                cfg.data_dir().display()
            );
            let service = McpHost::new(registry)
                .serve(stdio())
                .await
                .inspect_err(|e| tracing::error!("MCP server error: {}", e))?;
            service.waiting().await?;
            tracing::info!("mealplan MCP server shutting down");
        }
        "http" => {
            let addr = std::env::var("MEALPLAN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
            tracing::info!(
                "++ Starting mealplan tool host on {} ({} tools, data in {})",
                addr,
                registry.tool_count(),
                cfg.data_dir().display()
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, http::app(registry)).await?;
        }
        other => anyhow::bail!("unknown MEALPLAN_TRANSPORT '{}': expected 'stdio' or 'http'", other),
    }

    Ok(())
}
