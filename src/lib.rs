//! SEO publisher tool server.
//!
//! Serves a fixed set of tools over line-delimited JSON-RPC on stdin/stdout:
//! mock SEO generators (keyword analysis, content writing, meta tags) and a
//! WordPress REST publisher.
//!
//! # Architecture
//!
//! - `mcp`: wire types, the request dispatcher and the stdio transport loop
//! - `tools`: tool registry and implementations
//! - `wordpress`: the WordPress REST collaborator
//! - `config`: environment-driven process configuration
//! - `core`: shared types

pub mod config;
pub mod core;
pub mod mcp;
pub mod tools;
pub mod wordpress;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use config::{AppConfig, ConfigError};
use mcp::transport::{run_stdio, TransportError};
use mcp::McpServer;
use tools::{ToolContext, ToolRegistry};
use wordpress::{WordPressClient, WordPressError};

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    WordPress(#[from] WordPressError),
    #[error("{0}")]
    Transport(#[from] TransportError),
}

// ---------------------------------------------------------------------------
// Application entry point
// ---------------------------------------------------------------------------

const DEFAULT_LOG_FILTER: &str = "seo_publisher=info,seo_publisher_lib=info";

/// Diagnostics go to stderr; stdout carries only protocol responses.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the server from `config`.
pub fn build_server(config: AppConfig) -> Result<McpServer, AppError> {
    let client = WordPressClient::new(config.wordpress)?;
    let context = ToolContext::new(Arc::new(client), config.seed, config.canonical_base_url);
    Ok(McpServer::new(ToolRegistry::with_defaults(), context))
}

/// Load configuration, then serve stdin until it closes.
pub async fn run() -> Result<(), AppError> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env()?;
    let server = build_server(config)?;
    tracing::info!("SEO Publisher Agent started");

    let served = run_stdio(&server).await?;
    tracing::info!("input closed, {served} responses written");
    Ok(())
}
