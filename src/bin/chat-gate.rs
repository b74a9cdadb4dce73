//! chat-gate binary
//!
//! Serves the multi-provider chat gateway over HTTP

use anyhow::Result;
use chat_gate::gate::{start_server, GatewayConfig};
use chat_gate::{ProviderRegistry, ProviderType};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// chat-gate: relay chat messages to OpenAI, Gemini or Anthropic
#[derive(Parser, Debug)]
#[command(name = "chat-gate")]
#[command(about = "Multi-provider chat gateway", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Vendor client timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config_file = GatewayConfig::locate(args.config.as_deref());
    let mut gateway_config = match config_file {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            GatewayConfig::from_file(path)?
        }
        None => GatewayConfig::default(),
    };
    gateway_config.apply_env(|name| std::env::var(name).ok())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        gateway_config.host = host;
    }
    if let Some(port) = args.port {
        gateway_config.port = port;
    }
    if let Some(timeout) = args.timeout {
        gateway_config.vendor_timeout_secs = timeout;
    }

    gateway_config.validate()?;
    let registry = ProviderRegistry::from_env(gateway_config.vendor_timeout_secs)?;

    if args.validate {
        validate_config(&gateway_config, &registry);
        return Ok(());
    }

    start_server(gateway_config, registry).await
}

/// Print the resolved configuration
fn validate_config(config: &GatewayConfig, registry: &ProviderRegistry) {
    println!("Configuration validation:");
    println!("  Listen: {}", config.bind_addr());
    println!("  Vendor timeout: {}s", config.vendor_timeout_secs);

    for provider in ProviderType::ALL {
        if registry.has(provider.config_key()) {
            println!("  {}: configured", provider);
        } else {
            println!("  {}: {} not set", provider, provider.api_key_var());
        }
    }

    if registry.is_empty() {
        println!("\nWarning: no providers configured");
    }

    println!("\n✓ Configuration is valid");
}
