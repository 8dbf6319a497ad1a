use clap::Parser;
use studio_gateway::config::{API_KEY_ENV, DEFAULT_MODEL, DEFAULT_UPSTREAM_URL, GatewayConfig};
use studio_gateway::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "studio-gateway")]
#[command(about = "Studio Gateway - AI content generation proxy for brand-aware SEO workflows")]
struct CliArgs {
    /// Host address to bind the gateway server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the gateway server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Base URL of the upstream OpenAI-compatible gateway
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// Model identifier requested from the upstream gateway
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Timeout in seconds for upstream completion requests
    #[arg(long, default_value_t = 600)]
    request_timeout_secs: u64,

    /// Maximum inbound JSON payload size in bytes
    #[arg(long, default_value_t = 2 * 1024 * 1024)]
    max_payload_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_args = CliArgs::parse();

    let config = GatewayConfig {
        host: cli_args.host,
        port: cli_args.port,
        upstream_url: cli_args.upstream_url,
        api_key: GatewayConfig::api_key_from_env(),
        model: cli_args.model,
        request_timeout_secs: cli_args.request_timeout_secs,
        max_payload_size: cli_args.max_payload_size,
    };
    config.validate()?;

    if config.api_key.is_none() {
        eprintln!(
            "Warning: {} is not set, generation requests will fail",
            API_KEY_ENV
        );
    }

    let app_state = AppState::new(config.clone())?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move { server::startup(config, app_state).await })?;

    Ok(())
}
