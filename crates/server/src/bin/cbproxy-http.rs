use anyhow::Context;
use cbproxy_coinbase::CoinbaseClientFactory;
use cbproxy_core::Translator;
use cbproxy_server::{AppState, ProxyConfig, create_router, load_dotenv, logging};
use std::sync::Arc;
use tokio::net::TcpListener;

fn print_help() {
    eprintln!(
        r#"Coinbase Advanced Trade proxy - HTTP front end

USAGE:
    cbproxy-http [OPTIONS]

OPTIONS:
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                    Server host (default: 0.0.0.0)
    PORT                    Server port (default: 8787)
    DEBUG_COINBASE          Per-request logging, 1 or true (default: on)
    COINBASE_KEY_NAME       Default API key name
    COINBASE_KEY_ID         Default API key id (JWT subject when set)
    COINBASE_PRIVATE_KEY    Default PEM private key
    COINBASE_API_URL        Upstream base URL (default: https://api.coinbase.com)
    UPSTREAM_TIMEOUT_SECS   Upstream call timeout (default: 30)
    RUST_LOG                Log level filter

    Variables may also be placed in .env.local or .env.

EXAMPLES:
    # Run with defaults
    cbproxy-http

    # Run with custom port
    PORT=9000 cbproxy-http
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    let env_files = load_dotenv();
    let config = ProxyConfig::from_env().context("invalid configuration")?;
    logging::init_tracing(config.debug);

    for file in env_files {
        tracing::info!("Loaded environment from {}", file);
    }
    if !config.has_default_credentials() {
        tracing::warn!("No default Coinbase credentials; requests must carry keyName and privateKey");
    }

    let factory = CoinbaseClientFactory::new(config.api_url.clone());
    let translator = Translator::new(factory, config.credentials.clone())
        .with_timeout(config.upstream_timeout)
        .with_debug(config.debug);
    let app = create_router(Arc::new(AppState::new(translator)));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Starting Coinbase Advanced Trade proxy on port {}", config.port);
    tracing::info!("Debug mode: {}", config.debug);
    tracing::info!("Upstream: {}", config.api_url);
    tracing::info!("Available endpoints:");
    tracing::info!("  POST /proxy");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /");

    axum::serve(listener, app).await?;
    Ok(())
}
