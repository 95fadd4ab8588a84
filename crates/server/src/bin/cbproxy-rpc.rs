use anyhow::Context;
use cbproxy_coinbase::CoinbaseClientFactory;
use cbproxy_core::{RpcSession, Translator};
use cbproxy_server::{ProxyConfig, load_dotenv, logging, run_rpc_loop};
use tokio::io::BufReader;

fn print_help() {
    eprintln!(
        r#"Coinbase Advanced Trade proxy - stdio RPC front end

Reads one JSON request per line on stdin and writes one JSON response per
line on stdout. Logs go to stderr.

USAGE:
    cbproxy-rpc [OPTIONS]

OPTIONS:
    --help              Print this help message

METHODS:
    coinbase_get_accounts
    coinbase_get_product_ticker   params: {{product_id}}
    coinbase_place_order          params: {{product_id, side, type, amount, price?}}

ENVIRONMENT VARIABLES:
    COINBASE_KEY_NAME       API key name
    COINBASE_KEY_ID         API key id (JWT subject when set)
    COINBASE_PRIVATE_KEY    PEM private key
    COINBASE_API_URL        Upstream base URL (default: https://api.coinbase.com)
    UPSTREAM_TIMEOUT_SECS   Upstream call timeout (default: 30)
    DEBUG_COINBASE          Per-request logging, 1 or true (default: on)
    RUST_LOG                Log level filter
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
    logging::init_stderr_tracing(config.debug);

    for file in env_files {
        tracing::info!("Loaded environment from {}", file);
    }

    let factory = CoinbaseClientFactory::new(config.api_url.clone());
    let translator = Translator::new(factory, config.credentials.clone())
        .with_timeout(config.upstream_timeout)
        .with_debug(config.debug);

    let mut session = RpcSession::new(translator);
    session.initialize();
    tracing::info!(client = session.client_state(), "Coinbase RPC server started");

    let stdin = BufReader::new(tokio::io::stdin());
    run_rpc_loop(&mut session, stdin, tokio::io::stdout())
        .await
        .context("RPC loop failed")?;

    tracing::info!("Coinbase RPC server stopped");
    Ok(())
}
