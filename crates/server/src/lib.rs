//! Front ends for the Coinbase Advanced Trade proxy
//!
//! - `http`: axum router exposing `POST /proxy`, `GET /health` and `GET /`
//! - `stdio`: line-delimited JSON RPC loop
//! - `config` / `logging`: environment and tracing setup shared by both binaries

pub mod config;
pub mod http;
pub mod logging;
pub mod stdio;

pub use config::{ConfigError, ProxyConfig, load_dotenv};
pub use http::{AppState, create_router};
pub use stdio::run_rpc_loop;
