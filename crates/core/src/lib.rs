//! cbproxy core
//!
//! Translation layer between the proxy front ends and an authenticated
//! exchange client. Provides:
//! - Credential resolution (per-request fields over configured defaults)
//! - Routing tables for the HTTP proxy and the stdio RPC loop
//! - Order construction (market / limit configurations)
//! - Typed result schemas and the normalized `{result|error, id?}` shape
//! - The `ExchangeClient` / `ClientFactory` ports implemented by exchange crates
//!
//! ## Flow
//!
//! ```text
//!  HTTP /proxy          stdio line
//!       │                   │
//!       ▼                   ▼
//!  Translator::proxy   RpcSession::handle
//!       │                   │ (cached ClientSlot)
//!       └───────┬───────────┘
//!               ▼
//!        Translator::execute ──▶ ExchangeClient ──▶ exchange
//!               │
//!               ▼
//!        JSON result / ProxyError
//! ```

pub mod credentials;
pub mod error;
pub mod normalize;
pub mod order;
pub mod ports;
pub mod routing;
pub mod rpc;
pub mod schema;
pub mod slot;
pub mod translator;

pub use credentials::{CredentialOverrides, Credentials};
pub use error::{ClientInitError, ProxyError, ProxyResult, UpstreamError, status_from_message};
pub use normalize::NormalizedResult;
pub use order::{OrderConfiguration, OrderRequest, OrderType, Side, build_order};
pub use ports::{ClientFactory, ExchangeClient};
pub use routing::{Operation, RpcMethod, normalize_path};
pub use rpc::{RpcRequest, RpcSession};
pub use schema::{AccountsPage, CreateOrderResponse, OrdersPage, Product};
pub use slot::ClientSlot;
pub use translator::{DEFAULT_UPSTREAM_TIMEOUT, PreparedRequest, ProxyRequest, Translator};
