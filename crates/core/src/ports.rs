use async_trait::async_trait;
use serde_json::Value;

use crate::credentials::Credentials;
use crate::error::{ClientInitError, UpstreamError};
use crate::schema::{AccountsPage, CreateOrderResponse, OrdersPage, Product};

/// Authenticated exchange client capability
///
/// Implementations issue signed requests to the exchange and decode the
/// replies into the typed result schemas. They report failures with the
/// domain-level `UpstreamError` so no transport types leak into the core.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// List brokerage accounts
    async fn list_accounts(&self) -> Result<AccountsPage, UpstreamError>;

    /// Fetch public product info (price, 24h stats) for a product id
    async fn get_public_product(&self, product_id: &str) -> Result<Product, UpstreamError>;

    /// Submit an order body as-is
    async fn create_order(&self, order: &Value) -> Result<CreateOrderResponse, UpstreamError>;

    /// List historical orders
    async fn list_orders(&self) -> Result<OrdersPage, UpstreamError>;
}

/// Builds exchange clients from credentials
///
/// Construction failures (bad key material) are `ClientInitError`, kept
/// separate from errors raised by calls on a built client.
pub trait ClientFactory: Send + Sync {
    type Client: ExchangeClient;

    fn connect(&self, credentials: &Credentials) -> Result<Self::Client, ClientInitError>;
}
