//! Routing tables for both front ends
//!
//! The HTTP proxy routes on (method, path) against a fixed table of
//! Advanced Trade paths; the stdio loop routes on RPC method names.

use serde_json::Value;
use std::fmt;

use crate::error::ProxyError;

pub const ACCOUNTS_PATH: &str = "/api/v3/brokerage/accounts";
pub const ORDERS_PATH: &str = "/api/v3/brokerage/orders";
const PRODUCTS_PREFIX: &str = "/api/v3/brokerage/products/";
const TICKER_SUFFIX: &str = "/ticker";

/// Abstract operation against the exchange client
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListAccounts,
    GetProductTicker { product_id: String },
    CreateOrder { payload: Value },
    ListOrders,
}

impl Operation {
    /// Match an HTTP (method, path) pair against the routing table.
    ///
    /// `path` should already be normalized (see [`normalize_path`]); the
    /// method is compared case-insensitively. `payload` is only consumed by
    /// order creation, where a missing payload becomes an empty object.
    pub fn route(method: &str, path: &str, payload: Option<Value>) -> Result<Self, ProxyError> {
        match (method.to_uppercase().as_str(), path) {
            ("GET", ACCOUNTS_PATH) => Ok(Operation::ListAccounts),
            ("POST", ORDERS_PATH) => Ok(Operation::CreateOrder {
                payload: payload.unwrap_or_else(|| Value::Object(Default::default())),
            }),
            ("GET", ORDERS_PATH) => Ok(Operation::ListOrders),
            ("GET", p) if p.starts_with(PRODUCTS_PREFIX) && p.ends_with(TICKER_SUFFIX) => {
                Operation::product_ticker(ticker_product_id(p))
            }
            // Reported with the method as the caller sent it
            _ => Err(ProxyError::NotImplemented {
                method: method.to_string(),
                path: path.to_string(),
            }),
        }
    }

    /// Ticker lookup for one product.
    ///
    /// The id becomes a URL path segment upstream, so it is limited to the
    /// characters product ids use and may not be a dot segment.
    pub fn product_ticker(product_id: &str) -> Result<Self, ProxyError> {
        if product_id.is_empty() {
            return Err(ProxyError::missing_field("product_id"));
        }
        let valid_chars = product_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid_chars || product_id.chars().all(|c| c == '.') {
            return Err(ProxyError::validation(format!(
                "invalid product_id: {:?}",
                product_id
            )));
        }
        Ok(Operation::GetProductTicker {
            product_id: product_id.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListAccounts => "list_accounts",
            Operation::GetProductTicker { .. } => "get_product_ticker",
            Operation::CreateOrder { .. } => "create_order",
            Operation::ListOrders => "list_orders",
        }
    }
}

/// The path segment immediately preceding the trailing `ticker`
fn ticker_product_id(path: &str) -> &str {
    path.strip_suffix(TICKER_SUFFIX)
        .unwrap_or(path)
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Prepend a leading `/` when the caller omitted it
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Named operations exposed over the stdio RPC loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    GetAccounts,
    GetProductTicker,
    PlaceOrder,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::GetAccounts => "coinbase_get_accounts",
            RpcMethod::GetProductTicker => "coinbase_get_product_ticker",
            RpcMethod::PlaceOrder => "coinbase_place_order",
        }
    }

    /// Prefix applied to failure messages of this method
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            RpcMethod::GetAccounts => "Failed to get accounts",
            RpcMethod::GetProductTicker => "Failed to get product ticker",
            RpcMethod::PlaceOrder => "Failed to place order",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RpcMethod {
    type Error = ProxyError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "coinbase_get_accounts" => Ok(RpcMethod::GetAccounts),
            "coinbase_get_product_ticker" => Ok(RpcMethod::GetProductTicker),
            "coinbase_place_order" => Ok(RpcMethod::PlaceOrder),
            other => Err(ProxyError::UnknownMethod(other.to_string())),
        }
    }
}
