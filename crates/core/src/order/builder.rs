//! Order construction from RPC parameters
//!
//! Turns `{product_id, side, type, amount, price?}` into an Advanced Trade
//! order body. Sizes and prices are forwarded as the JSON values the caller
//! supplied; the exchange does its own decimal validation.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{OrderType, Side};
use crate::error::ProxyError;

const REQUIRED_FIELDS: [&str; 4] = ["product_id", "side", "type", "amount"];

/// Order configuration variants accepted by the exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderConfiguration {
    MarketMarketIoc { quote_size: Value },
    LimitLimitGtc { base_size: Value, limit_price: Value },
}

/// Complete order body ready for submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub client_order_id: String,
    pub product_id: String,
    pub side: Side,
    pub order_configuration: OrderConfiguration,
}

impl OrderRequest {
    /// Render as the JSON body posted to the exchange
    pub fn to_payload(&self) -> Result<Value, ProxyError> {
        serde_json::to_value(self).map_err(|e| ProxyError::Serialization(e.to_string()))
    }
}

/// Build an order from RPC parameters.
///
/// Validation runs in a fixed order: required fields, side, type, then the
/// limit price. The first failure is returned.
pub fn build_order(params: &Map<String, Value>) -> Result<OrderRequest, ProxyError> {
    for field in REQUIRED_FIELDS {
        if params.get(field).is_none_or(Value::is_null) {
            return Err(ProxyError::missing_field(field));
        }
    }

    let product_id = match &params["product_id"] {
        Value::String(s) => s.clone(),
        _ => return Err(ProxyError::validation("product_id must be a string")),
    };

    let side = params["side"]
        .as_str()
        .ok_or("side must be 'BUY' or 'SELL'")
        .and_then(Side::try_from)
        .map_err(ProxyError::validation)?;

    let order_type = params["type"]
        .as_str()
        .ok_or("type must be 'MARKET' or 'LIMIT'")
        .and_then(OrderType::try_from)
        .map_err(ProxyError::validation)?;

    let amount = params["amount"].clone();

    let order_configuration = match order_type {
        OrderType::Market => OrderConfiguration::MarketMarketIoc { quote_size: amount },
        OrderType::Limit => {
            let price = params
                .get("price")
                .filter(|p| is_truthy(p))
                .ok_or_else(|| ProxyError::validation("price is required for limit orders"))?;
            OrderConfiguration::LimitLimitGtc {
                base_size: amount,
                limit_price: price.clone(),
            }
        }
    };

    Ok(OrderRequest {
        client_order_id: new_client_order_id(),
        product_id,
        side,
        order_configuration,
    })
}

/// Idempotency token sent as `client_order_id`
pub fn new_client_order_id() -> String {
    format!("order_{}", Uuid::new_v4().simple())
}

/// Whether a JSON value counts as "set" for optional order fields
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
