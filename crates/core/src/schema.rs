//! Typed result schemas, one per operation
//!
//! Each schema names the fields of the Advanced Trade response that callers
//! rely on. Anything else the exchange sends lands in `extra` and is written
//! back out unchanged, so the proxy stays a pass-through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monetary amount as the exchange reports it (decimal string + currency)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub value: String,
    pub currency: String,
}

/// One brokerage account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<Balance>,
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GET /api/v3/brokerage/accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountsPage {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Public product info (used as the ticker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_percentage_change_24h: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_disabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSuccess {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// POST /api/v3/brokerage/orders
///
/// The exchange answers 200 even for rejected orders; `success` tells them
/// apart and `error_response` carries the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_response: Option<OrderSuccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_response: Option<OrderFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_configuration: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateOrderResponse {
    pub fn order_id(&self) -> Option<&str> {
        self.success_response.as_ref().map(|s| s.order_id.as_str())
    }
}

/// One historical order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_filled_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_configuration: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GET /api/v3/brokerage/orders/historical/batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accounts_keep_unknown_fields() {
        let raw = json!({
            "accounts": [{
                "uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
                "name": "BTC Wallet",
                "currency": "BTC",
                "available_balance": {"value": "1.23", "currency": "BTC"},
                "default": false,
                "active": true,
                "type": "ACCOUNT_TYPE_CRYPTO",
                "ready": true,
                "retail_portfolio_id": "b87a2d3f"
            }],
            "has_next": false,
            "cursor": "",
            "size": 1
        });

        let page: AccountsPage = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(page.accounts.len(), 1);
        assert_eq!(page.accounts[0].account_type.as_deref(), Some("ACCOUNT_TYPE_CRYPTO"));
        assert_eq!(page.accounts[0].is_default, Some(false));
        assert_eq!(
            page.accounts[0].extra.get("retail_portfolio_id"),
            Some(&json!("b87a2d3f"))
        );

        assert_eq!(serde_json::to_value(&page).unwrap(), raw);
    }

    #[test]
    fn test_rejected_order_response() {
        let raw = json!({
            "success": false,
            "failure_reason": "UNKNOWN_FAILURE_REASON",
            "error_response": {
                "error": "INSUFFICIENT_FUND",
                "message": "Insufficient balance in source account",
                "preview_failure_reason": "PREVIEW_INSUFFICIENT_FUND"
            }
        });

        let resp: CreateOrderResponse = serde_json::from_value(raw).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.order_id(), None);
        let failure = resp.error_response.unwrap();
        assert_eq!(failure.error.as_deref(), Some("INSUFFICIENT_FUND"));
        assert!(failure.extra.contains_key("preview_failure_reason"));
    }

    #[test]
    fn test_product_requires_product_id() {
        let err = serde_json::from_value::<Product>(json!({"price": "1"}));
        assert!(err.is_err());
    }
}
