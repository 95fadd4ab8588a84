//! In-memory exchange shared by the front-end tests

#![allow(dead_code)]

use async_trait::async_trait;
use cbproxy_core::{
    AccountsPage, ClientFactory, ClientInitError, CreateOrderResponse, CredentialOverrides,
    Credentials, ExchangeClient, OrdersPage, Product, Translator, UpstreamError,
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const VALID_KEY: &str = "valid-key";

#[derive(Default)]
pub struct Recorder {
    pub connects: AtomicUsize,
    pub orders: Mutex<Vec<Value>>,
}

impl Recorder {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

pub struct FakeClient {
    recorder: Arc<Recorder>,
    hang: bool,
}

#[async_trait]
impl ExchangeClient for FakeClient {
    async fn list_accounts(&self) -> Result<AccountsPage, UpstreamError> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        Ok(serde_json::from_value(json!({
            "accounts": [
                {"uuid": "a-1", "currency": "BTC", "available_balance": {"value": "0.5", "currency": "BTC"}}
            ],
            "has_next": false
        }))
        .unwrap())
    }

    async fn get_public_product(&self, product_id: &str) -> Result<Product, UpstreamError> {
        if product_id == "NOPE-USD" {
            return Err(UpstreamError::Status {
                status: 404,
                message: "product not found".to_string(),
            });
        }
        Ok(serde_json::from_value(json!({"product_id": product_id, "price": "64000.01"})).unwrap())
    }

    async fn create_order(&self, order: &Value) -> Result<CreateOrderResponse, UpstreamError> {
        self.recorder.orders.lock().unwrap().push(order.clone());
        Ok(serde_json::from_value(json!({
            "success": true,
            "success_response": {
                "order_id": "11111-00000-000000",
                "product_id": order["product_id"],
                "side": order["side"],
                "client_order_id": order["client_order_id"]
            }
        }))
        .unwrap())
    }

    async fn list_orders(&self) -> Result<OrdersPage, UpstreamError> {
        Ok(serde_json::from_value(json!({"orders": [], "has_next": false})).unwrap())
    }
}

pub struct FakeFactory {
    pub recorder: Arc<Recorder>,
    pub hang: bool,
}

impl ClientFactory for FakeFactory {
    type Client = FakeClient;

    fn connect(&self, credentials: &Credentials) -> Result<FakeClient, ClientInitError> {
        self.recorder.connects.fetch_add(1, Ordering::SeqCst);
        if credentials.private_key != VALID_KEY {
            return Err(ClientInitError::InvalidKey("unreadable PEM".to_string()));
        }
        Ok(FakeClient {
            recorder: Arc::clone(&self.recorder),
            hang: self.hang,
        })
    }
}

pub fn configured_defaults() -> CredentialOverrides {
    CredentialOverrides::new(
        Some("organizations/org/apiKeys/key".to_string()),
        None,
        Some(VALID_KEY.to_string()),
    )
}

pub fn fake_translator(
    defaults: CredentialOverrides,
    hang: bool,
) -> (Translator<FakeFactory>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let factory = FakeFactory {
        recorder: Arc::clone(&recorder),
        hang,
    };
    (Translator::new(factory, defaults), recorder)
}
