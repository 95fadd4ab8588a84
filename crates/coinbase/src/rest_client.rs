use async_trait::async_trait;
use cbproxy_core::routing::{ACCOUNTS_PATH, ORDERS_PATH};
use cbproxy_core::{
    AccountsPage, CreateOrderResponse, ExchangeClient, OrdersPage, Product, UpstreamError,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::auth::JwtSigner;

pub const ORDERS_HISTORY_PATH: &str = "/api/v3/brokerage/orders/historical/batch";
pub const PUBLIC_PRODUCTS_PATH: &str = "/api/v3/brokerage/market/products";

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Coinbase API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Convert infrastructure RestError to the port-level UpstreamError
impl From<RestError> for UpstreamError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => UpstreamError::Network(e.to_string()),
            RestError::Api { status, message } => UpstreamError::Status { status, message },
            RestError::Parse(msg) => UpstreamError::Parse(msg),
            RestError::Signing(e) => UpstreamError::Signing(e.to_string()),
        }
    }
}

/// Authenticated Advanced Trade REST client
#[derive(Clone, Debug)]
pub struct CoinbaseClient {
    client: Client,
    base_url: String,
    host: String,
    signer: JwtSigner,
}

impl CoinbaseClient {
    pub fn new(client: Client, base_url: &str, signer: JwtSigner) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let host = base_url
            .split_once("://")
            .map_or(base_url.as_str(), |(_, host)| host)
            .to_string();
        CoinbaseClient {
            client,
            base_url,
            host,
            signer,
        }
    }

    /// Host part the JWT `uri` claim is bound to
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let resp = self.request(Method::GET, path)?.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, RestError> {
        let resp = self
            .request(Method::POST, path)?
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, RestError> {
        let token = self.signer.sign(method.as_str(), &self.host, path)?;
        tracing::debug!(method = %method, path, "Coinbase request");

        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .ok()
                .and_then(ApiError::into_message)
                .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(RestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }
}

/// Error body returned by Advanced Trade
#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

#[async_trait]
impl ExchangeClient for CoinbaseClient {
    async fn list_accounts(&self) -> Result<AccountsPage, UpstreamError> {
        Ok(self.get(ACCOUNTS_PATH).await?)
    }

    async fn get_public_product(&self, product_id: &str) -> Result<Product, UpstreamError> {
        let path = format!("{}/{}", PUBLIC_PRODUCTS_PATH, product_id);
        Ok(self.get(&path).await?)
    }

    async fn create_order(&self, order: &Value) -> Result<CreateOrderResponse, UpstreamError> {
        Ok(self.post(ORDERS_PATH, order).await?)
    }

    async fn list_orders(&self) -> Result<OrdersPage, UpstreamError> {
        Ok(self.get(ORDERS_HISTORY_PATH).await?)
    }
}
