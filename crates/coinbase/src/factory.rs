//! Builds authenticated clients from resolved credentials

use cbproxy_core::{ClientFactory, ClientInitError, Credentials};
use reqwest::Client;

use crate::auth::JwtSigner;
use crate::rest_client::CoinbaseClient;

pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";

/// Shares one connection pool across every client it builds
#[derive(Clone, Debug)]
pub struct CoinbaseClientFactory {
    http: Client,
    base_url: String,
}

impl CoinbaseClientFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        CoinbaseClientFactory {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinbaseClientFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientFactory for CoinbaseClientFactory {
    type Client = CoinbaseClient;

    fn connect(&self, credentials: &Credentials) -> Result<CoinbaseClient, ClientInitError> {
        let signer = JwtSigner::from_credentials(credentials)?;
        Ok(CoinbaseClient::new(self.http.clone(), &self.base_url, signer))
    }
}
