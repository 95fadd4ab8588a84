//! Request translator
//!
//! Owns the configured default credentials, the client factory and the
//! upstream timeout. Front ends hand it either a proxy request (HTTP) or an
//! already-built client plus an [`Operation`] (stdio), and get back JSON or a
//! [`ProxyError`].

use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::credentials::{CredentialOverrides, Credentials};
use crate::error::{ClientInitError, ProxyError, ProxyResult, UpstreamError};
use crate::normalize::to_json;
use crate::ports::{ClientFactory, ExchangeClient};
use crate::routing::{Operation, normalize_path};

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

const MISSING_PROXY_FIELDS: &str = "Missing required fields: keyName, privateKey, method, path";

/// Body of `POST /proxy`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(flatten)]
    pub credentials: CredentialOverrides,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// A proxy request whose credentials and target have been validated
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub credentials: Credentials,
    pub method: String,
    pub path: String,
    pub payload: Option<Value>,
}

pub struct Translator<F: ClientFactory> {
    factory: F,
    defaults: CredentialOverrides,
    timeout: Duration,
    debug: bool,
}

impl<F: ClientFactory> Translator<F> {
    pub fn new(factory: F, defaults: CredentialOverrides) -> Self {
        Translator {
            factory,
            defaults,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
            debug: false,
        }
    }

    /// Bound every upstream call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Emit per-request info logs
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Build a client from `overrides`, falling back to the defaults
    pub fn connect(&self, overrides: &CredentialOverrides) -> Result<F::Client, ClientInitError> {
        let credentials = overrides.resolve_for_client(&self.defaults)?;
        self.build_client(&credentials)
    }

    fn build_client(&self, credentials: &Credentials) -> Result<F::Client, ClientInitError> {
        let client = self
            .factory
            .connect(credentials)
            .inspect_err(|e| tracing::error!(kind = "client_init", "{}", e))?;
        if self.debug {
            tracing::info!("Coinbase client initialized for key: {}", credentials.key_name);
        }
        Ok(client)
    }

    /// Handle one HTTP proxy request end to end.
    ///
    /// A fresh client is built for every call; nothing is shared between
    /// requests except the read-only defaults.
    pub async fn proxy(&self, request: ProxyRequest) -> ProxyResult<Value> {
        let prepared = self.prepare(request)?;
        self.dispatch(prepared).await
    }

    /// Resolve credentials and check the request shape without any I/O
    pub fn prepare(&self, request: ProxyRequest) -> ProxyResult<PreparedRequest> {
        let ProxyRequest {
            credentials,
            method,
            path,
            payload,
        } = request;

        let credentials = credentials
            .resolve(&self.defaults)
            .map_err(|_| ProxyError::validation(MISSING_PROXY_FIELDS))?;
        let (Some(method), Some(path)) = (non_empty(method), non_empty(path)) else {
            return Err(ProxyError::validation(MISSING_PROXY_FIELDS));
        };

        Ok(PreparedRequest {
            credentials,
            method,
            path: normalize_path(&path),
            payload,
        })
    }

    /// Route a prepared request and run it on a freshly built client
    pub async fn dispatch(&self, request: PreparedRequest) -> ProxyResult<Value> {
        let PreparedRequest {
            credentials,
            method,
            path,
            payload,
        } = request;

        if self.debug {
            tracing::info!("Proxying request: {} {}", method, path);
        }

        let outcome = self.route_and_execute(&credentials, &method, &path, payload).await;

        match &outcome {
            Ok(_) if self.debug => tracing::info!("API request successful"),
            Ok(_) => {}
            Err(e) => tracing::error!(kind = e.kind(), "Coinbase API request failed: {}", e),
        }
        outcome
    }

    async fn route_and_execute(
        &self,
        credentials: &Credentials,
        method: &str,
        path: &str,
        payload: Option<Value>,
    ) -> ProxyResult<Value> {
        let operation = Operation::route(method, path, payload)?;
        let client = self.build_client(credentials)?;
        self.execute(&client, operation).await
    }

    /// Run one operation on `client` and render the typed result as JSON
    pub async fn execute<C>(&self, client: &C, operation: Operation) -> ProxyResult<Value>
    where
        C: ExchangeClient + ?Sized,
    {
        if self.debug {
            tracing::debug!(operation = operation.name(), "Calling upstream");
        }

        match operation {
            Operation::ListAccounts => {
                let page = self.bounded(client.list_accounts()).await?;
                if self.debug {
                    tracing::info!("Retrieved {} accounts", page.accounts.len());
                }
                to_json(&page)
            }
            Operation::GetProductTicker { product_id } => {
                let product = self.bounded(client.get_public_product(&product_id)).await?;
                if self.debug {
                    tracing::info!("Retrieved ticker for {}", product_id);
                }
                to_json(&product)
            }
            Operation::CreateOrder { payload } => {
                let response = self.bounded(client.create_order(&payload)).await?;
                if self.debug {
                    tracing::info!(
                        success = response.success,
                        order_id = response.order_id().unwrap_or_default(),
                        "Order submitted"
                    );
                }
                to_json(&response)
            }
            Operation::ListOrders => {
                let page = self.bounded(client.list_orders()).await?;
                to_json(&page)
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, UpstreamError>>,
    ) -> ProxyResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(ProxyError::from),
            Err(_) => Err(ProxyError::Timeout(self.timeout)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
