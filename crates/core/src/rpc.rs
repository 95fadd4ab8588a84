//! Stdio RPC session
//!
//! One session per process. Requests are handled strictly one at a time, so
//! the session owns its cached client without any locking.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::credentials::CredentialOverrides;
use crate::error::{ProxyError, ProxyResult};
use crate::normalize::NormalizedResult;
use crate::order::build_order;
use crate::ports::ClientFactory;
use crate::routing::{Operation, RpcMethod};
use crate::slot::ClientSlot;
use crate::translator::Translator;

/// One inbound RPC line
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcRequest {
    /// Correlation id: the request's own `id`, else `params.id`
    pub fn correlation_id(&self) -> Option<Value> {
        self.id.clone().or_else(|| {
            self.params
                .as_ref()
                .and_then(|p| p.get("id"))
                .filter(|id| !id.is_null())
                .cloned()
        })
    }
}

pub struct RpcSession<F: ClientFactory> {
    translator: Translator<F>,
    client: ClientSlot<F::Client>,
}

impl<F: ClientFactory> RpcSession<F> {
    pub fn new(translator: Translator<F>) -> Self {
        RpcSession {
            translator,
            client: ClientSlot::Uninitialized,
        }
    }

    /// Eager startup attempt. Missing configuration is not fatal: the
    /// client is built on demand once an operation arrives.
    pub fn initialize(&mut self) {
        let translator = &self.translator;
        self.client.try_init(|| translator.connect(&CredentialOverrides::default()));

        match &self.client {
            ClientSlot::Ready(_) => {
                if translator.debug() {
                    tracing::info!("Coinbase RPC client initialized successfully");
                }
            }
            ClientSlot::FailedInit(e) => {
                tracing::warn!("{} - client will be initialized on demand", e)
            }
            ClientSlot::Uninitialized => {}
        }
    }

    pub fn client_state(&self) -> &'static str {
        self.client.state_name()
    }

    /// Handle one request. Always produces a well-formed result.
    pub async fn handle(&mut self, request: RpcRequest) -> NormalizedResult {
        let id = request.correlation_id();

        let method = match request.method.as_deref() {
            Some(name) => RpcMethod::try_from(name),
            None => Err(ProxyError::UnknownMethod("null".to_string())),
        };
        let method = match method {
            Ok(method) => method,
            Err(e) => {
                tracing::warn!(kind = e.kind(), "{}", e);
                return NormalizedResult::failure(e.to_string(), id);
            }
        };

        if self.translator.debug() {
            tracing::info!("Received RPC request: {}", method);
        }

        let params = request.params.unwrap_or_default();
        let outcome = self.dispatch(method, &params).await.map_err(|e| {
            tracing::error!(kind = e.kind(), method = method.as_str(), "{}", e);
            format!("{}: {}", method.failure_prefix(), e)
        });
        NormalizedResult::from_outcome(outcome, id)
    }

    async fn dispatch(
        &mut self,
        method: RpcMethod,
        params: &Map<String, Value>,
    ) -> ProxyResult<Value> {
        let RpcSession { translator, client } = self;
        let client = client.ensure(|| translator.connect(&CredentialOverrides::default()))?;

        match method {
            RpcMethod::GetAccounts => translator.execute(client, Operation::ListAccounts).await,
            RpcMethod::GetProductTicker => {
                let product_id = params
                    .get("product_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ProxyError::missing_field("product_id"))?;
                let operation = Operation::product_ticker(product_id)?;
                translator.execute(client, operation).await
            }
            RpcMethod::PlaceOrder => {
                let order = build_order(params)?;
                let payload = order.to_payload()?;
                let result = translator
                    .execute(client, Operation::CreateOrder { payload })
                    .await?;
                if translator.debug() {
                    tracing::info!("Placed {} order for {}", order.side, order.product_id);
                }
                Ok(result)
            }
        }
    }
}
