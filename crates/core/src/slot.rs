//! Cached client for the stdio RPC path
//!
//! ```text
//!   Uninitialized ──connect ok──▶ Ready
//!        │                          ▲
//!   connect err                connect ok
//!        ▼                          │
//!   FailedInit ──────retry on next operation
//! ```
//!
//! `Ready` is terminal: once a client is built it is reused for the rest of
//! the session.

use crate::error::ClientInitError;

#[derive(Debug, Default)]
pub enum ClientSlot<C> {
    #[default]
    Uninitialized,
    Ready(C),
    FailedInit(ClientInitError),
}

impl<C> ClientSlot<C> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ClientSlot::Ready(_))
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            ClientSlot::Uninitialized => "uninitialized",
            ClientSlot::Ready(_) => "ready",
            ClientSlot::FailedInit(_) => "failed_init",
        }
    }

    /// Attempt construction unless a client is already cached
    pub fn try_init(&mut self, connect: impl FnOnce() -> Result<C, ClientInitError>) {
        if self.is_ready() {
            return;
        }
        *self = match connect() {
            Ok(client) => ClientSlot::Ready(client),
            Err(e) => ClientSlot::FailedInit(e),
        };
    }

    /// Return the cached client, building it first when needed
    pub fn ensure(
        &mut self,
        connect: impl FnOnce() -> Result<C, ClientInitError>,
    ) -> Result<&C, ClientInitError> {
        self.try_init(connect);
        match self {
            ClientSlot::Ready(client) => Ok(client),
            ClientSlot::FailedInit(e) => Err(e.clone()),
            ClientSlot::Uninitialized => Err(ClientInitError::MissingCredentials),
        }
    }
}
