//! Coinbase Advanced Trade client
//!
//! - `auth`: CDP key loading and per-request ES256 JWTs
//! - `rest_client`: the `ExchangeClient` implementation over reqwest
//! - `factory`: the `ClientFactory` the front ends are wired with

pub mod auth;
pub mod factory;
pub mod rest_client;

pub use auth::{JwtSigner, KeyError};
pub use factory::{CoinbaseClientFactory, DEFAULT_BASE_URL};
pub use rest_client::{CoinbaseClient, RestError};
