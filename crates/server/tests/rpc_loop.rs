//! Integration tests for the stdio RPC loop
//!
//! Feeds newline-delimited requests from a byte slice and decodes the
//! responses written back, one JSON object per line.

mod common;

use cbproxy_core::{CredentialOverrides, RpcSession};
use cbproxy_server::run_rpc_loop;
use common::{Recorder, configured_defaults, fake_translator};
use serde_json::{Value, json};
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

async fn run_lines(defaults: CredentialOverrides, input: &str) -> (Vec<Value>, Arc<Recorder>) {
    run_bytes(defaults, input.as_bytes()).await
}

async fn run_bytes(defaults: CredentialOverrides, input: &[u8]) -> (Vec<Value>, Arc<Recorder>) {
    let (translator, recorder) = fake_translator(defaults, false);
    let mut session = RpcSession::new(translator);
    session.initialize();

    let mut output = Vec::new();
    run_rpc_loop(&mut session, input, &mut output)
        .await
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.is_empty() || text.ends_with('\n'));
    let responses = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (responses, recorder)
}

fn lines(requests: &[Value]) -> String {
    requests.iter().map(|r| format!("{}\n", r)).collect()
}

// ============================================================================
// Protocol
// ============================================================================

#[tokio::test]
async fn test_one_response_per_line() {
    let input = lines(&[
        json!({"method": "coinbase_get_accounts", "id": 1}),
        json!({"method": "coinbase_get_product_ticker", "params": {"product_id": "BTC-USD"}, "id": 2}),
        json!({"method": "coinbase_unknown", "id": 3}),
    ]);
    let (responses, recorder) = run_lines(configured_defaults(), &input).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["accounts"][0]["currency"], "BTC");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["price"], "64000.01");
    assert_eq!(
        responses[2],
        json!({"error": "Unknown method: coinbase_unknown", "id": 3})
    );
    // Client built once at startup and reused
    assert_eq!(recorder.connects(), 1);
}

#[tokio::test]
async fn test_empty_input_ends_cleanly() {
    let (responses, _) = run_lines(configured_defaults(), "").await;
    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_malformed_line_keeps_loop_alive() {
    let input = format!(
        "{{not json\n{}\n",
        json!({"method": "coinbase_get_accounts", "id": "after"})
    );
    let (responses, _) = run_lines(configured_defaults(), &input).await;

    assert_eq!(responses.len(), 2);
    assert!(
        responses[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON: ")
    );
    assert_eq!(responses[0]["id"], Value::Null);
    assert!(responses[0].as_object().unwrap().contains_key("id"));
    assert_eq!(responses[1]["id"], "after");
    assert!(responses[1].get("result").is_some());
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_loop_alive() {
    let mut input = b"{\"method\":\"coinbase_get_accounts\",\"id\":\"\xff\"}\n".to_vec();
    input.extend_from_slice(b"{\"method\":\"coinbase_get_accounts\",\"id\":2}\r\n");
    let (responses, _) = run_bytes(configured_defaults(), &input).await;

    assert_eq!(responses.len(), 2);
    assert!(
        responses[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON: ")
    );
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 2);
    assert!(responses[1].get("result").is_some());
}

#[tokio::test]
async fn test_ill_shaped_requests() {
    let input = "[1, 2, 3]\n42\n{\"method\": 5}\n";
    let (responses, _) = run_lines(configured_defaults(), input).await;

    assert_eq!(responses.len(), 3);
    for response in &responses {
        assert!(
            response["error"]
                .as_str()
                .unwrap()
                .starts_with("Server error: ")
        );
        assert_eq!(response["id"], Value::Null);
    }
}

#[tokio::test]
async fn test_missing_method() {
    let (responses, _) = run_lines(configured_defaults(), "{\"id\": 9}\n").await;
    assert_eq!(responses[0], json!({"error": "Unknown method: null", "id": 9}));
}

#[tokio::test]
async fn test_id_omitted_when_absent() {
    let input = lines(&[json!({"method": "coinbase_get_accounts"})]);
    let (responses, _) = run_lines(configured_defaults(), &input).await;

    let response = responses[0].as_object().unwrap();
    assert!(response.contains_key("result"));
    assert!(!response.contains_key("id"));
}

// ============================================================================
// Operations
// ============================================================================

#[tokio::test]
async fn test_place_market_order() {
    let input = lines(&[json!({
        "method": "coinbase_place_order",
        "params": {"product_id": "BTC-USD", "side": "sell", "type": "MARKET", "amount": "25", "price": 1},
        "id": "ord-1"
    })]);
    let (responses, recorder) = run_lines(configured_defaults(), &input).await;

    assert_eq!(responses[0]["id"], "ord-1");
    assert_eq!(responses[0]["result"]["success"], true);

    let orders = recorder.orders.lock().unwrap();
    assert_eq!(orders[0]["side"], "SELL");
    assert_eq!(
        orders[0]["order_configuration"],
        json!({"market_market_ioc": {"quote_size": "25"}})
    );
}

#[tokio::test]
async fn test_limit_order_without_price() {
    let input = lines(&[json!({
        "method": "coinbase_place_order",
        "params": {"product_id": "BTC-USD", "side": "BUY", "type": "LIMIT", "amount": "1", "price": 0}
    })]);
    let (responses, recorder) = run_lines(configured_defaults(), &input).await;

    assert_eq!(
        responses[0],
        json!({"error": "Failed to place order: price is required for limit orders"})
    );
    assert!(recorder.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unconfigured_client() {
    let input = lines(&[
        json!({"method": "coinbase_get_accounts", "id": 1}),
        json!({"method": "coinbase_get_product_ticker", "params": {"product_id": "BTC-USD"}, "id": 2}),
    ]);
    let (responses, _) = run_lines(CredentialOverrides::default(), &input).await;

    assert_eq!(
        responses[0]["error"],
        "Failed to get accounts: Coinbase client not initialized - check environment variables"
    );
    assert_eq!(
        responses[1]["error"],
        "Failed to get product ticker: Coinbase client not initialized - check environment variables"
    );
}
