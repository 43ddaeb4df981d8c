//! Shared helpers for the mock-server tests.

use std::time::Duration;

use httpmock::MockServer;
use serde_json::{Value, json};
use sui_kit::*;

/// A client pointed at `server` with a short timeout and `keypair` active.
pub fn client_for(server: &MockServer, keypair: &KeyPair) -> SuiClient {
    SuiConfig::custom(server.base_url())
        .faucet_url(server.url("/gas"))
        .keypair(keypair.clone())
        .max_page_size(2)
        .request_timeout(Duration::from_millis(500))
        .build()
        .client()
        .unwrap()
}

pub fn rpc_result(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 0, "result": result})
}

pub fn coin(id: u32, balance: u64) -> Value {
    json!({
        "coinType": SUI_COIN_TYPE,
        "coinObjectId": format!("0x{id:x}"),
        "version": "4",
        "digest": "CoinDigest",
        "balance": balance.to_string(),
        "previousTransaction": "PrevTx"
    })
}

pub fn keypair() -> KeyPair {
    KeyPair::ed25519_from_bytes([42u8; 32])
}
