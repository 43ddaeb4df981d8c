//! Low-level JSON-RPC client for Sui.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::Transport;
use crate::error::RpcError;

/// JSON-RPC request structure.
#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [Value],
}

/// JSON-RPC response structure.
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Low-level JSON-RPC client: envelopes, request ids and error extraction.
pub struct RpcClient {
    url: String,
    transport: Box<dyn Transport>,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            url: url.into(),
            transport,
            request_id: AtomicU64::new(0),
        }
    }

    /// Get the RPC URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make one JSON-RPC call and return its `result` member.
    ///
    /// A top-level `error` member becomes [`RpcError::Protocol`]. There are
    /// no retries.
    pub fn call(
        &self,
        method: &str,
        params: &[Value],
        headers: &BTreeMap<String, String>,
    ) -> Result<Value, RpcError> {
        let request_id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: request_id,
            method,
            params,
        };
        let body = serde_json::to_value(&request).map_err(RpcError::Decode)?;

        tracing::debug!(method, request_id, "sending JSON-RPC request");
        let raw = self.transport.post(&self.url, headers, &body)?;

        let response: JsonRpcResponse = serde_json::from_value(raw).map_err(RpcError::Decode)?;
        if let Some(error) = response.error {
            let error = parse_rpc_error(error);
            tracing::warn!(method, request_id, %error, "JSON-RPC error response");
            return Err(error);
        }
        response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("Missing result in response".to_string()))
    }

    /// POST a plain JSON body to another endpoint over the same transport.
    pub fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: &Value,
    ) -> Result<Value, RpcError> {
        self.transport.post(url, headers, body)
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Map a JSON-RPC `error` member onto [`RpcError::Protocol`].
///
/// Full nodes send `{code, message, data}`; anything else keeps its JSON text
/// as the message.
fn parse_rpc_error(error: Value) -> RpcError {
    match error {
        Value::Object(mut map) => {
            let code = map.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = match map.remove("message") {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => Value::Object(map.clone()).to_string(),
            };
            RpcError::Protocol {
                code,
                message,
                data: map.remove("data"),
            }
        }
        Value::String(message) => RpcError::Protocol {
            code: 0,
            message,
            data: None,
        },
        other => RpcError::Protocol {
            code: 0,
            message: other.to_string(),
            data: None,
        },
    }
}
