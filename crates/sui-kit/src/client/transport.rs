//! HTTP transport seam.
//!
//! The client talks to the network only through [`Transport`]. The default
//! [`HttpTransport`] posts JSON over a pooled blocking `reqwest` client; tests
//! substitute a scripted transport.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::RpcError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Posts JSON bodies and returns the decoded JSON response.
///
/// Implementations must never retry, and must fail with
/// [`RpcError::TransportClosed`] without any I/O once closed.
pub trait Transport: Send {
    /// POST `body` to `url` with the given headers.
    fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: &Value,
    ) -> Result<Value, RpcError>;

    /// Release connections. Calling it again has no effect.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

/// Blocking HTTP transport with connection pooling and a fixed timeout.
pub struct HttpTransport {
    client: Option<reqwest::blocking::Client>,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose every request times out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client: Some(client),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: &Value,
    ) -> Result<Value, RpcError> {
        let client = self.client.as_ref().ok_or(RpcError::TransportClosed)?;

        let payload = serde_json::to_vec(body).map_err(RpcError::Decode)?;
        let mut request = client.post(url).body(payload);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            // A non-JSON error page is a transport failure, not a decode failure.
            Err(_) if !status.is_success() => Err(RpcError::transport(
                format!("HTTP {}: {}", status, text),
                Some(status.as_u16()),
                false,
            )),
            Err(e) => Err(RpcError::Decode(e)),
        }
    }

    fn close(&mut self) {
        self.client = None;
    }

    fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .field("closed", &self.is_closed())
            .finish()
    }
}
