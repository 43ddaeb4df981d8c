//! Error types for sui-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) - Main error type, carried by every failed [`SuiRpcResult`](crate::SuiRpcResult)
//!   - [`RpcError`] - Transport, decode and protocol failures of a single round trip
//!   - [`ParseAddressError`] - Invalid address or object ID
//!   - [`ParseKeyError`] - Invalid key encoding
//!   - [`SignerError`] - Signing operation failures
//!   - [`KeyStoreError`] - Keystore loading failures
//!
//! Every error maps onto one [`ErrorKind`], which is the stable taxonomy
//! callers should branch on:
//!
//! ```rust,no_run
//! use sui_kit::*;
//!
//! # fn example(client: &SuiClient) {
//! let result = client.get_gas(None, false);
//! match result.kind() {
//!     None => println!("{} coins", result.result_data().data.len()),
//!     Some(ErrorKind::Transport) => println!("network problem, try again later"),
//!     Some(kind) => println!("{kind:?}: {}", result.error().unwrap()),
//! }
//! # }
//! ```

use thiserror::Error;

use crate::types::SuiAddress;

/// Error parsing a Sui address or object ID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Address '{0}' is too long (max 64 hex digits)")]
    TooLong(String),

    #[error("Address '{0}' is not valid hex")]
    InvalidHex(String),
}

/// Error parsing a public key, secret key or signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(String),

    #[error("Unknown signature scheme flag: {0:#04x}")]
    UnknownScheme(u8),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid key material: {0}")]
    InvalidKey(String),
}

/// Error during signing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("Invalid seed phrase")]
    InvalidSeedPhrase,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid transaction bytes: {0}")]
    InvalidTxBytes(String),

    #[error("Multisig signing error: {0}")]
    MultiSig(String),
}

/// Error during keystore operations.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(#[from] ParseKeyError),

    #[error("Path error: {0}")]
    PathError(String),
}

// ============================================================================
// RPC Errors
// ============================================================================

/// Failures of a single JSON-RPC round trip.
#[derive(Debug, Error)]
pub enum RpcError {
    // ─── Transport ───
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        timed_out: bool,
    },

    #[error("Transport is closed")]
    TransportClosed,

    // ─── Decode ───
    #[error("JSON decoder error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ─── Protocol ───
    #[error("RPC error: {message} (code: {code})")]
    Protocol {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
}

impl RpcError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>, status_code: Option<u16>, timed_out: bool) -> Self {
        RpcError::Transport {
            message: message.into(),
            status_code,
            timed_out,
        }
    }

    /// Returns true if the request never produced a readable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport { .. } | RpcError::TransportClosed)
    }

    /// Returns true if the round trip ended with a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RpcError::Transport { timed_out: true, .. })
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {e}")
        } else if e.is_connect() {
            format!("connection failed: {e}")
        } else if e.is_builder() {
            format!("invalid request: {e}")
        } else {
            e.to_string()
        };
        RpcError::Transport {
            message,
            status_code: e.status().map(|s| s.as_u16()),
            timed_out: e.is_timeout(),
        }
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Stable classification of every [`Error`](enum@Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity, timeout, malformed URL or a closed transport.
    Transport,
    /// The response body was not the JSON the client expected.
    Decode,
    /// Well-formed JSON carrying an error payload from the remote service.
    Protocol,
    /// A signing entry point was called with a builder that carries no transaction.
    NotTransactional,
    /// Key resolution or signature production failed.
    Signing,
    /// The keyring has no signer for the requested address.
    UnknownAddress,
    /// Configuration, parameter validation or other local failures.
    Other,
}

#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("No address given and no active address configured")]
    NoActiveAddress,

    #[error("No faucet URL configured for this network")]
    NoFaucet,

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ─── Parsing ───
    #[error(transparent)]
    ParseAddress(#[from] ParseAddressError),

    #[error(transparent)]
    ParseKey(#[from] ParseKeyError),

    // ─── Builders ───
    #[error("{0} is used only with transaction types")]
    NotTransactional(&'static str),

    #[error("Invalid builder parameters: {0}")]
    InvalidBuilder(String),

    // ─── RPC ───
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Result interpretation failed: {0}")]
    Json(#[from] serde_json::Error),

    // ─── Signing ───
    #[error("Signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error("No signer registered for address {0}")]
    UnknownAddress(SuiAddress),

    // ─── KeyStore ───
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Rpc(RpcError::Transport { .. } | RpcError::TransportClosed) => {
                ErrorKind::Transport
            }
            Error::Rpc(RpcError::Decode(_) | RpcError::InvalidResponse(_)) | Error::Json(_) => {
                ErrorKind::Decode
            }
            Error::Rpc(RpcError::Protocol { .. }) => ErrorKind::Protocol,
            Error::NotTransactional(_) => ErrorKind::NotTransactional,
            Error::Signing(_) => ErrorKind::Signing,
            Error::UnknownAddress(_) => ErrorKind::UnknownAddress,
            _ => ErrorKind::Other,
        }
    }
}
