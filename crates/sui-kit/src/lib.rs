//! A synchronous Rust client for the Sui JSON-RPC API.
//!
//! **sui-kit** wraps a Sui full node's JSON-RPC interface in typed request
//! builders, a signing pipeline and a uniform result envelope.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sui_kit::*;
//!
//! let client = SuiConfig::devnet().build().client()?;
//!
//! let owner: SuiAddress = "0x5".parse()?;
//! let gas = client.get_gas(Some(owner), true);
//! match gas.error() {
//!     None => println!("{} gas coins", gas.result_data().data.len()),
//!     Some(e) => println!("{:?}: {e}", gas.kind()),
//! }
//! # Ok::<(), sui_kit::Error>(())
//! ```
//!
//! # Design Principles
//!
//! 1. **Single entry point**: Everything hangs off the [`SuiClient`]
//! 2. **Configure once**: Endpoints, keys and page size set at client creation
//! 3. **One result shape**: Every operation returns a [`SuiRpcResult`]; failures carry an [`ErrorKind`]
//! 4. **Builders all the way down**: Each JSON-RPC method is a [`Builder`](builders::Builder) struct
//!
//! # Core Types
//!
//! - [`SuiAddress`], [`ObjectID`] - 32-byte identifiers
//! - [`KeyPair`], [`PublicKey`], [`Signature`] - Ed25519 and Secp256k1 keys
//! - [`MultiSig`] - Weighted threshold signing
//! - [`TxBytes`] - Base64 transaction data
//!
//! # Signing
//!
//! Transaction bytes are signed under Sui's transaction intent:
//!
//! ```
//! use sui_kit::{KeyPair, TxBytes, sign_transaction};
//!
//! let keypair = KeyPair::generate_ed25519();
//! let tx_bytes = TxBytes::from_bytes(b"transaction data");
//! let signatures = sign_transaction(&tx_bytes, &[&keypair]).unwrap();
//! assert_eq!(signatures.len(), 1);
//! assert!(signatures.as_slice()[0].verify(b"transaction data"));
//! ```

pub mod builders;
pub mod client;
pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{Error, ErrorKind, RpcError};
pub use result::SuiRpcResult;
pub use types::*;

// Re-export client types
pub use client::{
    DEFAULT_MAX_PAGE_SIZE, HttpTransport, Keyring, MAX_PAGE_FETCHES, PageStop, RpcClient,
    SignatureSet, Signer, SuiClient, SuiConfig, SuiConfigBuilder, Transport, accumulate_pages,
    sign_multisig, sign_transaction,
};
