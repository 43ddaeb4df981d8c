//! Client module for the Sui JSON-RPC API.
//!
//! This module provides the core client infrastructure:
//!
//! - [`SuiClient`] - The main client, the single entry point for all operations
//! - [`SuiConfig`] - Endpoints, keys and limits, with network presets
//! - [`RpcClient`] - Low-level JSON-RPC client over a [`Transport`]
//!
//! # Signers
//!
//! | Item | Use Case |
//! |------|----------|
//! | [`KeyPair`](crate::KeyPair) | An Ed25519 or Secp256k1 key held in memory |
//! | [`Keyring`] | Address-indexed signers, loadable from a `sui.keystore` file |
//! | [`MultiSig`](crate::MultiSig) | Weighted k-of-n signing with a threshold |
//!
//! # Execution
//!
//! [`SuiClient::execute`] runs any [`Builder`](crate::builders::Builder).
//! Transaction builders take two round trips: one for the unsigned
//! transaction bytes, one to submit the signed transaction.

mod config;
mod execute;
mod facade;
mod pagination;
mod rpc;
mod signer;
mod sui;
mod transport;

pub use config::{DEFAULT_MAX_PAGE_SIZE, SuiConfig, SuiConfigBuilder};
pub use pagination::{MAX_PAGE_FETCHES, PageStop, accumulate_pages};
pub use rpc::RpcClient;
pub use signer::{Keyring, SignatureSet, Signer, sign_multisig, sign_transaction};
pub use sui::SuiClient;
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, Transport};
