//! Integration tests for sui-kit.
//!
//! These tests drive a real `HttpTransport` against a local mock JSON-RPC
//! server; no Sui node is needed.
//!
//! Run with: `cargo test --test integration`

mod common;
mod execution_integration;
mod transport_integration;
