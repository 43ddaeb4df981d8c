//! Request builders.
//!
//! Every JSON-RPC method the client can call is a struct implementing
//! [`Builder`]. A builder knows its method name, validates and renders its
//! parameters, and interprets the raw `result` into a typed value. Builders
//! whose [`requires_signing`](Builder::requires_signing) is true produce
//! unsigned transaction bytes and go through the signing pipeline.
//!
//! # Example
//!
//! ```rust
//! use sui_kit::builders::{Builder, GetCoins};
//! use sui_kit::SuiAddress;
//!
//! let owner: SuiAddress = "0x5".parse().unwrap();
//! let builder = GetCoins::new(owner).limit(10);
//! assert_eq!(builder.method(), "suix_getCoins");
//! assert!(!builder.requires_signing());
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::types::SuiAddress;

mod exec;
mod get;

pub use exec::{
    DryRunTransaction, ExecuteTransaction, MergeCoin, MoveCall, Pay, PayAllSui, PaySui, Publish,
    SplitCoin, SplitCoinEqually, TransactionBlockResponseOptions, TransferObject, TransferSui,
};
pub use get::{
    GetCoinTypeBalance, GetCoins, GetMultipleObjects, GetObject, GetObjectsOwnedByAddress,
    GetPackage, GetPastObject, ObjectDataOptions, QueryEvents,
};

/// Default headers sent with every request.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// A JSON-RPC request description.
pub trait Builder {
    /// The typed result.
    type Output: DeserializeOwned;

    /// The JSON-RPC method name.
    fn method(&self) -> &'static str;

    /// Validate and render the positional parameters.
    fn params(&self) -> Result<Vec<Value>, Error>;

    /// HTTP headers for this request.
    fn header(&self) -> BTreeMap<String, String> {
        default_headers()
    }

    /// Whether the method returns unsigned transaction bytes that must be
    /// signed and executed.
    fn requires_signing(&self) -> bool {
        false
    }

    /// The address that must sign, for transaction builders.
    fn authority(&self) -> Option<SuiAddress> {
        None
    }

    /// Convert the raw `result` member into [`Self::Output`].
    fn interpret(&self, raw: Value) -> Result<Self::Output, Error> {
        Ok(serde_json::from_value(raw)?)
    }
}

/// A builder over a paginated result whose cursor can be advanced.
pub trait Cursored: Builder {
    type Cursor;

    fn set_cursor(&mut self, cursor: Option<Self::Cursor>);
}

/// Serialize a value as a JSON parameter.
pub(crate) fn to_param<T: serde::Serialize>(value: &T) -> Result<Value, Error> {
    Ok(serde_json::to_value(value)?)
}

/// u64 values travel as decimal strings.
pub(crate) fn big_int(value: u64) -> Value {
    Value::String(value.to_string())
}
