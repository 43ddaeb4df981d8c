//! Unsigned transaction data as returned by the `unsafe_*` methods.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use super::address::{ObjectID, SuiAddress};
use crate::error::SignerError;

/// Base64-encoded BCS transaction data.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxBytes(String);

impl TxBytes {
    /// Wrap an already base64-encoded string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode raw transaction bytes.
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self(STANDARD.encode(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to the raw bytes that get signed.
    pub fn decode(&self) -> Result<Vec<u8>, SignerError> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| SignerError::InvalidTxBytes(e.to_string()))
    }
}

impl fmt::Display for TxBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TxBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxBytes({} chars)", self.0.len())
    }
}

/// Reference to a specific version of an object.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectID,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub version: u64,
    pub digest: String,
}

/// Unsigned transaction returned by every transaction-building method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    pub tx_bytes: TxBytes,
    #[serde(default)]
    pub gas: Vec<ObjectRef>,
    #[serde(default)]
    pub input_objects: Vec<serde_json::Value>,
}

/// How long `sui_executeTransactionBlock` waits before answering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecuteRequestType {
    /// Return once the effects certificate exists.
    WaitForEffectsCert,
    /// Return once the node has applied the effects locally.
    #[default]
    WaitForLocalExecution,
}

impl ExecuteRequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecuteRequestType::WaitForEffectsCert => "WaitForEffectsCert",
            ExecuteRequestType::WaitForLocalExecution => "WaitForLocalExecution",
        }
    }
}

/// Outcome of the no-sign round trip: who must sign, and what.
#[derive(Debug, Clone, PartialEq)]
pub struct PreExecutionResult {
    pub authority: SuiAddress,
    pub tx_bytes: TransactionBytes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_bytes_deserialize() {
        let tb: TransactionBytes = serde_json::from_value(json!({
            "txBytes": "AAEC",
            "gas": [{"objectId": "0x5", "version": "12", "digest": "abc"}],
            "inputObjects": [{"ImmOrOwnedMoveObject": {}}]
        }))
        .unwrap();
        assert_eq!(tb.tx_bytes.decode().unwrap(), vec![0, 1, 2]);
        assert_eq!(tb.gas[0].version, 12);
        assert_eq!(tb.input_objects.len(), 1);

        let numeric: ObjectRef =
            serde_json::from_value(json!({"objectId": "0x5", "version": 7, "digest": "d"}))
                .unwrap();
        assert_eq!(numeric.version, 7);
    }

    #[test]
    fn test_tx_bytes_invalid_base64() {
        assert!(matches!(
            TxBytes::new("%%%").decode(),
            Err(SignerError::InvalidTxBytes(_))
        ));
    }

    #[test]
    fn test_request_type_wire_names() {
        assert_eq!(
            serde_json::to_value(ExecuteRequestType::WaitForEffectsCert).unwrap(),
            json!("WaitForEffectsCert")
        );
        assert_eq!(
            ExecuteRequestType::default().as_str(),
            "WaitForLocalExecution"
        );
    }
}
