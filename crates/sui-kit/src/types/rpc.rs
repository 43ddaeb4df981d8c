//! RPC response types.
//!
//! Only the fields the client reads are typed; the rest of each payload is
//! kept as [`serde_json::Value`] so that new node versions do not break
//! decoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use super::address::{ObjectID, SuiAddress};

/// The fully qualified SUI coin type.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

// ============================================================================
// Pagination
// ============================================================================

/// One page of a cursored result set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, C> {
    pub data: Vec<T>,
    pub next_cursor: Option<C>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T, C> Page<T, C> {
    /// A terminal page holding `data`.
    pub fn complete(data: Vec<T>) -> Self {
        Self {
            data,
            next_cursor: None,
            has_next_page: false,
        }
    }
}

// ============================================================================
// Coins
// ============================================================================

/// Balance summary for one coin type (`suix_getBalance`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    pub coin_object_count: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub total_balance: u128,
    #[serde(default)]
    pub locked_balance: BTreeMap<String, Value>,
}

/// A coin object (`suix_getCoins`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: ObjectID,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub version: u64,
    pub digest: String,
    #[serde_as(as = "DisplayFromStr")]
    pub balance: u64,
    #[serde(default)]
    pub previous_transaction: Option<String>,
}

pub type CoinPage = Page<Coin, String>;

// ============================================================================
// Objects
// ============================================================================

/// Object data as returned inside [`SuiObjectResponse`].
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: ObjectID,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub version: u64,
    pub digest: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub previous_transaction: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub display: Option<Value>,
}

/// `sui_getObject` / `sui_multiGetObjects` / `suix_getOwnedObjects` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// `sui_tryGetPastObject` result.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PastObjectResponse {
    /// `VersionFound`, `ObjectNotExists`, `ObjectDeleted`, `VersionNotFound` or `VersionTooHigh`.
    pub status: String,
    #[serde(default)]
    pub details: Value,
}

impl PastObjectResponse {
    pub fn is_found(&self) -> bool {
        self.status == "VersionFound"
    }
}

/// Either a current or a historical object read.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectRead {
    Current(SuiObjectResponse),
    Past(PastObjectResponse),
}

pub type ObjectsPage = Page<SuiObjectResponse, ObjectID>;

/// Normalized Move modules of a package, keyed by module name.
pub type NormalizedPackage = BTreeMap<String, Value>;

// ============================================================================
// Transactions
// ============================================================================

/// Result of `sui_executeTransactionBlock`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default)]
    pub transaction: Option<Value>,
    #[serde(default)]
    pub raw_transaction: Option<String>,
    #[serde(default)]
    pub effects: Option<Value>,
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub object_changes: Option<Vec<Value>>,
    #[serde(default)]
    pub balance_changes: Option<Vec<Value>>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub timestamp_ms: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub checkpoint: Option<u64>,
    #[serde(default)]
    pub confirmed_local_execution: Option<bool>,
    #[serde(default)]
    pub errors: Vec<String>,
}

fn effects_status(effects: Option<&Value>) -> Option<&str> {
    effects?.get("status")?.get("status")?.as_str()
}

impl TransactionBlockResponse {
    /// True if the effects report `success`.
    pub fn is_success(&self) -> bool {
        effects_status(self.effects.as_ref()) == Some("success")
    }
}

/// Result of `sui_dryRunTransactionBlock`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResponse {
    #[serde(default)]
    pub effects: Value,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub object_changes: Vec<Value>,
    #[serde(default)]
    pub balance_changes: Vec<Value>,
    #[serde(default)]
    pub input: Option<Value>,
}

impl DryRunResponse {
    pub fn is_success(&self) -> bool {
        effects_status(Some(&self.effects)) == Some("success")
    }
}

// ============================================================================
// Events
// ============================================================================

/// Event cursor.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventID {
    pub tx_digest: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub event_seq: u64,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiEvent {
    pub id: EventID,
    pub package_id: ObjectID,
    pub transaction_module: String,
    pub sender: SuiAddress,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub parsed_json: Option<Value>,
    #[serde(default)]
    pub bcs: Option<String>,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    pub timestamp_ms: Option<u64>,
}

pub type EventPage = Page<SuiEvent, EventID>;

// ============================================================================
// Faucet
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetCoin {
    pub amount: u64,
    pub id: ObjectID,
    pub transfer_tx_digest: String,
}

/// Faucet reply. `error` is set when the request was refused.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    #[serde(default)]
    pub transferred_gas_objects: Vec<FaucetCoin>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_deserialize() {
        let balance: Balance = serde_json::from_value(json!({
            "coinType": SUI_COIN_TYPE,
            "coinObjectCount": 75,
            "totalBalance": "123000000000",
            "lockedBalance": {}
        }))
        .unwrap();
        assert_eq!(balance.coin_object_count, 75);
        assert_eq!(balance.total_balance, 123_000_000_000);
    }

    #[test]
    fn test_coin_page_deserialize() {
        let page: CoinPage = serde_json::from_value(json!({
            "data": [{
                "coinType": SUI_COIN_TYPE,
                "coinObjectId": "0x1a",
                "version": "3",
                "digest": "d1",
                "balance": "1000",
                "previousTransaction": "t1"
            }],
            "nextCursor": "0x1a",
            "hasNextPage": true
        }))
        .unwrap();
        assert_eq!(page.data[0].balance, 1000);
        assert_eq!(page.data[0].version, 3);
        assert_eq!(page.next_cursor.as_deref(), Some("0x1a"));
        assert!(page.has_next_page);
    }

    #[test]
    fn test_objects_page_missing_cursor() {
        let page: ObjectsPage = serde_json::from_value(json!({
            "data": [{"data": {"objectId": "0x2", "version": "1", "digest": "x", "type": "0x2::coin::Coin"}}],
            "nextCursor": null,
            "hasNextPage": false
        }))
        .unwrap();
        assert!(page.next_cursor.is_none());
        let data = page.data[0].data.as_ref().unwrap();
        assert_eq!(data.object_type.as_deref(), Some("0x2::coin::Coin"));
    }

    #[test]
    fn test_transaction_response_status() {
        let resp: TransactionBlockResponse = serde_json::from_value(json!({
            "digest": "D",
            "effects": {"status": {"status": "success"}},
            "timestampMs": "1700000000000",
            "confirmedLocalExecution": true
        }))
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.timestamp_ms, Some(1_700_000_000_000));
        assert!(resp.errors.is_empty());

        let failed: TransactionBlockResponse = serde_json::from_value(json!({
            "digest": "E",
            "effects": {"status": {"status": "failure", "error": "InsufficientGas"}}
        }))
        .unwrap();
        assert!(!failed.is_success());
    }

    #[test]
    fn test_faucet_response() {
        let resp: FaucetResponse = serde_json::from_value(json!({
            "transferredGasObjects": [{"amount": 1000, "id": "0x9", "transferTxDigest": "T"}],
            "error": null
        }))
        .unwrap();
        assert_eq!(resp.transferred_gas_objects.len(), 1);
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_event_page() {
        let page: EventPage = serde_json::from_value(json!({
            "data": [{
                "id": {"txDigest": "T", "eventSeq": "0"},
                "packageId": "0x2",
                "transactionModule": "coin",
                "sender": "0x5",
                "type": "0x2::coin::Mint",
                "parsedJson": {"amount": "1"}
            }],
            "nextCursor": {"txDigest": "T", "eventSeq": "0"},
            "hasNextPage": false
        }))
        .unwrap();
        assert_eq!(page.data[0].event_type, "0x2::coin::Mint");
        assert_eq!(page.next_cursor.unwrap().event_seq, 0);
    }

    #[test]
    fn test_event_page_without_cursor() {
        let page: EventPage = serde_json::from_value(json!({
            "data": [],
            "hasNextPage": false
        }))
        .unwrap();
        assert!(page.data.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_query_events_output_decodes() {
        use crate::builders::{Builder, QueryEvents};

        fn decode<B: Builder>(value: Value) -> B::Output {
            serde_json::from_value(value).unwrap()
        }

        let page = decode::<QueryEvents>(json!({"data": [], "nextCursor": null, "hasNextPage": false}));
        assert!(page.next_cursor.is_none());
    }
}
