//! Convenience operations.
//!
//! Address arguments default to the configured active address.

use serde_json::{Value, json};

use super::pagination::PageStop;
use super::sui::SuiClient;
use crate::builders::{
    GetCoinTypeBalance, GetCoins, GetMultipleObjects, GetObject, GetObjectsOwnedByAddress,
    GetPackage, GetPastObject, MergeCoin, MoveCall, Pay, PayAllSui, PaySui, Publish, QueryEvents,
    SplitCoin, SplitCoinEqually, TransferObject, TransferSui, default_headers,
};
use crate::error::{Error, RpcError};
use crate::result::SuiRpcResult;
use crate::types::{
    CoinPage, EventID, EventPage, FaucetResponse, NormalizedPackage, ObjectID, ObjectRead,
    ObjectsPage, SUI_COIN_TYPE, SuiAddress, SuiObjectResponse, TransactionBlockResponse,
};

// ============================================================================
// Queries
// ============================================================================

impl SuiClient {
    /// SUI coins owned by `address`.
    ///
    /// See [`get_coin`](Self::get_coin).
    pub fn get_gas(&self, address: Option<SuiAddress>, fetch_all: bool) -> SuiRpcResult<CoinPage> {
        self.get_coin(SUI_COIN_TYPE, address, fetch_all)
    }

    /// Coins of `coin_type` owned by `address`.
    ///
    /// The balance endpoint is asked for the coin count first. Pages are
    /// followed only when `fetch_all` is set and the count exceeds the
    /// configured page size; otherwise one page is returned.
    pub fn get_coin(
        &self,
        coin_type: &str,
        address: Option<SuiAddress>,
        fetch_all: bool,
    ) -> SuiRpcResult<CoinPage> {
        self.scoped(|| {
            let run = || -> Result<CoinPage, Error> {
                let owner = self.resolve_address(address)?;
                let balance = self.submit(&GetCoinTypeBalance::new(owner, coin_type))?;
                let builder = GetCoins::new(owner).coin_type(coin_type);
                if fetch_all && balance.coin_object_count > self.config().max_page_size() {
                    self.collect_pages(builder, PageStop::CursorOnly, true)
                } else {
                    self.submit(&builder)
                }
            };
            run().into()
        })
    }

    /// Ask the faucet to send gas coins to `address`.
    ///
    /// A reply carrying an `error` member is a protocol failure.
    pub fn get_gas_from_faucet(&self, address: Option<SuiAddress>) -> SuiRpcResult<FaucetResponse> {
        self.scoped(|| {
            let run = || -> Result<FaucetResponse, Error> {
                let recipient = self.resolve_address(address)?;
                let url = self.config().faucet_url().ok_or(Error::NoFaucet)?;
                let body = json!({"FixedAmountRequest": {"recipient": recipient}});

                tracing::debug!(%recipient, url, "requesting gas from faucet");
                let raw = self.rpc().post(url, &default_headers(), &body)?;
                let response: FaucetResponse = serde_json::from_value(raw)?;
                if let Some(message) = response.error {
                    tracing::warn!(%recipient, %message, "faucet refused request");
                    return Err(RpcError::Protocol {
                        code: 0,
                        message,
                        data: None,
                    }
                    .into());
                }
                Ok(response)
            };
            run().into()
        })
    }

    /// The current object, or a past `version` of it.
    pub fn get_object(&self, object_id: ObjectID, version: Option<u64>) -> SuiRpcResult<ObjectRead> {
        self.scoped(|| {
            let read = match version {
                Some(version) => self
                    .submit(&GetPastObject::new(object_id, version))
                    .map(ObjectRead::Past),
                None => self.submit(&GetObject::new(object_id)).map(ObjectRead::Current),
            };
            read.into()
        })
    }

    /// Objects owned by `address`, following pages when `fetch_all` is set.
    pub fn get_objects(
        &self,
        address: Option<SuiAddress>,
        fetch_all: bool,
    ) -> SuiRpcResult<ObjectsPage> {
        self.scoped(|| {
            let run = || -> Result<ObjectsPage, Error> {
                let owner = self.resolve_address(address)?;
                self.collect_pages(
                    GetObjectsOwnedByAddress::new(owner),
                    PageStop::CursorOrFlag,
                    fetch_all,
                )
            };
            run().into()
        })
    }

    /// Several objects by id, in `max_page_size` chunks.
    ///
    /// An empty list makes no request.
    pub fn get_objects_for(&self, object_ids: &[ObjectID]) -> SuiRpcResult<Vec<SuiObjectResponse>> {
        self.scoped(|| {
            let run = || -> Result<Vec<SuiObjectResponse>, Error> {
                let mut objects = Vec::with_capacity(object_ids.len());
                for chunk in object_ids.chunks(self.config().max_page_size()) {
                    objects.extend(self.submit(&GetMultipleObjects::new(chunk.to_vec()))?);
                }
                Ok(objects)
            };
            run().into()
        })
    }

    /// Normalized Move modules of a package.
    pub fn get_package(&self, package: ObjectID) -> SuiRpcResult<NormalizedPackage> {
        self.scoped(|| self.submit(&GetPackage::new(package)).into())
    }

    /// One page of events matching `query`.
    pub fn get_events(
        &self,
        query: Value,
        cursor: Option<EventID>,
        limit: Option<usize>,
        descending_order: bool,
    ) -> SuiRpcResult<EventPage> {
        let mut builder = QueryEvents::new(query).descending_order(descending_order);
        builder.cursor = cursor;
        builder.limit = limit;
        self.scoped(|| self.submit(&builder).into())
    }
}

// ============================================================================
// Transactions
// ============================================================================

impl SuiClient {
    pub fn pay(&self, pay: Pay) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&pay)
    }

    pub fn pay_sui(&self, pay: PaySui) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&pay)
    }

    pub fn pay_all_sui(&self, pay: PayAllSui) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&pay)
    }

    /// Transfer a SUI coin, or part of it.
    pub fn transfer_sui(&self, transfer: TransferSui) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&transfer)
    }

    pub fn transfer_object(
        &self,
        transfer: TransferObject,
    ) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&transfer)
    }

    pub fn merge_coin(&self, merge: MergeCoin) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&merge)
    }

    pub fn split_coin(&self, split: SplitCoin) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&split)
    }

    pub fn split_coin_equally(
        &self,
        split: SplitCoinEqually,
    ) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&split)
    }

    pub fn move_call(&self, call: MoveCall) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&call)
    }

    /// Publish compiled Move modules.
    pub fn publish_package(&self, publish: Publish) -> SuiRpcResult<TransactionBlockResponse> {
        self.execute(&publish)
    }
}
