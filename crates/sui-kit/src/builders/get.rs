//! Read-only query builders.

use serde::Serialize;
use serde_json::{Value, json};

use super::{Builder, Cursored, to_param};
use crate::error::Error;
use crate::types::{
    Balance, CoinPage, EventID, EventPage, NormalizedPackage, ObjectID, ObjectsPage,
    PastObjectResponse, SUI_COIN_TYPE, SuiAddress, SuiObjectResponse,
};

/// Which parts of an object a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    pub show_type: bool,
    pub show_owner: bool,
    pub show_previous_transaction: bool,
    pub show_display: bool,
    pub show_content: bool,
    pub show_bcs: bool,
    pub show_storage_rebate: bool,
}

impl Default for ObjectDataOptions {
    fn default() -> Self {
        Self {
            show_type: true,
            show_owner: true,
            show_previous_transaction: true,
            show_display: false,
            show_content: true,
            show_bcs: false,
            show_storage_rebate: true,
        }
    }
}

// ============================================================================
// Coins
// ============================================================================

/// `suix_getBalance`: total balance and coin count of one coin type.
#[derive(Debug, Clone)]
pub struct GetCoinTypeBalance {
    pub owner: SuiAddress,
    pub coin_type: String,
}

impl GetCoinTypeBalance {
    pub fn new(owner: SuiAddress, coin_type: impl Into<String>) -> Self {
        Self {
            owner,
            coin_type: coin_type.into(),
        }
    }
}

impl Builder for GetCoinTypeBalance {
    type Output = Balance;

    fn method(&self) -> &'static str {
        "suix_getBalance"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        Ok(vec![to_param(&self.owner)?, json!(self.coin_type)])
    }
}

/// `suix_getCoins`: one page of coins of a type owned by an address.
#[derive(Debug, Clone)]
pub struct GetCoins {
    pub owner: SuiAddress,
    pub coin_type: String,
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

impl GetCoins {
    /// Coins of type SUI owned by `owner`.
    pub fn new(owner: SuiAddress) -> Self {
        Self {
            owner,
            coin_type: SUI_COIN_TYPE.to_string(),
            cursor: None,
            limit: None,
        }
    }

    pub fn coin_type(mut self, coin_type: impl Into<String>) -> Self {
        self.coin_type = coin_type.into();
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Builder for GetCoins {
    type Output = CoinPage;

    fn method(&self) -> &'static str {
        "suix_getCoins"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        if self.coin_type.is_empty() {
            return Err(Error::InvalidBuilder("coin_type must not be empty".to_string()));
        }
        Ok(vec![
            to_param(&self.owner)?,
            json!(self.coin_type),
            json!(self.cursor),
            json!(self.limit),
        ])
    }
}

impl Cursored for GetCoins {
    type Cursor = String;

    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }
}

// ============================================================================
// Objects
// ============================================================================

/// `sui_getObject`: the current version of an object.
#[derive(Debug, Clone)]
pub struct GetObject {
    pub object_id: ObjectID,
    pub options: ObjectDataOptions,
}

impl GetObject {
    pub fn new(object_id: ObjectID) -> Self {
        Self {
            object_id,
            options: ObjectDataOptions::default(),
        }
    }

    pub fn options(mut self, options: ObjectDataOptions) -> Self {
        self.options = options;
        self
    }
}

impl Builder for GetObject {
    type Output = SuiObjectResponse;

    fn method(&self) -> &'static str {
        "sui_getObject"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        Ok(vec![to_param(&self.object_id)?, to_param(&self.options)?])
    }
}

/// `sui_tryGetPastObject`: a specific historical version of an object.
#[derive(Debug, Clone)]
pub struct GetPastObject {
    pub object_id: ObjectID,
    pub version: u64,
    pub options: ObjectDataOptions,
}

impl GetPastObject {
    pub fn new(object_id: ObjectID, version: u64) -> Self {
        Self {
            object_id,
            version,
            options: ObjectDataOptions::default(),
        }
    }
}

impl Builder for GetPastObject {
    type Output = PastObjectResponse;

    fn method(&self) -> &'static str {
        "sui_tryGetPastObject"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        Ok(vec![
            to_param(&self.object_id)?,
            json!(self.version),
            to_param(&self.options)?,
        ])
    }
}

/// `sui_multiGetObjects`: several objects in one call.
#[derive(Debug, Clone)]
pub struct GetMultipleObjects {
    pub object_ids: Vec<ObjectID>,
    pub options: ObjectDataOptions,
}

impl GetMultipleObjects {
    pub fn new(object_ids: Vec<ObjectID>) -> Self {
        Self {
            object_ids,
            options: ObjectDataOptions::default(),
        }
    }
}

impl Builder for GetMultipleObjects {
    type Output = Vec<SuiObjectResponse>;

    fn method(&self) -> &'static str {
        "sui_multiGetObjects"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        if self.object_ids.is_empty() {
            return Err(Error::InvalidBuilder("object_ids must not be empty".to_string()));
        }
        Ok(vec![to_param(&self.object_ids)?, to_param(&self.options)?])
    }
}

/// `suix_getOwnedObjects`: one page of objects owned by an address.
#[derive(Debug, Clone)]
pub struct GetObjectsOwnedByAddress {
    pub owner: SuiAddress,
    pub filter: Option<Value>,
    pub options: ObjectDataOptions,
    pub cursor: Option<ObjectID>,
    pub limit: Option<usize>,
}

impl GetObjectsOwnedByAddress {
    pub fn new(owner: SuiAddress) -> Self {
        Self {
            owner,
            filter: None,
            options: ObjectDataOptions::default(),
            cursor: None,
            limit: None,
        }
    }

    /// An object filter such as `{"StructType": "0x2::coin::Coin<0x2::sui::SUI>"}`.
    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Builder for GetObjectsOwnedByAddress {
    type Output = ObjectsPage;

    fn method(&self) -> &'static str {
        "suix_getOwnedObjects"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        let options = to_param(&self.options)?;
        let query = json!({
            "filter": self.filter,
            "options": options,
        });
        Ok(vec![
            to_param(&self.owner)?,
            query,
            to_param(&self.cursor)?,
            json!(self.limit),
        ])
    }
}

impl Cursored for GetObjectsOwnedByAddress {
    type Cursor = ObjectID;

    fn set_cursor(&mut self, cursor: Option<ObjectID>) {
        self.cursor = cursor;
    }
}

/// `sui_getNormalizedMoveModulesByPackage`.
#[derive(Debug, Clone)]
pub struct GetPackage {
    pub package: ObjectID,
}

impl GetPackage {
    pub fn new(package: ObjectID) -> Self {
        Self { package }
    }
}

impl Builder for GetPackage {
    type Output = NormalizedPackage;

    fn method(&self) -> &'static str {
        "sui_getNormalizedMoveModulesByPackage"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        Ok(vec![to_param(&self.package)?])
    }
}

// ============================================================================
// Events
// ============================================================================

/// `suix_queryEvents`.
///
/// `query` is an event filter object, e.g. `{"Sender": "0x…"}` or
/// `{"MoveModule": {"package": "0x2", "module": "coin"}}`.
#[derive(Debug, Clone)]
pub struct QueryEvents {
    pub query: Value,
    pub cursor: Option<EventID>,
    pub limit: Option<usize>,
    pub descending_order: bool,
}

impl QueryEvents {
    /// Newest first, provider default page size.
    pub fn new(query: Value) -> Self {
        Self {
            query,
            cursor: None,
            limit: None,
            descending_order: true,
        }
    }

    pub fn cursor(mut self, cursor: EventID) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn descending_order(mut self, descending: bool) -> Self {
        self.descending_order = descending;
        self
    }
}

impl Builder for QueryEvents {
    type Output = EventPage;

    fn method(&self) -> &'static str {
        "suix_queryEvents"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        if !self.query.is_object() {
            return Err(Error::InvalidBuilder(
                "event query must be a JSON object".to_string(),
            ));
        }
        Ok(vec![
            self.query.clone(),
            to_param(&self.cursor)?,
            json!(self.limit),
            json!(self.descending_order),
        ])
    }
}

impl Cursored for QueryEvents {
    type Cursor = EventID;

    fn set_cursor(&mut self, cursor: Option<EventID>) {
        self.cursor = cursor;
    }
}
