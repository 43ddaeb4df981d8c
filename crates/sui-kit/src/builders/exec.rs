//! Transaction builders and the execution requests that submit them.
//!
//! The `unsafe_*` methods ask the node to assemble transaction data and
//! return it unsigned. Each of those builders names its signer as
//! [`authority`](Builder::authority); the client signs the returned bytes and
//! submits them with [`ExecuteTransaction`].

use serde::Serialize;
use serde_json::{Value, json};

use super::{Builder, big_int, to_param};
use crate::error::Error;
use crate::types::{
    DryRunResponse, ExecuteRequestType, ObjectID, Signature, SuiAddress,
    TransactionBlockResponse, TxBytes,
};

macro_rules! transaction_builder {
    ($name:ident, $method:literal, $authority:ident) => {
        impl Builder for $name {
            type Output = TransactionBlockResponse;

            fn method(&self) -> &'static str {
                $method
            }

            fn params(&self) -> Result<Vec<Value>, Error> {
                self.tx_params()
            }

            fn requires_signing(&self) -> bool {
                true
            }

            fn authority(&self) -> Option<SuiAddress> {
                Some(self.$authority)
            }
        }
    };
}

fn invalid(message: &str) -> Error {
    Error::InvalidBuilder(message.to_string())
}

fn check_budget(gas_budget: u64) -> Result<(), Error> {
    if gas_budget == 0 {
        return Err(invalid("gas_budget must be positive"));
    }
    Ok(())
}

fn amounts_param(amounts: &[u64]) -> Value {
    Value::Array(amounts.iter().copied().map(big_int).collect())
}

// ============================================================================
// Payments
// ============================================================================

/// `unsafe_pay`: pay each recipient its amount from `Coin<T>` inputs.
#[derive(Debug, Clone)]
pub struct Pay {
    pub signer: SuiAddress,
    pub input_coins: Vec<ObjectID>,
    pub recipients: Vec<SuiAddress>,
    pub amounts: Vec<u64>,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl Pay {
    pub fn new(
        signer: SuiAddress,
        input_coins: Vec<ObjectID>,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            input_coins,
            recipients,
            amounts,
            gas: None,
            gas_budget,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_payees(&self.input_coins, &self.recipients, &self.amounts)?;
        check_budget(self.gas_budget)?;
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.input_coins)?,
            to_param(&self.recipients)?,
            amounts_param(&self.amounts),
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

fn check_payees(
    input_coins: &[ObjectID],
    recipients: &[SuiAddress],
    amounts: &[u64],
) -> Result<(), Error> {
    if input_coins.is_empty() {
        return Err(invalid("input_coins must not be empty"));
    }
    if recipients.is_empty() {
        return Err(invalid("recipients must not be empty"));
    }
    if recipients.len() != amounts.len() {
        return Err(Error::InvalidBuilder(format!(
            "{} recipients but {} amounts",
            recipients.len(),
            amounts.len()
        )));
    }
    Ok(())
}

transaction_builder!(Pay, "unsafe_pay", signer);

/// `unsafe_paySui`: like [`Pay`] but the first SUI input also pays for gas.
#[derive(Debug, Clone)]
pub struct PaySui {
    pub signer: SuiAddress,
    pub input_coins: Vec<ObjectID>,
    pub recipients: Vec<SuiAddress>,
    pub amounts: Vec<u64>,
    pub gas_budget: u64,
}

impl PaySui {
    pub fn new(
        signer: SuiAddress,
        input_coins: Vec<ObjectID>,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            input_coins,
            recipients,
            amounts,
            gas_budget,
        }
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_payees(&self.input_coins, &self.recipients, &self.amounts)?;
        check_budget(self.gas_budget)?;
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.input_coins)?,
            to_param(&self.recipients)?,
            amounts_param(&self.amounts),
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(PaySui, "unsafe_paySui", signer);

/// `unsafe_payAllSui`: send every input SUI coin, minus gas, to one recipient.
#[derive(Debug, Clone)]
pub struct PayAllSui {
    pub signer: SuiAddress,
    pub input_coins: Vec<ObjectID>,
    pub recipient: SuiAddress,
    pub gas_budget: u64,
}

impl PayAllSui {
    pub fn new(
        signer: SuiAddress,
        input_coins: Vec<ObjectID>,
        recipient: SuiAddress,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            input_coins,
            recipient,
            gas_budget,
        }
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        if self.input_coins.is_empty() {
            return Err(invalid("input_coins must not be empty"));
        }
        check_budget(self.gas_budget)?;
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.input_coins)?,
            to_param(&self.recipient)?,
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(PayAllSui, "unsafe_payAllSui", signer);

// ============================================================================
// Transfers
// ============================================================================

/// `unsafe_transferSui`: transfer a SUI coin, or `amount` split from it.
#[derive(Debug, Clone)]
pub struct TransferSui {
    pub signer: SuiAddress,
    pub sui_object_id: ObjectID,
    pub gas_budget: u64,
    pub recipient: SuiAddress,
    pub amount: Option<u64>,
}

impl TransferSui {
    pub fn new(
        signer: SuiAddress,
        sui_object_id: ObjectID,
        recipient: SuiAddress,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            sui_object_id,
            gas_budget,
            recipient,
            amount: None,
        }
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.sui_object_id)?,
            big_int(self.gas_budget),
            to_param(&self.recipient)?,
            self.amount.map(big_int).unwrap_or(Value::Null),
        ])
    }
}

transaction_builder!(TransferSui, "unsafe_transferSui", signer);

/// `unsafe_transferObject`.
#[derive(Debug, Clone)]
pub struct TransferObject {
    pub signer: SuiAddress,
    pub object_id: ObjectID,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
    pub recipient: SuiAddress,
}

impl TransferObject {
    pub fn new(
        signer: SuiAddress,
        object_id: ObjectID,
        recipient: SuiAddress,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            object_id,
            gas: None,
            gas_budget,
            recipient,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if self.gas == Some(self.object_id) {
            return Err(invalid("gas coin cannot be the transferred object"));
        }
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.object_id)?,
            to_param(&self.gas)?,
            big_int(self.gas_budget),
            to_param(&self.recipient)?,
        ])
    }
}

transaction_builder!(TransferObject, "unsafe_transferObject", signer);

// ============================================================================
// Coin management
// ============================================================================

/// `unsafe_mergeCoins`: merge `coin_to_merge` into `primary_coin`.
#[derive(Debug, Clone)]
pub struct MergeCoin {
    pub signer: SuiAddress,
    pub primary_coin: ObjectID,
    pub coin_to_merge: ObjectID,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl MergeCoin {
    pub fn new(
        signer: SuiAddress,
        primary_coin: ObjectID,
        coin_to_merge: ObjectID,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            primary_coin,
            coin_to_merge,
            gas: None,
            gas_budget,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if self.primary_coin == self.coin_to_merge {
            return Err(invalid("cannot merge a coin into itself"));
        }
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.primary_coin)?,
            to_param(&self.coin_to_merge)?,
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(MergeCoin, "unsafe_mergeCoins", signer);

/// `unsafe_splitCoin`: split off one new coin per amount.
#[derive(Debug, Clone)]
pub struct SplitCoin {
    pub signer: SuiAddress,
    pub coin_object_id: ObjectID,
    pub split_amounts: Vec<u64>,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl SplitCoin {
    pub fn new(
        signer: SuiAddress,
        coin_object_id: ObjectID,
        split_amounts: Vec<u64>,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            coin_object_id,
            split_amounts,
            gas: None,
            gas_budget,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if self.split_amounts.is_empty() {
            return Err(invalid("split_amounts must not be empty"));
        }
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.coin_object_id)?,
            amounts_param(&self.split_amounts),
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(SplitCoin, "unsafe_splitCoin", signer);

/// `unsafe_splitCoinEqual`: split a coin into `split_count` equal parts.
#[derive(Debug, Clone)]
pub struct SplitCoinEqually {
    pub signer: SuiAddress,
    pub coin_object_id: ObjectID,
    pub split_count: u64,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl SplitCoinEqually {
    pub fn new(
        signer: SuiAddress,
        coin_object_id: ObjectID,
        split_count: u64,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            coin_object_id,
            split_count,
            gas: None,
            gas_budget,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if self.split_count == 0 {
            return Err(invalid("split_count must be positive"));
        }
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.coin_object_id)?,
            big_int(self.split_count),
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(SplitCoinEqually, "unsafe_splitCoinEqual", signer);

// ============================================================================
// Move
// ============================================================================

/// `unsafe_moveCall`: call a Move entry function.
#[derive(Debug, Clone)]
pub struct MoveCall {
    pub signer: SuiAddress,
    pub package_object_id: ObjectID,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl MoveCall {
    pub fn new(
        signer: SuiAddress,
        package_object_id: ObjectID,
        module: impl Into<String>,
        function: impl Into<String>,
        arguments: Vec<Value>,
        gas_budget: u64,
    ) -> Self {
        Self {
            signer,
            package_object_id,
            module: module.into(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments,
            gas: None,
            gas_budget,
        }
    }

    pub fn type_arguments(mut self, type_arguments: Vec<String>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if !is_identifier(&self.module) {
            return Err(Error::InvalidBuilder(format!(
                "invalid module name '{}'",
                self.module
            )));
        }
        if !is_identifier(&self.function) {
            return Err(Error::InvalidBuilder(format!(
                "invalid function name '{}'",
                self.function
            )));
        }
        Ok(vec![
            to_param(&self.signer)?,
            to_param(&self.package_object_id)?,
            json!(self.module),
            json!(self.function),
            json!(self.type_arguments),
            Value::Array(self.arguments.clone()),
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

/// Move identifiers: ASCII letter or underscore first, then alphanumerics or underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

transaction_builder!(MoveCall, "unsafe_moveCall", signer);

/// `unsafe_publish`: publish compiled Move modules (base64 bytecode).
#[derive(Debug, Clone)]
pub struct Publish {
    pub sender: SuiAddress,
    pub compiled_modules: Vec<String>,
    pub dependencies: Vec<ObjectID>,
    pub gas: Option<ObjectID>,
    pub gas_budget: u64,
}

impl Publish {
    pub fn new(
        sender: SuiAddress,
        compiled_modules: Vec<String>,
        dependencies: Vec<ObjectID>,
        gas_budget: u64,
    ) -> Self {
        Self {
            sender,
            compiled_modules,
            dependencies,
            gas: None,
            gas_budget,
        }
    }

    pub fn gas(mut self, gas: ObjectID) -> Self {
        self.gas = Some(gas);
        self
    }

    fn tx_params(&self) -> Result<Vec<Value>, Error> {
        check_budget(self.gas_budget)?;
        if self.compiled_modules.is_empty() {
            return Err(invalid("compiled_modules must not be empty"));
        }
        Ok(vec![
            to_param(&self.sender)?,
            json!(self.compiled_modules),
            to_param(&self.dependencies)?,
            to_param(&self.gas)?,
            big_int(self.gas_budget),
        ])
    }
}

transaction_builder!(Publish, "unsafe_publish", sender);

// ============================================================================
// Execution
// ============================================================================

/// What `sui_executeTransactionBlock` includes in its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponseOptions {
    pub show_input: bool,
    pub show_raw_input: bool,
    pub show_effects: bool,
    pub show_events: bool,
    pub show_object_changes: bool,
    pub show_balance_changes: bool,
}

impl Default for TransactionBlockResponseOptions {
    fn default() -> Self {
        Self {
            show_input: true,
            show_raw_input: false,
            show_effects: true,
            show_events: true,
            show_object_changes: true,
            show_balance_changes: true,
        }
    }
}

/// `sui_executeTransactionBlock`: submit signed transaction bytes.
#[derive(Debug, Clone)]
pub struct ExecuteTransaction {
    pub tx_bytes: TxBytes,
    pub signatures: Vec<Signature>,
    pub request_type: ExecuteRequestType,
    pub options: TransactionBlockResponseOptions,
}

impl ExecuteTransaction {
    pub fn new(
        tx_bytes: TxBytes,
        signatures: impl Into<Vec<Signature>>,
        request_type: ExecuteRequestType,
    ) -> Self {
        Self {
            tx_bytes,
            signatures: signatures.into(),
            request_type,
            options: TransactionBlockResponseOptions::default(),
        }
    }

    pub fn options(mut self, options: TransactionBlockResponseOptions) -> Self {
        self.options = options;
        self
    }
}

impl Builder for ExecuteTransaction {
    type Output = TransactionBlockResponse;

    fn method(&self) -> &'static str {
        "sui_executeTransactionBlock"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        if self.signatures.is_empty() {
            return Err(invalid("at least one signature is required"));
        }
        Ok(vec![
            to_param(&self.tx_bytes)?,
            to_param(&self.signatures)?,
            to_param(&self.options)?,
            to_param(&self.request_type)?,
        ])
    }
}

/// `sui_dryRunTransactionBlock`: simulate without committing.
#[derive(Debug, Clone)]
pub struct DryRunTransaction {
    pub tx_bytes: TxBytes,
}

impl DryRunTransaction {
    pub fn new(tx_bytes: TxBytes) -> Self {
        Self { tx_bytes }
    }
}

impl Builder for DryRunTransaction {
    type Output = DryRunResponse;

    fn method(&self) -> &'static str {
        "sui_dryRunTransactionBlock"
    }

    fn params(&self) -> Result<Vec<Value>, Error> {
        Ok(vec![to_param(&self.tx_bytes)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyPair;

    fn addr(s: &str) -> SuiAddress {
        s.parse().unwrap()
    }

    fn oid(s: &str) -> ObjectID {
        s.parse().unwrap()
    }

    #[test]
    fn test_pay_params_and_authority() {
        let pay = Pay::new(
            addr("0x1"),
            vec![oid("0xa")],
            vec![addr("0x2"), addr("0x3")],
            vec![10, 20],
            2_000_000,
        );
        assert!(pay.requires_signing());
        assert_eq!(pay.authority(), Some(addr("0x1")));
        assert_eq!(pay.method(), "unsafe_pay");

        let params = pay.params().unwrap();
        assert_eq!(params[3], json!(["10", "20"]));
        assert_eq!(params[4], Value::Null);
        assert_eq!(params[5], json!("2000000"));
    }

    #[test]
    fn test_pay_length_mismatch() {
        let pay = PaySui::new(
            addr("0x1"),
            vec![oid("0xa")],
            vec![addr("0x2"), addr("0x3")],
            vec![10],
            1000,
        );
        let err = pay.params().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid builder parameters: 2 recipients but 1 amounts"
        );
    }

    #[test]
    fn test_zero_gas_budget_rejected() {
        let t = TransferSui::new(addr("0x1"), oid("0xa"), addr("0x2"), 0);
        assert!(matches!(t.params(), Err(Error::InvalidBuilder(_))));
    }

    #[test]
    fn test_transfer_sui_optional_amount() {
        let t = TransferSui::new(addr("0x1"), oid("0xa"), addr("0x2"), 100);
        assert_eq!(t.params().unwrap()[4], Value::Null);
        assert_eq!(t.amount(5).params().unwrap()[4], json!("5"));
    }

    #[test]
    fn test_merge_into_self_rejected() {
        let m = MergeCoin::new(addr("0x1"), oid("0xa"), oid("0xa"), 100);
        assert!(m.params().is_err());
    }

    #[test]
    fn test_move_call_identifiers() {
        let ok = MoveCall::new(addr("0x1"), oid("0x2"), "coin", "split_vec", vec![], 100)
            .type_arguments(vec!["0x2::sui::SUI".to_string()]);
        let params = ok.params().unwrap();
        assert_eq!(params[2], json!("coin"));
        assert_eq!(params[4], json!(["0x2::sui::SUI"]));

        let bad = MoveCall::new(addr("0x1"), oid("0x2"), "1coin", "f", vec![], 100);
        assert!(bad.params().is_err());
        assert!(!is_identifier("_"));
        assert!(is_identifier("_x"));
    }

    #[test]
    fn test_publish_authority_is_sender() {
        let p = Publish::new(addr("0x9"), vec!["AAA=".to_string()], vec![oid("0x2")], 100);
        assert_eq!(p.authority(), Some(addr("0x9")));
        assert!(Publish::new(addr("0x9"), vec![], vec![], 100).params().is_err());
    }

    #[test]
    fn test_execute_transaction_params() {
        let kp = KeyPair::ed25519_from_bytes([4u8; 32]);
        let tx = TxBytes::from_bytes(b"tx");
        let sig = kp.sign_transaction(b"tx");
        let exec = ExecuteTransaction::new(
            tx.clone(),
            vec![sig.clone()],
            ExecuteRequestType::WaitForEffectsCert,
        );
        assert!(!exec.requires_signing());
        let params = exec.params().unwrap();
        assert_eq!(params[0], json!(tx.as_str()));
        assert_eq!(params[1], json!([sig.to_base64()]));
        assert_eq!(params[2]["showEffects"], json!(true));
        assert_eq!(params[3], json!("WaitForEffectsCert"));

        let empty = ExecuteTransaction::new(tx, Vec::<Signature>::new(), ExecuteRequestType::default());
        assert!(empty.params().is_err());
    }

    #[test]
    fn test_dry_run_params() {
        let dry = DryRunTransaction::new(TxBytes::new("AAEC"));
        assert_eq!(dry.method(), "sui_dryRunTransactionBlock");
        assert_eq!(dry.params().unwrap(), vec![json!("AAEC")]);
    }
}
