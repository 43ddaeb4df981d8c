//! Core types for the Sui JSON-RPC API.
//!
//! Addresses, keys and signatures are hand-rolled around the encodings the
//! Sui CLI and full nodes use; RPC payloads keep untyped tails as JSON.

mod address;
mod crypto;
mod multisig;
mod network;
mod rpc;
mod transaction;

pub use address::{ADDRESS_LENGTH, ObjectID, SuiAddress};
pub use crypto::{
    DEFAULT_ED25519_HD_PATH, KeyPair, PublicKey, Signature, SignatureScheme, TRANSACTION_INTENT,
    transaction_digest,
};
pub use multisig::{MAX_SIGNER_IN_MULTISIG, MultiSig, MultiSigPublicKey};
pub use network::Network;
pub use rpc::{
    Balance, Coin, CoinPage, DryRunResponse, EventID, EventPage, FaucetCoin, FaucetResponse,
    NormalizedPackage, ObjectRead, ObjectsPage, Page, PastObjectResponse, SUI_COIN_TYPE, SuiEvent,
    SuiObjectData, SuiObjectResponse, TransactionBlockResponse,
};
pub use transaction::{ExecuteRequestType, ObjectRef, PreExecutionResult, TransactionBytes, TxBytes};
