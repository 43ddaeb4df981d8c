//! Signer trait, keyring and the signing adapter.
//!
//! A [`Signer`] knows the address it signs for and signs transaction bytes
//! with the transaction intent. The [`Keyring`] maps addresses to signers
//! and is how the client resolves the authority of a transaction.
//!
//! # Example
//!
//! ```rust
//! use sui_kit::{KeyPair, Keyring, TxBytes, sign_transaction};
//!
//! let alice = KeyPair::generate_ed25519();
//! let mut keyring = Keyring::new();
//! let address = keyring.add(alice);
//!
//! let signer = keyring.get(&address).unwrap();
//! let tx = TxBytes::from_bytes(b"unsigned transaction");
//! let signatures = sign_transaction(&tx, &[signer.as_ref()]).unwrap();
//! assert_eq!(signatures.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
#[cfg(feature = "file-keystore")]
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, KeyStoreError, SignerError};
use crate::types::{KeyPair, MultiSig, PublicKey, Signature, SuiAddress, TxBytes};

// ============================================================================
// Signer Trait
// ============================================================================

/// Trait for signing transactions.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use sui_kit::{Signer, SignerError, PublicKey, Signature, SuiAddress};
///
/// struct HsmSigner { /* ... */ }
///
/// impl Signer for HsmSigner {
///     fn address(&self) -> SuiAddress { /* ... */ }
///     fn public_key(&self) -> PublicKey { /* ... */ }
///     fn sign(&self, tx_bytes: &[u8]) -> Result<Signature, SignerError> {
///         // delegate to the device
///     }
/// }
/// ```
pub trait Signer: Send + Sync {
    /// The address this signer signs for.
    fn address(&self) -> SuiAddress;

    fn public_key(&self) -> PublicKey;

    /// Sign raw transaction bytes, returning the serialized Sui signature.
    fn sign(&self, tx_bytes: &[u8]) -> Result<Signature, SignerError>;
}

impl Signer for KeyPair {
    fn address(&self) -> SuiAddress {
        KeyPair::address(self)
    }

    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self).clone()
    }

    fn sign(&self, tx_bytes: &[u8]) -> Result<Signature, SignerError> {
        Ok(self.sign_transaction(tx_bytes))
    }
}

impl Signer for Arc<dyn Signer> {
    fn address(&self) -> SuiAddress {
        (**self).address()
    }

    fn public_key(&self) -> PublicKey {
        (**self).public_key()
    }

    fn sign(&self, tx_bytes: &[u8]) -> Result<Signature, SignerError> {
        (**self).sign(tx_bytes)
    }
}

// ============================================================================
// SignatureSet
// ============================================================================

/// Ordered signatures for one transaction. Order is significant: the
/// authority comes first, then additional signers in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignatureSet(Vec<Signature>);

impl SignatureSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, signature: Signature) {
        self.0.push(signature);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Signature] {
        &self.0
    }
}

impl From<SignatureSet> for Vec<Signature> {
    fn from(set: SignatureSet) -> Self {
        set.0
    }
}

impl FromIterator<Signature> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = Signature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SignatureSet {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Signing adapter
// ============================================================================

/// Sign `tx_bytes` with every signer, preserving order.
pub fn sign_transaction(
    tx_bytes: &TxBytes,
    signers: &[&dyn Signer],
) -> Result<SignatureSet, SignerError> {
    let raw = tx_bytes.decode()?;
    signers.iter().map(|signer| signer.sign(&raw)).collect()
}

/// Produce the multisig signature for `pub_keys`, followed by one signature
/// per additional signer in order.
pub fn sign_multisig(
    tx_bytes: &TxBytes,
    multisig: &MultiSig,
    pub_keys: &[PublicKey],
    signers: &[&dyn Signer],
) -> Result<SignatureSet, SignerError> {
    let raw = tx_bytes.decode()?;
    let mut set = SignatureSet::new();
    set.push(multisig.sign(&raw, pub_keys)?);
    for signer in signers {
        set.push(signer.sign(&raw)?);
    }
    Ok(set)
}

// ============================================================================
// Keyring
// ============================================================================

/// Address-indexed collection of signers.
#[derive(Clone, Default)]
pub struct Keyring {
    signers: BTreeMap<SuiAddress, Arc<dyn Signer>>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key pair, returning the address it signs for.
    pub fn add(&mut self, keypair: KeyPair) -> SuiAddress {
        self.add_signer(keypair)
    }

    /// Add any signer, replacing an existing entry for the same address.
    pub fn add_signer(&mut self, signer: impl Signer + 'static) -> SuiAddress {
        let address = signer.address();
        self.signers.insert(address, Arc::new(signer));
        address
    }

    /// Look up the signer for `address`.
    pub fn get(&self, address: &SuiAddress) -> Result<Arc<dyn Signer>, Error> {
        self.signers
            .get(address)
            .cloned()
            .ok_or(Error::UnknownAddress(*address))
    }

    pub fn contains(&self, address: &SuiAddress) -> bool {
        self.signers.contains_key(address)
    }

    /// Addresses in ascending order.
    pub fn addresses(&self) -> Vec<SuiAddress> {
        self.signers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Load a keystore file in the Sui CLI format: a JSON array of
    /// base64 `flag || secret` strings.
    pub fn from_keystore_file(path: impl AsRef<Path>) -> Result<Self, KeyStoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_keystore_json(&content)
    }

    /// Parse keystore JSON.
    pub fn from_keystore_json(content: &str) -> Result<Self, KeyStoreError> {
        let encoded: Vec<String> = serde_json::from_str(content)?;
        let mut keyring = Self::new();
        for key in encoded {
            keyring.add(key.parse()?);
        }
        tracing::debug!(keys = keyring.len(), "loaded keystore");
        Ok(keyring)
    }

    /// `~/.sui/sui_config/sui.keystore`.
    #[cfg(feature = "file-keystore")]
    pub fn default_keystore_path() -> Result<PathBuf, KeyStoreError> {
        let home = dirs::home_dir().ok_or_else(|| {
            KeyStoreError::PathError("Could not determine home directory".to_string())
        })?;
        Ok(home.join(".sui").join("sui_config").join("sui.keystore"))
    }

    /// Load the Sui CLI's default keystore.
    #[cfg(feature = "file-keystore")]
    pub fn from_default_keystore() -> Result<Self, KeyStoreError> {
        Self::from_keystore_file(Self::default_keystore_path()?)
    }

    /// Write the key pairs to `path` in keystore format.
    pub fn write_keystore(path: impl AsRef<Path>, keypairs: &[KeyPair]) -> Result<(), KeyStoreError> {
        let encoded: Vec<String> = keypairs.iter().map(KeyPair::to_keystore_string).collect();
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(&encoded)?)?;
        Ok(())
    }
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("addresses", &self.addresses())
            .finish()
    }
}
