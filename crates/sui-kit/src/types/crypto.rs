//! Keys, signatures and the intent digest used to sign Sui transactions.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bip39::Mnemonic;
use blake2::{Blake2b, Digest, digest::consts::U32};
use ed25519_dalek::{Signer as _, Verifier as _};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use slipped10::{BIP32Path, Curve};

use super::address::SuiAddress;
use crate::error::{ParseKeyError, SignerError};

type Blake2b256 = Blake2b<U32>;

/// Default SLIP-10 derivation path for Sui Ed25519 keys (coin type 784).
pub const DEFAULT_ED25519_HD_PATH: &str = "m/44'/784'/0'/0'/0'";

/// Intent prefix for transaction data: scope `TransactionData`, version `V0`, app `Sui`.
pub const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

const SECRET_KEY_LENGTH: usize = 32;

/// Blake2b-256 over the concatenation of `parts`.
pub(crate) fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// The 32-byte digest that signers sign for a transaction.
pub fn transaction_digest(tx_bytes: &[u8]) -> [u8; 32] {
    blake2b256(&[&TRANSACTION_INTENT, tx_bytes])
}

// ============================================================================
// SignatureScheme
// ============================================================================

/// Signature scheme identifier, serialized as the leading flag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureScheme {
    Ed25519 = 0x00,
    Secp256k1 = 0x01,
    MultiSig = 0x03,
}

impl SignatureScheme {
    /// The flag byte.
    pub fn flag(&self) -> u8 {
        *self as u8
    }

    /// Expected public key length in bytes.
    pub fn public_key_len(&self) -> Option<usize> {
        match self {
            SignatureScheme::Ed25519 => Some(32),
            SignatureScheme::Secp256k1 => Some(33),
            SignatureScheme::MultiSig => None,
        }
    }
}

impl TryFrom<u8> for SignatureScheme {
    type Error = ParseKeyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(SignatureScheme::Ed25519),
            0x01 => Ok(SignatureScheme::Secp256k1),
            0x03 => Ok(SignatureScheme::MultiSig),
            other => Err(ParseKeyError::UnknownScheme(other)),
        }
    }
}

// ============================================================================
// PublicKey
// ============================================================================

/// A single-signer public key.
///
/// Encoded as base64 of `flag || key bytes`, the format the Sui CLI prints.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    scheme: SignatureScheme,
    data: Vec<u8>,
}

impl PublicKey {
    /// Create a public key from raw bytes, checking the length for the scheme.
    pub fn from_bytes(scheme: SignatureScheme, data: &[u8]) -> Result<Self, ParseKeyError> {
        let expected = scheme
            .public_key_len()
            .ok_or(ParseKeyError::UnknownScheme(scheme.flag()))?;
        if data.len() != expected {
            return Err(ParseKeyError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            scheme,
            data: data.to_vec(),
        })
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// `flag || key bytes`.
    pub fn flagged_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 1);
        out.push(self.scheme.flag());
        out.extend_from_slice(&self.data);
        out
    }

    /// The address controlled by this key: Blake2b-256(flag || key bytes).
    pub fn to_sui_address(&self) -> SuiAddress {
        SuiAddress::new(blake2b256(&[&self.flagged_bytes()]))
    }

    /// Verify a raw signature over a transaction digest.
    fn verify_digest(&self, digest: &[u8; 32], signature: &[u8]) -> bool {
        match self.scheme {
            SignatureScheme::Ed25519 => {
                let Ok(pk_bytes) = <[u8; 32]>::try_from(self.data.as_slice()) else {
                    return false;
                };
                let Ok(vk) = ed25519_dalek::VerifyingKey::from_bytes(&pk_bytes) else {
                    return false;
                };
                let Ok(sig) = ed25519_dalek::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify(digest, &sig).is_ok()
            }
            SignatureScheme::Secp256k1 => {
                let Ok(vk) = k256::ecdsa::VerifyingKey::from_sec1_bytes(&self.data) else {
                    return false;
                };
                let Ok(sig) = k256::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify(digest, &sig).is_ok()
            }
            SignatureScheme::MultiSig => false,
        }
    }
}

impl FromStr for PublicKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = STANDARD
            .decode(s.trim())
            .map_err(|e| ParseKeyError::InvalidBase64(e.to_string()))?;
        let (flag, data) = raw.split_first().ok_or(ParseKeyError::InvalidLength {
            expected: 33,
            actual: 0,
        })?;
        Self::from_bytes(SignatureScheme::try_from(*flag)?, data)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(self.flagged_bytes()))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({:?}:{})", self.scheme, self)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Signature
// ============================================================================

/// A serialized Sui signature.
///
/// Single-signer signatures are `flag || signature || public key`; multisig
/// signatures are `0x03 || bcs(MultiSig)`. On the wire both are base64.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Assemble a single-signer signature.
    pub fn single(public_key: &PublicKey, signature: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + signature.len() + public_key.as_bytes().len());
        bytes.push(public_key.scheme().flag());
        bytes.extend_from_slice(signature);
        bytes.extend_from_slice(public_key.as_bytes());
        Self { bytes }
    }

    /// Wrap an already serialized multisig body.
    pub(crate) fn multisig(body: Vec<u8>) -> Self {
        let mut bytes = Vec::with_capacity(body.len() + 1);
        bytes.push(SignatureScheme::MultiSig.flag());
        bytes.extend(body);
        Self { bytes }
    }

    /// The scheme flag.
    pub fn scheme(&self) -> Result<SignatureScheme, ParseKeyError> {
        let flag = self.bytes.first().copied().unwrap_or(0xff);
        SignatureScheme::try_from(flag)
    }

    /// Full serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The raw 64-byte signature of a single-signer signature.
    pub fn signature_bytes(&self) -> Option<&[u8]> {
        match self.scheme().ok()? {
            SignatureScheme::Ed25519 | SignatureScheme::Secp256k1 => self.bytes.get(1..65),
            SignatureScheme::MultiSig => None,
        }
    }

    /// The embedded public key of a single-signer signature.
    pub fn public_key(&self) -> Option<PublicKey> {
        let scheme = self.scheme().ok()?;
        let data = self.bytes.get(65..)?;
        PublicKey::from_bytes(scheme, data).ok()
    }

    /// Verify a single-signer signature against transaction bytes.
    pub fn verify(&self, tx_bytes: &[u8]) -> bool {
        let (Some(pk), Some(sig)) = (self.public_key(), self.signature_bytes()) else {
            return false;
        };
        pk.verify_digest(&transaction_digest(tx_bytes), sig)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl FromStr for Signature {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = STANDARD
            .decode(s.trim())
            .map_err(|e| ParseKeyError::InvalidBase64(e.to_string()))?;
        let sig = Self { bytes };
        sig.scheme()?;
        Ok(sig)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_base64())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// KeyPair
// ============================================================================

#[derive(Clone)]
enum KeyMaterial {
    Ed25519(ed25519_dalek::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
}

/// A secret key together with its public key.
///
/// The string form is the Sui keystore encoding: base64 of `flag || secret`.
///
/// # Example
///
/// ```rust
/// use sui_kit::KeyPair;
///
/// let keypair = KeyPair::generate_ed25519();
/// let encoded = keypair.to_keystore_string();
/// let restored: KeyPair = encoded.parse().unwrap();
/// assert_eq!(restored.address(), keypair.address());
/// ```
#[derive(Clone)]
pub struct KeyPair {
    material: KeyMaterial,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a random Ed25519 key pair.
    pub fn generate_ed25519() -> Self {
        Self::from_ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    /// Generate a random Secp256k1 key pair.
    pub fn generate_secp256k1() -> Self {
        Self::from_secp256k1(k256::ecdsa::SigningKey::random(&mut OsRng))
    }

    /// Create an Ed25519 key pair from a raw 32-byte secret.
    pub fn ed25519_from_bytes(bytes: [u8; 32]) -> Self {
        Self::from_ed25519(ed25519_dalek::SigningKey::from_bytes(&bytes))
    }

    /// Create a Secp256k1 key pair from a raw 32-byte secret.
    pub fn secp256k1_from_bytes(bytes: &[u8]) -> Result<Self, ParseKeyError> {
        let key = k256::ecdsa::SigningKey::from_slice(bytes)
            .map_err(|e| ParseKeyError::InvalidKey(e.to_string()))?;
        Ok(Self::from_secp256k1(key))
    }

    fn from_ed25519(key: ed25519_dalek::SigningKey) -> Self {
        let public_key = PublicKey {
            scheme: SignatureScheme::Ed25519,
            data: key.verifying_key().to_bytes().to_vec(),
        };
        Self {
            material: KeyMaterial::Ed25519(key),
            public_key,
        }
    }

    fn from_secp256k1(key: k256::ecdsa::SigningKey) -> Self {
        let public_key = PublicKey {
            scheme: SignatureScheme::Secp256k1,
            data: key.verifying_key().to_encoded_point(true).as_bytes().to_vec(),
        };
        Self {
            material: KeyMaterial::Secp256k1(key),
            public_key,
        }
    }

    /// Derive an Ed25519 key pair from a BIP-39 seed phrase using the default
    /// Sui path (`m/44'/784'/0'/0'/0'`).
    pub fn from_seed_phrase(phrase: impl AsRef<str>) -> Result<Self, SignerError> {
        Self::from_seed_phrase_with_path(phrase, DEFAULT_ED25519_HD_PATH)
    }

    /// Derive an Ed25519 key pair from a BIP-39 seed phrase with a custom,
    /// fully hardened SLIP-10 path.
    pub fn from_seed_phrase_with_path(
        phrase: impl AsRef<str>,
        hd_path: impl AsRef<str>,
    ) -> Result<Self, SignerError> {
        let normalized = phrase
            .as_ref()
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let mnemonic: Mnemonic = normalized
            .parse()
            .map_err(|_| SignerError::InvalidSeedPhrase)?;
        let seed = mnemonic.to_seed("");

        let path: BIP32Path = hd_path
            .as_ref()
            .parse()
            .map_err(|e| SignerError::KeyDerivationFailed(format!("Invalid HD path: {}", e)))?;

        let derived =
            slipped10::derive_key_from_path(&seed, Curve::Ed25519, &path).map_err(|e| {
                SignerError::KeyDerivationFailed(format!("SLIP-10 derivation failed: {:?}", e))
            })?;

        Ok(Self::ed25519_from_bytes(derived.key))
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.public_key.scheme()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The address this key pair controls.
    pub fn address(&self) -> SuiAddress {
        self.public_key.to_sui_address()
    }

    /// Sign transaction bytes with the transaction intent.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> Signature {
        let digest = transaction_digest(tx_bytes);
        let raw = match &self.material {
            KeyMaterial::Ed25519(key) => key.sign(&digest).to_bytes().to_vec(),
            KeyMaterial::Secp256k1(key) => {
                let sig: k256::ecdsa::Signature = key.sign(&digest);
                sig.to_bytes().to_vec()
            }
        };
        Signature::single(&self.public_key, &raw)
    }

    /// Keystore encoding: base64 of `flag || secret`.
    pub fn to_keystore_string(&self) -> String {
        let mut raw = Vec::with_capacity(SECRET_KEY_LENGTH + 1);
        raw.push(self.scheme().flag());
        match &self.material {
            KeyMaterial::Ed25519(key) => raw.extend_from_slice(&key.to_bytes()),
            KeyMaterial::Secp256k1(key) => raw.extend_from_slice(&key.to_bytes()),
        }
        STANDARD.encode(raw)
    }
}

impl FromStr for KeyPair {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = STANDARD
            .decode(s.trim())
            .map_err(|e| ParseKeyError::InvalidBase64(e.to_string()))?;
        let (flag, secret) = raw.split_first().ok_or(ParseKeyError::InvalidLength {
            expected: SECRET_KEY_LENGTH + 1,
            actual: 0,
        })?;
        if secret.len() != SECRET_KEY_LENGTH {
            return Err(ParseKeyError::InvalidLength {
                expected: SECRET_KEY_LENGTH + 1,
                actual: raw.len(),
            });
        }
        match SignatureScheme::try_from(*flag)? {
            SignatureScheme::Ed25519 => {
                let mut bytes = [0u8; SECRET_KEY_LENGTH];
                bytes.copy_from_slice(secret);
                Ok(Self::ed25519_from_bytes(bytes))
            }
            SignatureScheme::Secp256k1 => Self::secp256k1_from_bytes(secret),
            SignatureScheme::MultiSig => Err(ParseKeyError::UnknownScheme(*flag)),
        }
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address())
            .field("public_key", &self.public_key)
            .field("secret_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_ed25519_sign_and_verify() {
        let keypair = KeyPair::generate_ed25519();
        let tx = b"transaction bytes";
        let sig = keypair.sign_transaction(tx);

        assert_eq!(sig.scheme().unwrap(), SignatureScheme::Ed25519);
        assert_eq!(sig.as_bytes().len(), 1 + 64 + 32);
        assert_eq!(sig.public_key().as_ref(), Some(keypair.public_key()));
        assert!(sig.verify(tx));
        assert!(!sig.verify(b"other bytes"));
    }

    #[test]
    fn test_secp256k1_sign_and_verify() {
        let keypair = KeyPair::generate_secp256k1();
        let tx = b"transaction bytes";
        let sig = keypair.sign_transaction(tx);

        assert_eq!(sig.scheme().unwrap(), SignatureScheme::Secp256k1);
        assert_eq!(sig.as_bytes().len(), 1 + 64 + 33);
        assert!(sig.verify(tx));
    }

    #[test]
    fn test_ed25519_is_deterministic() {
        let keypair = KeyPair::ed25519_from_bytes([7u8; 32]);
        assert_eq!(
            keypair.sign_transaction(b"tx").as_bytes(),
            keypair.sign_transaction(b"tx").as_bytes()
        );
    }

    #[test]
    fn test_keystore_string_roundtrip() {
        for keypair in [KeyPair::generate_ed25519(), KeyPair::generate_secp256k1()] {
            let restored: KeyPair = keypair.to_keystore_string().parse().unwrap();
            assert_eq!(restored.public_key(), keypair.public_key());
            assert_eq!(restored.address(), keypair.address());
        }
    }

    #[test]
    fn test_keystore_string_rejects_bad_input() {
        assert!(matches!(
            "***".parse::<KeyPair>(),
            Err(ParseKeyError::InvalidBase64(_))
        ));
        let short = STANDARD.encode([0u8; 10]);
        assert!(matches!(
            short.parse::<KeyPair>(),
            Err(ParseKeyError::InvalidLength { .. })
        ));
        let mut unknown = vec![0x09];
        unknown.extend_from_slice(&[1u8; 32]);
        assert_eq!(
            STANDARD.encode(unknown).parse::<KeyPair>().unwrap_err(),
            ParseKeyError::UnknownScheme(0x09)
        );
    }

    #[test]
    fn test_address_is_blake2b_of_flagged_key() {
        let keypair = KeyPair::ed25519_from_bytes([1u8; 32]);
        let expected = blake2b256(&[&keypair.public_key().flagged_bytes()]);
        assert_eq!(keypair.address().as_bytes(), &expected);
    }

    #[test]
    fn test_public_key_string_roundtrip() {
        let keypair = KeyPair::generate_secp256k1();
        let encoded = keypair.public_key().to_string();
        let parsed: PublicKey = encoded.parse().unwrap();
        assert_eq!(&parsed, keypair.public_key());
    }

    #[test]
    fn test_from_seed_phrase_is_stable() {
        let a = KeyPair::from_seed_phrase(PHRASE).unwrap();
        let b = KeyPair::from_seed_phrase(format!("  {}  ", PHRASE.to_uppercase())).unwrap();
        assert_eq!(a.address(), b.address());

        let other = KeyPair::from_seed_phrase_with_path(PHRASE, "m/44'/784'/1'/0'/0'").unwrap();
        assert_ne!(a.address(), other.address());
    }

    #[test]
    fn test_from_seed_phrase_invalid() {
        assert_eq!(
            KeyPair::from_seed_phrase("not a mnemonic").unwrap_err(),
            SignerError::InvalidSeedPhrase
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = KeyPair::ed25519_from_bytes([3u8; 32]);
        let debug = format!("{:?}", keypair);
        assert!(debug.contains("***"));
        assert!(!debug.contains(&keypair.to_keystore_string()));
    }

    #[test]
    fn test_signature_string_roundtrip() {
        let sig = KeyPair::generate_ed25519().sign_transaction(b"tx");
        let parsed: Signature = sig.to_string().parse().unwrap();
        assert_eq!(parsed, sig);
    }
}
