//! Weighted k-of-n multi-signature accounts.
//!
//! A multisig account is a list of member public keys, each with a weight,
//! and a threshold. A transaction is authorized once the weights of the
//! members that signed reach the threshold. The serialized signature is
//! `0x03 || bcs(MultiSig)`.

use serde::Serialize;

use super::address::SuiAddress;
use super::crypto::{KeyPair, PublicKey, Signature, SignatureScheme, blake2b256};
use crate::error::SignerError;

/// Maximum number of members a multisig account may have.
pub const MAX_SIGNER_IN_MULTISIG: usize = 10;

// ============================================================================
// BCS wire structures
// ============================================================================

#[derive(Serialize)]
enum CompressedSignature {
    Ed25519(Vec<u8>),
    Secp256k1(Vec<u8>),
}

#[derive(Serialize)]
enum WirePublicKey {
    Ed25519(Vec<u8>),
    Secp256k1(Vec<u8>),
}

#[derive(Serialize)]
struct WireMultiSigPublicKey {
    pk_map: Vec<(WirePublicKey, u8)>,
    threshold: u16,
}

#[derive(Serialize)]
struct WireMultiSig {
    sigs: Vec<CompressedSignature>,
    bitmap: u16,
    multisig_pk: WireMultiSigPublicKey,
}

fn wire_public_key(pk: &PublicKey) -> Result<WirePublicKey, SignerError> {
    match pk.scheme() {
        SignatureScheme::Ed25519 => Ok(WirePublicKey::Ed25519(pk.as_bytes().to_vec())),
        SignatureScheme::Secp256k1 => Ok(WirePublicKey::Secp256k1(pk.as_bytes().to_vec())),
        SignatureScheme::MultiSig => Err(SignerError::MultiSig(
            "multisig keys cannot be nested".to_string(),
        )),
    }
}

// ============================================================================
// MultiSigPublicKey
// ============================================================================

/// The public description of a multisig account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSigPublicKey {
    members: Vec<(PublicKey, u8)>,
    threshold: u16,
}

impl MultiSigPublicKey {
    /// Create a multisig public key.
    ///
    /// Fails if there are no members, more than [`MAX_SIGNER_IN_MULTISIG`],
    /// a zero weight, a duplicate key, or a threshold the members together
    /// cannot reach.
    pub fn new(members: Vec<(PublicKey, u8)>, threshold: u16) -> Result<Self, SignerError> {
        if members.is_empty() || members.len() > MAX_SIGNER_IN_MULTISIG {
            return Err(SignerError::MultiSig(format!(
                "member count must be between 1 and {MAX_SIGNER_IN_MULTISIG}, got {}",
                members.len()
            )));
        }
        if threshold == 0 {
            return Err(SignerError::MultiSig("threshold must be positive".to_string()));
        }
        if members.iter().any(|(_, w)| *w == 0) {
            return Err(SignerError::MultiSig("member weight must be positive".to_string()));
        }
        for (i, (pk, _)) in members.iter().enumerate() {
            wire_public_key(pk)?;
            if members[..i].iter().any(|(other, _)| other == pk) {
                return Err(SignerError::MultiSig(format!("duplicate member key {pk}")));
            }
        }
        let total: u32 = members.iter().map(|(_, w)| u32::from(*w)).sum();
        if total < u32::from(threshold) {
            return Err(SignerError::MultiSig(format!(
                "threshold {threshold} exceeds total weight {total}"
            )));
        }
        Ok(Self { members, threshold })
    }

    pub fn members(&self) -> &[(PublicKey, u8)] {
        &self.members
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Address of the multisig account:
    /// Blake2b-256(`0x03 || threshold_le || (flag || pk || weight)*`).
    pub fn address(&self) -> SuiAddress {
        let mut preimage = vec![SignatureScheme::MultiSig.flag()];
        preimage.extend_from_slice(&self.threshold.to_le_bytes());
        for (pk, weight) in &self.members {
            preimage.extend(pk.flagged_bytes());
            preimage.push(*weight);
        }
        SuiAddress::new(blake2b256(&[&preimage]))
    }

    fn position(&self, pk: &PublicKey) -> Option<usize> {
        self.members.iter().position(|(member, _)| member == pk)
    }

    fn to_wire(&self) -> Result<WireMultiSigPublicKey, SignerError> {
        let pk_map = self
            .members
            .iter()
            .map(|(pk, w)| Ok((wire_public_key(pk)?, *w)))
            .collect::<Result<Vec<_>, SignerError>>()?;
        Ok(WireMultiSigPublicKey {
            pk_map,
            threshold: self.threshold,
        })
    }
}

// ============================================================================
// MultiSig
// ============================================================================

/// A multisig account together with the member key pairs held locally.
///
/// # Example
///
/// ```rust
/// use sui_kit::{KeyPair, MultiSig};
///
/// let a = KeyPair::generate_ed25519();
/// let b = KeyPair::generate_secp256k1();
/// let msig = MultiSig::new(vec![(a.clone(), 1), (b.clone(), 1)], 2).unwrap();
///
/// let sig = msig
///     .sign(b"tx bytes", &[a.public_key().clone(), b.public_key().clone()])
///     .unwrap();
/// assert_eq!(sig.as_bytes()[0], 0x03);
/// ```
#[derive(Clone)]
pub struct MultiSig {
    public_key: MultiSigPublicKey,
    keypairs: Vec<KeyPair>,
}

impl MultiSig {
    /// Create a multisig from member key pairs with their weights.
    pub fn new(members: Vec<(KeyPair, u8)>, threshold: u16) -> Result<Self, SignerError> {
        let public_key = MultiSigPublicKey::new(
            members
                .iter()
                .map(|(kp, w)| (kp.public_key().clone(), *w))
                .collect(),
            threshold,
        )?;
        let keypairs = members.into_iter().map(|(kp, _)| kp).collect();
        Ok(Self {
            public_key,
            keypairs,
        })
    }

    pub fn public_key(&self) -> &MultiSigPublicKey {
        &self.public_key
    }

    /// The multisig account address.
    pub fn address(&self) -> SuiAddress {
        self.public_key.address()
    }

    /// Sign `tx_bytes` with the members identified by `pub_keys`.
    ///
    /// Every key must belong to a member, and the weights of the chosen
    /// members must reach the threshold.
    pub fn sign(&self, tx_bytes: &[u8], pub_keys: &[PublicKey]) -> Result<Signature, SignerError> {
        let mut positions = Vec::with_capacity(pub_keys.len());
        for pk in pub_keys {
            let pos = self
                .public_key
                .position(pk)
                .ok_or_else(|| SignerError::MultiSig(format!("{pk} is not a member key")))?;
            if !positions.contains(&pos) {
                positions.push(pos);
            }
        }
        positions.sort_unstable();

        let weight: u32 = positions
            .iter()
            .map(|&p| u32::from(self.public_key.members[p].1))
            .sum();
        if weight < u32::from(self.public_key.threshold) {
            return Err(SignerError::MultiSig(format!(
                "signer weight {weight} below threshold {}",
                self.public_key.threshold
            )));
        }

        let mut bitmap = 0u16;
        let mut sigs = Vec::with_capacity(positions.len());
        for pos in positions {
            bitmap |= 1 << pos;
            let keypair = &self.keypairs[pos];
            let signature = keypair.sign_transaction(tx_bytes);
            let raw = signature
                .signature_bytes()
                .ok_or_else(|| SignerError::SigningFailed("empty member signature".to_string()))?
                .to_vec();
            sigs.push(match keypair.scheme() {
                SignatureScheme::Secp256k1 => CompressedSignature::Secp256k1(raw),
                _ => CompressedSignature::Ed25519(raw),
            });
        }

        let body = bcs::to_bytes(&WireMultiSig {
            sigs,
            bitmap,
            multisig_pk: self.public_key.to_wire()?,
        })
        .map_err(|e| SignerError::MultiSig(e.to_string()))?;
        Ok(Signature::multisig(body))
    }
}

impl std::fmt::Debug for MultiSig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSig")
            .field("address", &self.address())
            .field("threshold", &self.public_key.threshold)
            .field("members", &self.public_key.members.len())
            .finish()
    }
}
