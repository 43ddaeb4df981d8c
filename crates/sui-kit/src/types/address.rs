//! Sui addresses and object identifiers.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseAddressError;

/// Length of an address or object ID in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte Sui account address.
///
/// Displayed as `0x` followed by 64 lowercase hex digits. Parsing accepts the
/// short form used for system addresses (`0x2`) and left-pads it with zeros.
///
/// # Example
///
/// ```rust
/// use sui_kit::SuiAddress;
///
/// let addr: SuiAddress = "0x2".parse().unwrap();
/// assert_eq!(addr.to_string().len(), 66);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

/// A 32-byte Sui object identifier. Shares the address encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectID([u8; ADDRESS_LENGTH]);

fn parse_hex32(s: &str) -> Result<[u8; ADDRESS_LENGTH], ParseAddressError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(ParseAddressError::Empty);
    }
    if digits.len() > ADDRESS_LENGTH * 2 {
        return Err(ParseAddressError::TooLong(s.to_string()));
    }
    let padded = format!("{:0>64}", digits);
    let mut bytes = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(&padded, &mut bytes)
        .map_err(|_| ParseAddressError::InvalidHex(s.to_string()))?;
    Ok(bytes)
}

macro_rules! hex32_type {
    ($name:ident) => {
        impl $name {
            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

            /// Create from raw bytes.
            pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseAddressError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s.trim()).map(Self)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ParseAddressError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s: String = Deserialize::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hex32_type!(SuiAddress);
hex32_type!(ObjectID);

impl From<ObjectID> for SuiAddress {
    fn from(id: ObjectID) -> Self {
        SuiAddress(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_is_left_padded() {
        let addr: SuiAddress = "0x2".parse().unwrap();
        assert_eq!(
            addr.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(addr.as_bytes()[31], 2);
    }

    #[test]
    fn test_unprefixed_and_uppercase_accepted() {
        let addr: ObjectID = "ABCDEF".parse().unwrap();
        assert!(addr.to_string().ends_with("abcdef"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!("0x".parse::<SuiAddress>(), Err(ParseAddressError::Empty));
        assert!(matches!(
            "0xnothex".parse::<SuiAddress>(),
            Err(ParseAddressError::InvalidHex(_))
        ));
        let long = format!("0x{}", "1".repeat(65));
        assert!(matches!(
            long.parse::<SuiAddress>(),
            Err(ParseAddressError::TooLong(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr: SuiAddress = "0x5".parse().unwrap();
        let json = serde_json::to_value(addr).unwrap();
        assert_eq!(json, serde_json::json!(addr.to_string()));
        let back: SuiAddress = serde_json::from_value(json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_debug_names_type() {
        assert!(format!("{:?}", ObjectID::ZERO).starts_with("ObjectID(0x"));
    }
}
