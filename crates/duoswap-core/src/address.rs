use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte identifier for accounts, assets, and pools.
///
/// Ordering is byte-lexicographic, which is the order used to canonicalize
/// asset pairs. The all-zero address is the null identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const ZERO: Address = Address([0u8; 32]);

    pub fn new(data: [u8; 32]) -> Self {
        Address(data)
    }

    /// Generate a random address
    pub fn random() -> Self {
        Address(rand::random())
    }

    /// Derive a stable address from a human-readable label
    pub fn from_label(label: &str) -> Self {
        let mut data = Vec::with_capacity(label.len() + 14);
        data.extend_from_slice(b"duoswap:label:");
        data.extend_from_slice(label.as_bytes());
        hash_blake3(&data)
    }

    pub fn is_zero(&self) -> bool {
        *self == Address::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Some(Address(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        Self::from_slice(&bytes).ok_or(CoreError::InvalidAddressLength(bytes.len()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First four bytes as hex, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_hex(&s).map_err(D::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Address)
        }
    }
}

/// Compute Blake3 hash of data as an address
pub fn hash_blake3(data: &[u8]) -> Address {
    let hash = blake3::hash(data);
    Address(*hash.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let a = hash_blake3(b"test data");
        let b = hash_blake3(b"test data");
        assert_eq!(a, b);
        assert_ne!(a, Address::ZERO);
    }

    #[test]
    fn test_label_addresses_differ() {
        assert_ne!(Address::from_label("alice"), Address::from_label("bob"));
        assert_eq!(Address::from_label("alice"), Address::from_label("alice"));
    }

    #[test]
    fn test_hex_roundtrip_with_prefix() {
        let addr = Address::random();
        let recovered = Address::from_hex(&format!("0x{}", addr.to_hex())).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            Address::from_hex("0011"),
            Err(CoreError::InvalidAddressLength(2))
        ));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut low = [0u8; 32];
        let mut high = [0u8; 32];
        low[0] = 1;
        high[0] = 2;
        assert!(Address(low) < Address(high));
        assert!(Address::ZERO.is_zero());
        assert!(!Address(low).is_zero());
    }
}
