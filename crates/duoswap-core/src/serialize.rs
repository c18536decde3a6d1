use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Serialize to deterministic bincode bytes
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    bincode::serialize(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// Deserialize from bincode bytes
pub fn from_bytes<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, CoreError> {
    bincode::deserialize(bytes).map_err(|e| CoreError::Deserialization(e.to_string()))
}

/// Serialize to pretty JSON string
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// Deserialize from JSON string
pub fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, CoreError> {
    serde_json::from_str(json).map_err(|e| CoreError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, Op};

    #[test]
    fn test_address_json_is_hex() {
        let addr = Address::from_label("alice");
        let json = to_json_pretty(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_hex()));

        let recovered: Address = from_json(&json).unwrap();
        assert_eq!(recovered, addr);
    }

    #[test]
    fn test_address_bincode_is_raw_bytes() {
        let addr = Address::from_label("bob");
        let bytes = to_bytes(&addr).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..], addr.as_bytes());

        let recovered: Address = from_bytes(&bytes).unwrap();
        assert_eq!(recovered, addr);
    }

    #[test]
    fn test_op_json_shape() {
        let pool = Address::from_label("pool");
        let json = r#"{"type":"swap","pool":"POOL","min_out_a":0,"min_out_b":5}"#
            .replace("POOL", &pool.to_hex());
        let op: Op = from_json(&json).unwrap();
        assert!(matches!(
            op,
            Op::Swap { min_out_a: 0, min_out_b: 5, .. }
        ));
    }

    #[test]
    fn test_rejects_short_hex_address() {
        let result: Result<Address, _> = from_json("\"abcd\"");
        assert!(result.is_err());
    }
}
