// Register pair: the two bytes written after the config pointer byte

use crate::config::DEFAULT_REGISTER;
use crate::registry::RegisterByte;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Packed configuration register, high byte first on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPair {
    pub high_byte: u8,
    pub low_byte: u8,
}

impl RegisterPair {
    pub const fn new(high_byte: u8, low_byte: u8) -> Self {
        Self {
            high_byte,
            low_byte,
        }
    }

    /// Bytes in wire order
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.high_byte, self.low_byte]
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::new(bytes[0], bytes[1])
    }

    /// The 16-bit register value (big-endian)
    pub fn to_u16(&self) -> u16 {
        u16::from_be_bytes(self.to_bytes())
    }

    pub fn from_u16(value: u16) -> Self {
        Self::from_bytes(value.to_be_bytes())
    }

    pub fn byte(&self, which: RegisterByte) -> u8 {
        match which {
            RegisterByte::High => self.high_byte,
            RegisterByte::Low => self.low_byte,
        }
    }

    pub fn byte_mut(&mut self, which: RegisterByte) -> &mut u8 {
        match which {
            RegisterByte::High => &mut self.high_byte,
            RegisterByte::Low => &mut self.low_byte,
        }
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x} {:#04x}", self.high_byte, self.low_byte)
    }
}

impl From<u16> for RegisterPair {
    fn from(value: u16) -> Self {
        RegisterPair::from_u16(value)
    }
}

/// Register pair as received from an untrusted source; either byte may be missing.
///
/// Deserialization is lenient: a byte that is absent, not an integer, or outside
/// 0..=255 becomes None.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegisterPair {
    #[serde(default, deserialize_with = "lenient_byte")]
    pub high_byte: Option<u8>,
    #[serde(default, deserialize_with = "lenient_byte")]
    pub low_byte: Option<u8>,
}

impl RawRegisterPair {
    pub fn new(high_byte: Option<u8>, low_byte: Option<u8>) -> Self {
        Self {
            high_byte,
            low_byte,
        }
    }

    /// Fill missing bytes from the default register encoding
    pub fn resolve(&self) -> RegisterPair {
        RegisterPair::new(
            self.high_byte.unwrap_or(DEFAULT_REGISTER.high_byte),
            self.low_byte.unwrap_or(DEFAULT_REGISTER.low_byte),
        )
    }
}

impl From<RegisterPair> for RawRegisterPair {
    fn from(pair: RegisterPair) -> Self {
        RawRegisterPair::new(Some(pair.high_byte), Some(pair.low_byte))
    }
}

impl From<&serde_json::Value> for RawRegisterPair {
    /// Any JSON value; non-objects carry no bytes at all
    fn from(value: &serde_json::Value) -> Self {
        let byte = |key: &str| value.get(key).and_then(json_byte);
        RawRegisterPair::new(byte("highByte"), byte("lowByte"))
    }
}

fn json_byte(value: &serde_json::Value) -> Option<u8> {
    value.as_u64().and_then(|n| u8::try_from(n).ok())
}

fn lenient_byte<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(json_byte(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_conversion() {
        let pair = RegisterPair::new(0x4a, 0xca);
        assert_eq!(pair.to_u16(), 0x4aca);
        assert_eq!(pair.to_bytes(), [0x4a, 0xca]);
        assert_eq!(RegisterPair::from_u16(0xdead), RegisterPair::new(0xde, 0xad));
        assert_eq!(RegisterPair::from(0xbeef), RegisterPair::new(0xbe, 0xef));
        assert_eq!(pair.to_string(), "0x4a 0xca");
    }

    #[test]
    fn test_byte_access() {
        let mut pair = RegisterPair::new(0x05, 0x83);
        assert_eq!(pair.byte(RegisterByte::High), 0x05);
        *pair.byte_mut(RegisterByte::Low) |= 0x04;
        assert_eq!(pair.low_byte, 0x87);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&RegisterPair::new(0x85, 0x83)).unwrap();
        assert_eq!(json, r#"{"highByte":133,"lowByte":131}"#);
    }

    #[test]
    fn test_raw_pair_is_lenient() {
        let raw: RawRegisterPair = serde_json::from_str(r#"{"highByte":74}"#).unwrap();
        assert_eq!(raw, RawRegisterPair::new(Some(74), None));
        assert_eq!(raw.resolve(), RegisterPair::new(74, 0x83));

        let raw: RawRegisterPair =
            serde_json::from_str(r#"{"highByte":"x","lowByte":300}"#).unwrap();
        assert_eq!(raw.resolve(), DEFAULT_REGISTER);

        let raw: RawRegisterPair = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.resolve(), DEFAULT_REGISTER);
    }

    #[test]
    fn test_raw_pair_from_any_value() {
        let raw = RawRegisterPair::from(&serde_json::json!(3.14159));
        assert_eq!(raw, RawRegisterPair::default());

        let raw = RawRegisterPair::from(&serde_json::json!({"lowByte": 202}));
        assert_eq!(raw.resolve(), RegisterPair::new(0x05, 0xca));
    }
}
