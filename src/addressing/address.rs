// I2C slave address and pointer-register selector for the ADS1115

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address pin {0} (can only be 0, 1, 2, or 3)")]
    InvalidAddressPin(i64),

    #[error("unknown register name '{0}'")]
    UnknownRegister(String),
}

pub type Result<T> = std::result::Result<T, AddressError>;

/// 8-bit base address (7-bit 0x48 shifted left by one)
pub const BASE_ADDRESS: u8 = 0x90;

/// What the ADDR pin is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrPin {
    Gnd = 0,
    Vdd = 1,
    Sda = 2,
    Scl = 3,
}

impl AddrPin {
    pub const ALL: [AddrPin; 4] = [AddrPin::Gnd, AddrPin::Vdd, AddrPin::Sda, AddrPin::Scl];

    pub fn from_index(index: i64) -> Result<Self> {
        match index {
            0 => Ok(AddrPin::Gnd),
            1 => Ok(AddrPin::Vdd),
            2 => Ok(AddrPin::Sda),
            3 => Ok(AddrPin::Scl),
            other => Err(AddressError::InvalidAddressPin(other)),
        }
    }
}

impl TryFrom<i64> for AddrPin {
    type Error = AddressError;

    fn try_from(index: i64) -> Result<Self> {
        AddrPin::from_index(index)
    }
}

/// 8-bit bus address for a device whose ADDR pin is wired to `pin`
pub fn slave_address(pin: AddrPin, for_reading: bool) -> u8 {
    BASE_ADDRESS + (pin as u8) * 2 + u8::from(for_reading)
}

/// Same as [`slave_address`] for a raw pin index
pub fn slave_address_from_index(index: i64, for_reading: bool) -> Result<u8> {
    Ok(slave_address(AddrPin::from_index(index)?, for_reading))
}

/// The four registers behind the pointer register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerRegister {
    Conversion = 0,
    Config = 1,
    LowThreshold = 2,
    HighThreshold = 3,
}

impl PointerRegister {
    pub fn selector(self) -> u8 {
        self as u8
    }
}

impl FromStr for PointerRegister {
    type Err = AddressError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "conv" | "conversion" => Ok(PointerRegister::Conversion),
            "config" | "configuration" => Ok(PointerRegister::Config),
            "loThresh" | "lowThresh" | "loThreshold" | "lowThreshold" => {
                Ok(PointerRegister::LowThreshold)
            }
            "hiThresh" | "highThresh" | "hiThreshold" | "highThreshold" => {
                Ok(PointerRegister::HighThreshold)
            }
            _ => Err(AddressError::UnknownRegister(name.to_string())),
        }
    }
}

impl fmt::Display for PointerRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PointerRegister::Conversion => "conversion",
            PointerRegister::Config => "config",
            PointerRegister::LowThreshold => "lowThreshold",
            PointerRegister::HighThreshold => "highThreshold",
        };
        write!(f, "{}", name)
    }
}

/// Pointer-register selector byte for a register name or synonym
pub fn pointer_register(name: &str) -> Result<u8> {
    name.parse::<PointerRegister>().map(PointerRegister::selector)
}
