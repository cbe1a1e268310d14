// ADS1115-CONFIG: configuration register codec for the ADS1115 delta-sigma ADC
// Copyright 2024 - Licensed under GPLv3

pub mod addressing;
pub mod codec;
pub mod config;
pub mod formats;
pub mod registry;

// Re-export commonly used types
pub use addressing::{pointer_register, slave_address, AddrPin, AddressError, PointerRegister};
pub use codec::{pack, pack_raw, unpack, unpack_symbols, RawRegisterPair, RegisterPair};
pub use config::{
    apply, applied, clone_default, ConfigError, Description, FieldValue, RawDescription,
    DEFAULT_CONFIGURATION, DEFAULT_REGISTER,
};
pub use formats::FormatError;
pub use registry::{Field, FieldSpec, RegisterByte};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
