// Unpacking the register pair into descriptions

use super::register::RawRegisterPair;
use crate::config::Description;
use crate::registry::{code_to_symbol, Field};

/// Unsigned bit extraction: `(byte >> shift) & ((1 << width) - 1)`.
/// A shift past the byte yields 0 and a width of 8 or more keeps every bit.
pub fn extract_bits(byte: u8, shift: u8, width: u8) -> u8 {
    let mask = 1u16
        .checked_shl(width as u32)
        .map_or(u16::MAX, |bit| bit - 1) as u8;
    byte.checked_shr(shift as u32).unwrap_or(0) & mask
}

/// Split a register pair into all nine fields as numeric codes.
/// Missing bytes are taken from the default register encoding.
pub fn unpack(pair: impl Into<RawRegisterPair>) -> Description {
    let raw: RawRegisterPair = pair.into();
    let pair = raw.resolve();
    let mut description = Description::new();

    for field in Field::ALL {
        let spec = field.spec();
        let code = extract_bits(pair.byte(spec.byte), spec.shift, spec.width());
        description.set(field, code);
    }

    tracing::debug!("unpack: {} -> {:?}", pair, description);
    description
}

/// Split a register pair into all nine fields as symbols
pub fn unpack_symbols(pair: impl Into<RawRegisterPair>) -> Description {
    let codes = unpack(pair);
    let mut description = Description::new();

    for (field, value) in codes.iter() {
        // Every field has 2^width symbols, so each extracted code has a name
        if let Some(symbol) = value.as_code().and_then(|code| code_to_symbol(field, code)) {
            description.set(field, symbol);
        }
    }

    description
}
