// Two-byte register codec
pub mod pack;
pub mod register;
pub mod unpack;

pub use pack::{pack, pack_raw};
pub use register::{RawRegisterPair, RegisterPair};
pub use unpack::{extract_bits, unpack, unpack_symbols};
