// Bus addressing helpers used alongside the register codec
pub mod address;

pub use address::{
    pointer_register, slave_address, slave_address_from_index, AddrPin, AddressError,
    PointerRegister,
};
