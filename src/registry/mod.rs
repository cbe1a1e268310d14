// Field registry for the ADS1115 configuration register
pub mod fields;
pub mod index;

pub use fields::{is_valid_field, Field, FieldSpec, RegisterByte, FIELDS};
pub use index::{code_to_symbol, reciprocal_index, symbol_to_code, ReciprocalIndex};
