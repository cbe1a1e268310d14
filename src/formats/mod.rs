// Description and register pair file/text formats
pub mod error;
pub mod json;
pub mod text;

pub use error::FormatError;
pub use json::{
    description_to_json, load_description, parse_description, parse_register_pair,
    parse_typed_description, save_description,
};
pub use text::{parse_byte_text, parse_description_any, parse_description_text, parse_register_text};
