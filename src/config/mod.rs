// Configuration descriptions, their validation and symbolic editing
pub mod alter;
pub mod defaults;
pub mod description;
pub mod error;
pub mod validator;

pub use alter::{apply, apply_json, applied, resolve_symbol};
pub use defaults::{clone_default, clone_description, DEFAULT_CONFIGURATION, DEFAULT_REGISTER};
pub use description::{Description, FieldValue, RawDescription};
pub use error::ConfigError;
pub use validator::{check, check_description, check_fields, check_values, is_full_configuration};
