// Description validation: known field names, then in-range values

use super::description::{Description, FieldValue, RawDescription};
use super::error::{ConfigError, Result};
use crate::registry::{code_to_symbol, symbol_to_code, Field};

/// Resolve a value to its code without truncation.
/// Returns None for codes outside `[0, N)` or symbols the field does not know.
pub fn resolve_code(field: Field, value: &FieldValue) -> Option<u8> {
    match value {
        FieldValue::Code(code) => code_to_symbol(field, *code).map(|_| *code as u8),
        FieldValue::Symbol(symbol) => symbol_to_code(field, symbol),
    }
}

/// Check a single value against its field
pub fn is_valid_value(field: Field, value: &FieldValue) -> bool {
    resolve_code(field, value).is_some()
}

/// Fail on the first key, in the bag's own order, that is not a field name
pub fn check_fields(raw: &RawDescription) -> Result<()> {
    for key in raw.keys() {
        if Field::from_name(key).is_none() {
            return Err(ConfigError::UnknownField(key.to_string()));
        }
    }
    Ok(())
}

/// Field names first (whole pass), then values in the bag's own order
pub fn check_values(raw: &RawDescription) -> Result<()> {
    check_fields(raw)?;
    for (key, value) in raw.iter() {
        // check_fields above guarantees the lookup succeeds
        if let Some(field) = Field::from_name(key) {
            if !is_valid_value(field, value) {
                return Err(ConfigError::invalid_value(key, value));
            }
        }
    }
    Ok(())
}

/// Run the field check, and the value check too when `with_values` is set
pub fn check(raw: &RawDescription, with_values: bool) -> Result<()> {
    if with_values {
        check_values(raw)
    } else {
        check_fields(raw)
    }
}

/// Value check for a typed description, in field declaration order
pub fn check_description(description: &Description) -> Result<()> {
    for (field, value) in description.iter() {
        if !is_valid_value(field, value) {
            return Err(ConfigError::invalid_value(field.name(), value));
        }
    }
    Ok(())
}

/// True for a description carrying all nine fields with valid values
pub fn is_full_configuration(description: &Description) -> bool {
    description.is_full() && check_description(description).is_ok()
}
