// Errors raised by validation, strict packing and the symbol mutator

use super::description::FieldValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid configuration: wrong value for field '{field}': '{value}'")]
    InvalidValue { field: String, value: FieldValue },

    #[error("alter: target is not a full, valid configuration description")]
    NotAConfiguration,

    #[error("alter: symbol list is not a sequence")]
    NotASequence,

    #[error("alter: symbol '{0}' not found in any field")]
    UnresolvedSymbol(String),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, value: &FieldValue) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.clone(),
        }
    }

    /// Field name carried by the error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownField(field) => Some(field),
            ConfigError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Offending value, only present for value failures
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            ConfigError::InvalidValue { value, .. } => Some(value),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
