// Reciprocal index: code -> symbol per field, derived once from the field table

use super::fields::{Field, FIELDS};
use std::collections::HashMap;

/// Immutable code/symbol lookup tables built from the field registry
#[derive(Debug)]
pub struct ReciprocalIndex {
    to_symbol: HashMap<Field, HashMap<u8, &'static str>>,
    to_code: HashMap<Field, HashMap<&'static str, u8>>,
}

impl ReciprocalIndex {
    /// Build the index from the static field table
    pub fn build() -> Self {
        let mut to_symbol = HashMap::new();
        let mut to_code = HashMap::new();

        for spec in FIELDS.iter() {
            let forward: HashMap<&'static str, u8> = spec
                .symbols
                .iter()
                .enumerate()
                .map(|(code, symbol)| (*symbol, code as u8))
                .collect();
            let reverse = forward.iter().map(|(symbol, code)| (*code, *symbol)).collect();

            to_code.insert(spec.field, forward);
            to_symbol.insert(spec.field, reverse);
        }

        tracing::debug!("Built reciprocal index for {} fields", to_symbol.len());
        Self { to_symbol, to_code }
    }

    /// Symbol whose code is `code`, or None when `code` is outside `[0, N)`
    pub fn code_to_symbol(&self, field: Field, code: i64) -> Option<&'static str> {
        let code = u8::try_from(code).ok()?;
        self.to_symbol.get(&field)?.get(&code).copied()
    }

    /// Code of `symbol` within `field`, if the field knows it
    pub fn symbol_to_code(&self, field: Field, symbol: &str) -> Option<u8> {
        self.to_code.get(&field)?.get(symbol).copied()
    }
}

lazy_static::lazy_static! {
    static ref RECIPROCAL_INDEX: ReciprocalIndex = ReciprocalIndex::build();
}

/// Process-wide index, built on first use
pub fn reciprocal_index() -> &'static ReciprocalIndex {
    &RECIPROCAL_INDEX
}

/// Shorthand for `reciprocal_index().code_to_symbol(..)`
pub fn code_to_symbol(field: Field, code: i64) -> Option<&'static str> {
    RECIPROCAL_INDEX.code_to_symbol(field, code)
}

/// Shorthand for `reciprocal_index().symbol_to_code(..)`
pub fn symbol_to_code(field: Field, symbol: &str) -> Option<u8> {
    RECIPROCAL_INDEX.symbol_to_code(field, symbol)
}
