// Symbol mutator: apply bare symbols to a full description, resolving each to its field

use super::description::Description;
use super::error::{ConfigError, Result};
use super::validator::is_full_configuration;
use crate::registry::{Field, FieldSpec, FIELDS};

/// First field, in declaration order, whose symbol list contains `symbol`.
///
/// Symbols need not be unique across fields; the earliest declared field wins.
pub fn resolve_symbol(symbol: &str) -> Option<Field> {
    resolve_in(&FIELDS, symbol)
}

/// Scan `specs` in order and return the first field that knows `symbol`
pub(crate) fn resolve_in(specs: &[FieldSpec], symbol: &str) -> Option<Field> {
    specs
        .iter()
        .find(|spec| spec.contains(symbol))
        .map(|spec| spec.field)
}

/// Apply `symbols` to `target` in place and hand back the same description.
///
/// `target` must be a full, valid description. Symbols are applied in list
/// order; an unresolved symbol aborts the call but leaves earlier symbols applied.
pub fn apply<'a, S: AsRef<str>>(
    symbols: &[S],
    target: &'a mut Description,
) -> Result<&'a mut Description> {
    if !is_full_configuration(target) {
        return Err(ConfigError::NotAConfiguration);
    }

    for symbol in symbols {
        let symbol = symbol.as_ref();
        let field =
            resolve_symbol(symbol).ok_or_else(|| ConfigError::UnresolvedSymbol(symbol.to_string()))?;
        tracing::debug!("alter: '{}' -> {}", symbol, field);
        target.set(field, symbol);
    }

    Ok(target)
}

/// Clone `source`, apply `symbols` to the copy and return it; `source` is untouched
pub fn applied<S: AsRef<str>>(symbols: &[S], source: &Description) -> Result<Description> {
    let mut copy = source.clone();
    apply(symbols, &mut copy)?;
    Ok(copy)
}

/// Apply an untyped symbol list, e.g. straight from JSON.
///
/// Fails with `NotASequence` unless `symbols` is an array of strings.
pub fn apply_json<'a>(
    symbols: &serde_json::Value,
    target: &'a mut Description,
) -> Result<&'a mut Description> {
    if !is_full_configuration(target) {
        return Err(ConfigError::NotAConfiguration);
    }

    let list = symbols.as_array().ok_or(ConfigError::NotASequence)?;
    let symbols = list
        .iter()
        .map(|value| value.as_str().ok_or(ConfigError::NotASequence))
        .collect::<Result<Vec<&str>>>()?;

    apply(symbols.as_slice(), target)
}
