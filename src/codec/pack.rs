// Packing descriptions into the register pair

use super::register::RegisterPair;
use crate::config::error::Result;
use crate::config::validator::{check_description, check_values, resolve_code};
use crate::config::{Description, FieldValue, RawDescription, DEFAULT_CONFIGURATION};
use crate::registry::{symbol_to_code, Field};

/// Pack a typed description. Absent fields come from the default configuration.
///
/// With `strict`, every present value must be in range or packing fails.
/// Without it, out-of-range codes are masked to the field width and unknown
/// symbols count as code 0.
pub fn pack(description: &Description, strict: bool) -> Result<RegisterPair> {
    if strict {
        check_description(description)?;
    }
    Ok(pack_with(|field| description.get(field)))
}

/// Pack an open keyed bag.
///
/// With `strict`, unknown keys and bad values fail (field names checked first).
/// Without it, keys that are not field names are ignored.
pub fn pack_raw(raw: &RawDescription, strict: bool) -> Result<RegisterPair> {
    if strict {
        check_values(raw)?;
    } else {
        for key in raw.keys().filter(|key| Field::from_name(key).is_none()) {
            tracing::warn!("pack: ignoring unknown field '{}'", key);
        }
    }
    Ok(pack_with(|field| raw.get(field.name())))
}

fn pack_with<'a, F>(lookup: F) -> RegisterPair
where
    F: Fn(Field) -> Option<&'a FieldValue>,
{
    let mut pair = RegisterPair::new(0, 0);

    for field in Field::ALL {
        let code = match lookup(field) {
            Some(value) => permissive_code(field, value),
            None => default_code(field),
        };
        *pair.byte_mut(field.spec().byte) |= place(field, code);
    }

    tracing::debug!("pack: {}", pair);
    pair
}

/// Code for a value with no range check; numeric codes pass through
fn permissive_code(field: Field, value: &FieldValue) -> i64 {
    match value {
        FieldValue::Code(code) => *code,
        FieldValue::Symbol(symbol) => match symbol_to_code(field, symbol) {
            Some(code) => code as i64,
            None => {
                tracing::warn!("pack: unknown symbol '{}' for {}, using 0", symbol, field);
                0
            }
        },
    }
}

fn default_code(field: Field) -> i64 {
    DEFAULT_CONFIGURATION
        .get(field)
        .and_then(|value| resolve_code(field, value))
        .unwrap_or(0) as i64
}

/// Mask `code` to the field width and shift it into position
fn place(field: Field, code: i64) -> u8 {
    let spec = field.spec();
    let masked = (code & spec.mask() as i64) as u8;
    if masked as i64 != code {
        tracing::warn!("pack: {} code {} truncated to {}", field, code, masked);
    }
    masked << spec.shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, DEFAULT_REGISTER};

    #[test]
    fn test_default_configuration() {
        assert_eq!(pack(&DEFAULT_CONFIGURATION, true).unwrap(), DEFAULT_REGISTER);
        assert_eq!(DEFAULT_REGISTER, RegisterPair::new(0x05, 0x83));
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(pack(&Description::new(), true).unwrap(), RegisterPair::new(0x05, 0x83));
        assert_eq!(
            pack_raw(&RawDescription::new(), true).unwrap(),
            RegisterPair::new(0x05, 0x83)
        );
    }

    #[test]
    fn test_partial_symbols() {
        let desc = Description::new()
            .with(Field::InputMultiplexer, "in0gnd")
            .with(Field::ProgrammableGainAmplifier, "0.256")
            .with(Field::OperatingMode, "continuousConversion")
            .with(Field::DataRate, "475SPS")
            .with(Field::ComparatorPolarity, "activeHigh")
            .with(Field::ComparatorQueue, "assertAfterFourConversions");
        assert_eq!(pack(&desc, true).unwrap(), RegisterPair::new(0x4a, 0xca));
    }

    #[test]
    fn test_start_conversion_only() {
        let desc = Description::new().with(Field::StartConversion, "startConversion");
        assert_eq!(pack(&desc, true).unwrap(), RegisterPair::new(0x85, 0x83));
    }

    #[test]
    fn test_mixed_codes_and_symbols() {
        let desc = Description::new()
            .with(Field::StartConversion, "startConversion")
            .with(Field::InputMultiplexer, 5)
            .with(Field::ProgrammableGainAmplifier, "0.256_3")
            .with(Field::OperatingMode, 0)
            .with(Field::DataRate, "250SPS")
            .with(Field::ComparatorMode, 0)
            .with(Field::ComparatorPolarity, "activeHigh")
            .with(Field::ComparatorLatching, 1)
            .with(Field::ComparatorQueue, "assertAfterTwoConversions");
        assert_eq!(pack(&desc, true).unwrap(), RegisterPair::new(0xde, 0xad));

        let desc = Description::new()
            .with(Field::StartConversion, 1)
            .with(Field::InputMultiplexer, "in2in3")
            .with(Field::ProgrammableGainAmplifier, 7)
            .with(Field::OperatingMode, "continuousConversion")
            .with(Field::DataRate, 7)
            .with(Field::ComparatorMode, "traditional")
            .with(Field::ComparatorPolarity, 1)
            .with(Field::ComparatorLatching, "latching")
            .with(Field::ComparatorQueue, 3);
        assert_eq!(pack(&desc, true).unwrap(), RegisterPair::new(0xbe, 0xef));
    }

    #[test]
    fn test_strict_unknown_field() {
        let raw: RawDescription = vec![
            ("startConversion", FieldValue::from(0)),
            ("inputMultiplexer", FieldValue::from(0)),
            ("programmableGainAmplifierYY", FieldValue::from(2)),
        ]
        .into_iter()
        .collect();
        let err = pack_raw(&raw, true).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownField("programmableGainAmplifierYY".to_string())
        );
        assert!(err.to_string().contains("unknown field 'programmableGainAmplifierYY'"));
    }

    #[test]
    fn test_strict_invalid_value() {
        let desc = Description::new().with(Field::ProgrammableGainAmplifier, 22);
        let err = pack(&desc, true).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                field: "programmableGainAmplifier".to_string(),
                value: FieldValue::Code(22),
            }
        );
        assert!(err
            .to_string()
            .contains("wrong value for field 'programmableGainAmplifier': '22'"));

        let raw: RawDescription = vec![("inputMultiplexer", "strangeSymbol")].into_iter().collect();
        assert!(pack_raw(&raw, true).is_err());
    }

    #[test]
    fn test_permissive_masks_codes() {
        // 22 = 0b10110, masked to 3 bits -> 0b110
        let desc = Description::new().with(Field::ProgrammableGainAmplifier, 22);
        let pair = pack(&desc, false).unwrap();
        assert_eq!(pair, RegisterPair::new(0x0d, 0x83));

        let desc = Description::new().with(Field::ComparatorQueue, -1);
        assert_eq!(pack(&desc, false).unwrap(), RegisterPair::new(0x05, 0x83));
    }

    #[test]
    fn test_permissive_unknown_symbol_is_zero() {
        let desc = Description::new().with(Field::DataRate, "fast");
        assert_eq!(pack(&desc, false).unwrap(), RegisterPair::new(0x05, 0x03));
    }

    #[test]
    fn test_permissive_ignores_unknown_keys() {
        let raw: RawDescription = vec![
            ("startConversion", FieldValue::from(1)),
            ("notAField", FieldValue::from("x")),
        ]
        .into_iter()
        .collect();
        assert_eq!(pack_raw(&raw, false).unwrap(), RegisterPair::new(0x85, 0x83));
    }

    #[test]
    fn test_repeatable() {
        let desc = Description::new()
            .with(Field::DataRate, 99)
            .with(Field::InputMultiplexer, "in3gnd");
        let first = pack(&desc, false).unwrap();
        let second = pack(&desc, false).unwrap();
        assert_eq!(first, second);
    }
}
