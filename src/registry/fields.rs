// Configuration register field catalog
// Bit layout of the 16-bit ADS1115 config register, split into high and low bytes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two register bytes a field lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterByte {
    High,
    Low,
}

/// The nine fields of the configuration register, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StartConversion,
    InputMultiplexer,
    ProgrammableGainAmplifier,
    OperatingMode,
    DataRate,
    ComparatorMode,
    ComparatorPolarity,
    ComparatorLatching,
    ComparatorQueue,
}

impl Field {
    /// All fields in declaration order. Symbol resolution scans in this order.
    pub const ALL: [Field; 9] = [
        Field::StartConversion,
        Field::InputMultiplexer,
        Field::ProgrammableGainAmplifier,
        Field::OperatingMode,
        Field::DataRate,
        Field::ComparatorMode,
        Field::ComparatorPolarity,
        Field::ComparatorLatching,
        Field::ComparatorQueue,
    ];

    /// Get the static layout for this field
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    /// Get the camelCase name used in descriptions
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look up a field by its description key
    pub fn from_name(name: &str) -> Option<Field> {
        FIELDS.iter().find(|spec| spec.name == name).map(|spec| spec.field)
    }

    pub fn symbols(self) -> &'static [&'static str] {
        self.spec().symbols
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static description of one field: its symbols and where its bits go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    /// Symbol list; the index of a symbol is its code
    pub symbols: &'static [&'static str],
    pub byte: RegisterByte,
    pub shift: u8,
}

impl FieldSpec {
    /// Number of bits needed to hold every code: ceil(log2(symbols.len()))
    pub const fn width(&self) -> u8 {
        let count = self.symbols.len() as u32;
        if count <= 1 {
            0
        } else {
            (u32::BITS - (count - 1).leading_zeros()) as u8
        }
    }

    /// Mask of `width()` low bits
    pub const fn mask(&self) -> u8 {
        ((1u16 << self.width() as u32) - 1) as u8
    }

    /// Bits this field occupies within its byte
    pub const fn byte_mask(&self) -> u8 {
        self.mask() << self.shift
    }

    pub fn code_of(&self, symbol: &str) -> Option<u8> {
        self.symbols
            .iter()
            .position(|s| *s == symbol)
            .map(|idx| idx as u8)
    }

    pub fn symbol_of(&self, code: u8) -> Option<&'static str> {
        self.symbols.get(code as usize).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol)
    }
}

pub const START_CONVERSION_SYMBOLS: &[&str] = &["doNothing", "startConversion"];

pub const INPUT_MULTIPLEXER_SYMBOLS: &[&str] = &[
    "in0in1", "in0in3", "in1in3", "in2in3", "in0gnd", "in1gnd", "in2gnd", "in3gnd",
];

/// Full-scale range in volts; codes 6 and 7 repeat the 0.256 V range
pub const PROGRAMMABLE_GAIN_SYMBOLS: &[&str] = &[
    "6.144", "4.096", "2.048", "1.024", "0.512", "0.256", "0.256_2", "0.256_3",
];

pub const OPERATING_MODE_SYMBOLS: &[&str] = &["continuousConversion", "singleShot"];

pub const DATA_RATE_SYMBOLS: &[&str] = &[
    "8SPS", "16SPS", "32SPS", "64SPS", "128SPS", "250SPS", "475SPS", "860SPS",
];

pub const COMPARATOR_MODE_SYMBOLS: &[&str] = &["traditional", "window"];

pub const COMPARATOR_POLARITY_SYMBOLS: &[&str] = &["activeLow", "activeHigh"];

pub const COMPARATOR_LATCHING_SYMBOLS: &[&str] = &["nonLatching", "latching"];

pub const COMPARATOR_QUEUE_SYMBOLS: &[&str] = &[
    "assertAfterOneConversion",
    "assertAfterTwoConversions",
    "assertAfterFourConversions",
    "disabled",
];

/// Field table, indexed by `Field as usize`
pub static FIELDS: [FieldSpec; 9] = [
    FieldSpec {
        field: Field::StartConversion,
        name: "startConversion",
        symbols: START_CONVERSION_SYMBOLS,
        byte: RegisterByte::High,
        shift: 7,
    },
    FieldSpec {
        field: Field::InputMultiplexer,
        name: "inputMultiplexer",
        symbols: INPUT_MULTIPLEXER_SYMBOLS,
        byte: RegisterByte::High,
        shift: 4,
    },
    FieldSpec {
        field: Field::ProgrammableGainAmplifier,
        name: "programmableGainAmplifier",
        symbols: PROGRAMMABLE_GAIN_SYMBOLS,
        byte: RegisterByte::High,
        shift: 1,
    },
    FieldSpec {
        field: Field::OperatingMode,
        name: "operatingMode",
        symbols: OPERATING_MODE_SYMBOLS,
        byte: RegisterByte::High,
        shift: 0,
    },
    FieldSpec {
        field: Field::DataRate,
        name: "dataRate",
        symbols: DATA_RATE_SYMBOLS,
        byte: RegisterByte::Low,
        shift: 5,
    },
    FieldSpec {
        field: Field::ComparatorMode,
        name: "comparatorMode",
        symbols: COMPARATOR_MODE_SYMBOLS,
        byte: RegisterByte::Low,
        shift: 4,
    },
    FieldSpec {
        field: Field::ComparatorPolarity,
        name: "comparatorPolarity",
        symbols: COMPARATOR_POLARITY_SYMBOLS,
        byte: RegisterByte::Low,
        shift: 3,
    },
    FieldSpec {
        field: Field::ComparatorLatching,
        name: "comparatorLatching",
        symbols: COMPARATOR_LATCHING_SYMBOLS,
        byte: RegisterByte::Low,
        shift: 2,
    },
    FieldSpec {
        field: Field::ComparatorQueue,
        name: "comparatorQueue",
        symbols: COMPARATOR_QUEUE_SYMBOLS,
        byte: RegisterByte::Low,
        shift: 0,
    },
];

/// Validate a field name
pub fn is_valid_field(name: &str) -> bool {
    Field::from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (idx, field) in Field::ALL.iter().enumerate() {
            assert_eq!(FIELDS[idx].field, *field);
            assert_eq!(field.spec().field, *field);
        }
    }

    #[test]
    fn test_widths() {
        let widths: Vec<u8> = Field::ALL.iter().map(|f| f.spec().width()).collect();
        assert_eq!(widths, vec![1, 3, 3, 1, 3, 1, 1, 1, 2]);
    }

    #[test]
    fn test_bytes_fully_and_disjointly_covered() {
        for byte in [RegisterByte::High, RegisterByte::Low] {
            let mut covered = 0u8;
            for spec in FIELDS.iter().filter(|s| s.byte == byte) {
                assert!(spec.width() + spec.shift <= 8, "{} overflows its byte", spec.name);
                assert_eq!(covered & spec.byte_mask(), 0, "{} overlaps", spec.name);
                covered |= spec.byte_mask();
            }
            assert_eq!(covered, 0xFF, "{:?} byte not fully covered", byte);
        }
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(Field::from_name("dataRate"), Some(Field::DataRate));
        assert_eq!(Field::from_name("DataRate"), None);
        assert!(is_valid_field("comparatorQueue"));
        assert!(!is_valid_field("programmableGainAmplifierYY"));
        assert_eq!(Field::InputMultiplexer.to_string(), "inputMultiplexer");
    }

    #[test]
    fn test_symbol_codes() {
        let pga = Field::ProgrammableGainAmplifier.spec();
        assert_eq!(pga.code_of("2.048"), Some(2));
        assert_eq!(pga.code_of("0.256_3"), Some(7));
        assert_eq!(pga.code_of("0.128"), None);
        assert_eq!(pga.symbol_of(5), Some("0.256"));
        assert_eq!(pga.symbol_of(8), None);

        let queue = Field::ComparatorQueue.spec();
        assert_eq!(queue.code_of("disabled"), Some(3));
        assert_eq!(queue.mask(), 0b11);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Field::ProgrammableGainAmplifier).unwrap();
        assert_eq!(json, "\"programmableGainAmplifier\"");
        let field: Field = serde_json::from_str("\"comparatorLatching\"").unwrap();
        assert_eq!(field, Field::ComparatorLatching);
    }
}
