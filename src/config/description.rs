// Configuration descriptions: typed record and open keyed bag

use super::error::{ConfigError, Result};
use super::validator::resolve_code;
use crate::registry::{code_to_symbol, Field};
use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A field value: either a symbol name or a numeric code.
///
/// Deserializes from a string or from any JSON number with no fractional
/// part, so `4` and `4.0` both read as code 4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Code(i64),
    Symbol(String),
}

impl FieldValue {
    pub fn is_code(&self) -> bool {
        matches!(self, FieldValue::Code(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, FieldValue::Symbol(_))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            FieldValue::Symbol(s) => Some(s),
            FieldValue::Code(_) => None,
        }
    }

    pub fn as_code(&self) -> Option<i64> {
        match self {
            FieldValue::Code(c) => Some(*c),
            FieldValue::Symbol(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a symbol name or an integral code")
            }

            fn visit_i64<E: de::Error>(self, code: i64) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Code(code))
            }

            fn visit_u64<E: de::Error>(self, code: u64) -> std::result::Result<Self::Value, E> {
                i64::try_from(code)
                    .map(FieldValue::Code)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(code), &self))
            }

            fn visit_f64<E: de::Error>(self, code: f64) -> std::result::Result<Self::Value, E> {
                if code.fract() == 0.0 && code >= i64::MIN as f64 && code < i64::MAX as f64 {
                    Ok(FieldValue::Code(code as i64))
                } else {
                    Err(E::invalid_value(Unexpected::Float(code), &self))
                }
            }

            fn visit_str<E: de::Error>(self, symbol: &str) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Symbol(symbol.to_string()))
            }

            fn visit_string<E: de::Error>(self, symbol: String) -> std::result::Result<Self::Value, E> {
                Ok(FieldValue::Symbol(symbol))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Code(code) => write!(f, "{}", code),
            FieldValue::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(symbol: &str) -> Self {
        FieldValue::Symbol(symbol.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(symbol: String) -> Self {
        FieldValue::Symbol(symbol)
    }
}

impl From<i64> for FieldValue {
    fn from(code: i64) -> Self {
        FieldValue::Code(code)
    }
}

impl From<i32> for FieldValue {
    fn from(code: i32) -> Self {
        FieldValue::Code(code as i64)
    }
}

impl From<u8> for FieldValue {
    fn from(code: u8) -> Self {
        FieldValue::Code(code as i64)
    }
}

/// A configuration description with one optional slot per register field.
///
/// A description may be partial (any subset of fields) or full (all nine).
/// `Default` is the empty description; the canonical device default lives in
/// [`crate::config::defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Description {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_conversion: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_multiplexer: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programmable_gain_amplifier: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_mode: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_mode: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_polarity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_latching: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_queue: Option<FieldValue>,
}

impl Description {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: Field) -> &Option<FieldValue> {
        match field {
            Field::StartConversion => &self.start_conversion,
            Field::InputMultiplexer => &self.input_multiplexer,
            Field::ProgrammableGainAmplifier => &self.programmable_gain_amplifier,
            Field::OperatingMode => &self.operating_mode,
            Field::DataRate => &self.data_rate,
            Field::ComparatorMode => &self.comparator_mode,
            Field::ComparatorPolarity => &self.comparator_polarity,
            Field::ComparatorLatching => &self.comparator_latching,
            Field::ComparatorQueue => &self.comparator_queue,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<FieldValue> {
        match field {
            Field::StartConversion => &mut self.start_conversion,
            Field::InputMultiplexer => &mut self.input_multiplexer,
            Field::ProgrammableGainAmplifier => &mut self.programmable_gain_amplifier,
            Field::OperatingMode => &mut self.operating_mode,
            Field::DataRate => &mut self.data_rate,
            Field::ComparatorMode => &mut self.comparator_mode,
            Field::ComparatorPolarity => &mut self.comparator_polarity,
            Field::ComparatorLatching => &mut self.comparator_latching,
            Field::ComparatorQueue => &mut self.comparator_queue,
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    /// Set a field, returning the previous value
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.slot_mut(field).replace(value.into())
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldValue> {
        self.slot_mut(field).take()
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Present fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when all nine fields are present
    pub fn is_full(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_some())
    }

    /// Convert into an open keyed bag, keys in declaration order
    pub fn to_raw(&self) -> RawDescription {
        self.iter()
            .map(|(field, value)| (field.name(), value.clone()))
            .collect()
    }

    /// Express every present value as a numeric code
    pub fn to_codes(&self) -> Result<Description> {
        let mut out = Description::new();
        for (field, value) in self.iter() {
            let code = resolve_code(field, value)
                .ok_or_else(|| ConfigError::invalid_value(field.name(), value))?;
            out.set(field, code);
        }
        Ok(out)
    }

    /// Express every present value as a symbol
    pub fn to_symbols(&self) -> Result<Description> {
        let mut out = Description::new();
        for (field, value) in self.iter() {
            let symbol = resolve_code(field, value)
                .and_then(|code| code_to_symbol(field, code as i64))
                .ok_or_else(|| ConfigError::invalid_value(field.name(), value))?;
            out.set(field, symbol);
        }
        Ok(out)
    }
}

impl TryFrom<&RawDescription> for Description {
    type Error = ConfigError;

    /// Fails on the first key, in the bag's own order, that is not a field name.
    /// Values are copied unchecked.
    fn try_from(raw: &RawDescription) -> Result<Self> {
        let mut description = Description::new();
        for (key, value) in raw.iter() {
            let field = Field::from_name(key)
                .ok_or_else(|| ConfigError::UnknownField(key.to_string()))?;
            description.set(field, value.clone());
        }
        Ok(description)
    }
}

impl TryFrom<RawDescription> for Description {
    type Error = ConfigError;

    fn try_from(raw: RawDescription) -> Result<Self> {
        Description::try_from(&raw)
    }
}

/// Open keyed bag of `key -> value` pairs, kept in insertion order.
///
/// Keys are not required to be field names; this is what the runtime
/// validator inspects, and its order decides which failure is reported first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDescription {
    entries: Vec<(String, FieldValue)>,
}

impl RawDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RawDescription {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = RawDescription::new();
        for (key, value) in iter {
            raw.insert(key, value);
        }
        raw
    }
}

impl From<&Description> for RawDescription {
    fn from(description: &Description) -> Self {
        description.to_raw()
    }
}

impl Serialize for RawDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawDescription;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to symbols or codes")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut raw = RawDescription::new();
                while let Some((key, value)) = map.next_entry::<String, FieldValue>()? {
                    raw.insert(key, value);
                }
                Ok(raw)
            }
        }

        deserializer.deserialize_map(RawVisitor)
    }
}
