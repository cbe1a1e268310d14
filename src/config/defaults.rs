// Power-on default configuration of the device

use super::description::Description;
use crate::codec::RegisterPair;
use crate::registry::Field;

/// Register encoding of the default configuration
pub const DEFAULT_REGISTER: RegisterPair = RegisterPair {
    high_byte: 0x05,
    low_byte: 0x83,
};

lazy_static::lazy_static! {
    /// Canonical default configuration, as symbols
    pub static ref DEFAULT_CONFIGURATION: Description = Description::new()
        .with(Field::StartConversion, "doNothing")
        .with(Field::InputMultiplexer, "in0in1")
        .with(Field::ProgrammableGainAmplifier, "2.048")
        .with(Field::OperatingMode, "singleShot")
        .with(Field::DataRate, "128SPS")
        .with(Field::ComparatorMode, "traditional")
        .with(Field::ComparatorPolarity, "activeLow")
        .with(Field::ComparatorLatching, "nonLatching")
        .with(Field::ComparatorQueue, "disabled");
}

/// Fresh copy of the default configuration
pub fn clone_default() -> Description {
    DEFAULT_CONFIGURATION.clone()
}

/// Fresh copy of `source`, or of the default configuration when None
pub fn clone_description(source: Option<&Description>) -> Description {
    source.unwrap_or(&DEFAULT_CONFIGURATION).clone()
}
