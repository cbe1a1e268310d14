// JSON form of descriptions and register pairs

use super::error::Result;
use crate::codec::RawRegisterPair;
use crate::config::{Description, RawDescription};
use std::fs;
use std::path::Path;

/// Parse a JSON object into an open description, keeping key order
pub fn parse_description(json: &str) -> Result<RawDescription> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON object into a typed description; unknown keys are reported by name
pub fn parse_typed_description(json: &str) -> Result<Description> {
    let raw = parse_description(json)?;
    Ok(Description::try_from(&raw)?)
}

pub fn description_to_json(description: &Description) -> Result<String> {
    Ok(serde_json::to_string_pretty(description)?)
}

/// Load a description from a JSON file
pub fn load_description(path: impl AsRef<Path>) -> Result<RawDescription> {
    let text = fs::read_to_string(path)?;
    parse_description(&text)
}

/// Save a description to a JSON file
pub fn save_description(path: impl AsRef<Path>, description: &Description) -> Result<()> {
    fs::write(path, description_to_json(description)?)?;
    Ok(())
}

/// Parse any JSON value as a register pair.
/// Missing or malformed bytes are left unset rather than rejected.
pub fn parse_register_pair(json: &str) -> Result<RawRegisterPair> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(RawRegisterPair::from(&value))
}
