// Compact text forms parsed with nom:
//   descriptions  `inputMultiplexer=in0gnd, dataRate=475SPS programmableGainAmplifier=5`
//   register pair `0x4aca`, `4a ca`, `0x4a,0xca`

use super::error::{FormatError, Result};
use super::json::parse_description;
use crate::codec::RegisterPair;
use crate::config::{FieldValue, RawDescription};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1, take_while_m_n},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, map_res, opt},
    multi::separated_list0,
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};

fn key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// An unquoted token that parses as an integer is a code, anything else a symbol
fn classify(token: &str) -> FieldValue {
    match token.parse::<i64>() {
        Ok(code) => FieldValue::Code(code),
        Err(_) => FieldValue::Symbol(token.to_string()),
    }
}

fn quoted_value(input: &str) -> IResult<&str, FieldValue> {
    map(
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        |symbol: &str| FieldValue::Symbol(symbol.to_string()),
    )
    .parse(input)
}

fn bare_value(input: &str) -> IResult<&str, FieldValue> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != ',' && c != '=' && c != '"'),
        classify,
    )
    .parse(input)
}

fn pair(input: &str) -> IResult<&str, (&str, FieldValue)> {
    separated_pair(
        key,
        delimited(multispace0, char('='), multispace0),
        alt((quoted_value, bare_value)),
    )
    .parse(input)
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((delimited(multispace0, tag(","), multispace0), multispace1)).parse(input)
}

/// Parse `key=value` pairs separated by commas or whitespace
pub fn parse_description_text(text: &str) -> Result<RawDescription> {
    let (_, pairs) = all_consuming(delimited(
        multispace0,
        separated_list0(separator, pair),
        multispace0,
    ))
    .parse(text)
    .map_err(|e| FormatError::Syntax(e.to_string()))?;

    Ok(pairs.into_iter().collect())
}

/// JSON when the input looks like an object, compact text otherwise
pub fn parse_description_any(input: &str) -> Result<RawDescription> {
    if input.trim_start().starts_with('{') {
        parse_description(input)
    } else {
        parse_description_text(input)
    }
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        preceded(opt(tag_no_case("0x")), take_while_m_n(1, 2, is_hex)),
        |digits: &str| u8::from_str_radix(digits, 16),
    )
    .parse(input)
}

fn byte_pair(input: &str) -> IResult<&str, RegisterPair> {
    map(separated_pair(hex_byte, separator, hex_byte), |(high, low)| {
        RegisterPair::new(high, low)
    })
    .parse(input)
}

fn hex_word(input: &str) -> IResult<&str, RegisterPair> {
    map_res(
        preceded(opt(tag_no_case("0x")), take_while_m_n(4, 4, is_hex)),
        |digits: &str| u16::from_str_radix(digits, 16).map(RegisterPair::from_u16),
    )
    .parse(input)
}

/// Parse a register pair written as two hex bytes or one 16-bit hex word
pub fn parse_register_text(text: &str) -> Result<RegisterPair> {
    let (_, pair) = all_consuming(delimited(multispace0, alt((byte_pair, hex_word)), multispace0))
        .parse(text)
        .map_err(|e| FormatError::Syntax(e.to_string()))?;
    Ok(pair)
}

/// Parse one byte: `0x..` is hex, anything else decimal
pub fn parse_byte_text(text: &str) -> Result<u8> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|e| FormatError::Syntax(format!("invalid byte '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::pack_raw;

    #[test]
    fn test_parse_description_text() {
        let raw = parse_description_text(
            "inputMultiplexer=in0gnd, programmableGainAmplifier = 0.256 operatingMode=continuousConversion,\
             dataRate=475SPS comparatorPolarity=activeHigh comparatorQueue=assertAfterFourConversions",
        )
        .unwrap();
        assert_eq!(raw.len(), 6);
        assert_eq!(raw.get("programmableGainAmplifier"), Some(&FieldValue::from("0.256")));
        assert_eq!(pack_raw(&raw, true).unwrap(), RegisterPair::new(0x4a, 0xca));
    }

    #[test]
    fn test_codes_and_quoted_symbols() {
        let raw = parse_description_text(r#"inputMultiplexer=5 comparatorQueue=-1 dataRate="8SPS""#)
            .unwrap();
        assert_eq!(raw.get("inputMultiplexer"), Some(&FieldValue::Code(5)));
        assert_eq!(raw.get("comparatorQueue"), Some(&FieldValue::Code(-1)));
        assert_eq!(raw.get("dataRate"), Some(&FieldValue::from("8SPS")));

        let raw = parse_description_text(r#"dataRate="7""#).unwrap();
        assert_eq!(raw.get("dataRate"), Some(&FieldValue::from("7")));
    }

    #[test]
    fn test_keeps_key_order_and_unknown_keys() {
        let raw = parse_description_text("zeta=1 dataRate=8SPS").unwrap();
        let keys: Vec<&str> = raw.keys().collect();
        assert_eq!(keys, vec!["zeta", "dataRate"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_description_text("").unwrap().is_empty());
        assert!(parse_description_text("   ").unwrap().is_empty());
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_description_text("dataRate").is_err());
        assert!(parse_description_text("dataRate=").is_err());
        assert!(parse_description_text("=8SPS").is_err());
        assert!(parse_description_text("dataRate=8SPS,,").is_err());
    }

    #[test]
    fn test_any_dispatch() {
        let raw = parse_description_any(r#" {"dataRate": 3}"#).unwrap();
        assert_eq!(raw.get("dataRate"), Some(&FieldValue::Code(3)));
        let raw = parse_description_any("dataRate=3").unwrap();
        assert_eq!(raw.get("dataRate"), Some(&FieldValue::Code(3)));
    }

    #[test]
    fn test_register_text() {
        let expected = RegisterPair::new(0x4a, 0xca);
        for text in ["0x4aca", "4aca", "4a ca", "0x4a 0xca", "0x4A,0xCA", " 4a , ca "] {
            assert_eq!(parse_register_text(text).unwrap(), expected, "{}", text);
        }
        assert_eq!(parse_register_text("5 83").unwrap(), RegisterPair::new(0x05, 0x83));
        assert!(parse_register_text("0x4acab").is_err());
        assert!(parse_register_text("4a").is_err());
        assert!(parse_register_text("zz zz").is_err());
    }

    #[test]
    fn test_byte_text() {
        assert_eq!(parse_byte_text("0x4a").unwrap(), 0x4a);
        assert_eq!(parse_byte_text("202").unwrap(), 0xca);
        assert!(parse_byte_text("256").is_err());
        assert!(parse_byte_text("0xg1").is_err());
    }
}
