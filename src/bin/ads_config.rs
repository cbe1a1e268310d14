//! ADS1115 configuration register tool
//! Packs descriptions into register bytes, unpacks register bytes and edits descriptions by symbol

use ads1115_config::addressing::{pointer_register, slave_address_from_index};
use ads1115_config::codec::{pack, pack_raw, unpack, unpack_symbols, RawRegisterPair, RegisterPair};
use ads1115_config::config::{apply, check_values, clone_default, Description, RawDescription};
use ads1115_config::formats::{
    description_to_json, load_description, parse_byte_text, parse_description_any,
};
use std::env;
use std::path::Path;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!("\nCommands:");
    eprintln!("  pack <description> [--strict]      Pack a description into register bytes");
    eprintln!("  unpack <high> <low> [--json]       Unpack register bytes into symbols");
    eprintln!("  alter <description> <symbol>...    Apply symbols on top of the default");
    eprintln!("  address <pin> [read|write]         I2C slave address for ADDR pin 0-3");
    eprintln!("  pointer <register>                 Pointer register selector byte");
    eprintln!("\n<description> is a JSON file, inline JSON, or text such as");
    eprintln!("  \"inputMultiplexer=in0gnd dataRate=475SPS programmableGainAmplifier=5\"");
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ads-config");
    let flags: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| a.starts_with("--"))
        .map(String::as_str)
        .collect();
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let Some((command, rest)) = positional.split_first() else {
        usage(program);
    };
    if let Some(flag) = unknown_flag(&flags) {
        eprintln!("Unknown flag: {}\n", flag);
        usage(program);
    }

    match *command {
        "pack" => {
            let input = rest.first().copied().unwrap_or_else(|| usage(program));
            let strict = flags.contains(&"--strict");
            let raw = read_description(input)?;
            let pair = pack_raw(&raw, strict)?;
            print_pair(&pair);
        }
        "unpack" => {
            if rest.len() != 2 {
                usage(program);
            }
            let raw = RawRegisterPair::new(
                Some(parse_byte_text(rest[0])?),
                Some(parse_byte_text(rest[1])?),
            );
            let symbols = unpack_symbols(raw);
            if flags.contains(&"--json") {
                println!("{}", description_to_json(&symbols)?);
            } else {
                print_description(&symbols, &unpack(raw));
            }
        }
        "alter" => {
            let (input, symbols) = rest.split_first().unwrap_or_else(|| usage(program));
            let raw = read_description(input)?;
            check_values(&raw)?;

            let mut target = clone_default();
            for (field, value) in Description::try_from(&raw)?.iter() {
                target.set(field, value.clone());
            }
            apply(symbols, &mut target)?;

            let pair = pack(&target, true)?;
            println!("{}", description_to_json(&target)?);
            print_pair(&pair);
        }
        "address" => {
            let pin: i64 = rest
                .first()
                .unwrap_or_else(|| usage(program))
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("invalid pin: {}", e))?;
            let for_reading = match rest.get(1).copied() {
                None | Some("write") => false,
                Some("read") => true,
                Some(other) => anyhow::bail!("expected 'read' or 'write', got '{}'", other),
            };
            let addr = slave_address_from_index(pin, for_reading)?;
            println!("{:#04x} ({})", addr, addr);
        }
        "pointer" => {
            let name = rest.first().copied().unwrap_or_else(|| usage(program));
            println!("{:#04x}", pointer_register(name)?);
        }
        _ => usage(program),
    }

    Ok(())
}

const KNOWN_FLAGS: [&str; 2] = ["--strict", "--json"];

fn unknown_flag<'a>(flags: &[&'a str]) -> Option<&'a str> {
    flags
        .iter()
        .copied()
        .find(|flag| !KNOWN_FLAGS.iter().any(|known| known == flag))
}

/// Load from a file when `input` names one, otherwise parse it inline
fn read_description(input: &str) -> anyhow::Result<RawDescription> {
    if Path::new(input).is_file() {
        tracing::debug!("Reading description from {}", input);
        Ok(load_description(input)?)
    } else {
        Ok(parse_description_any(input)?)
    }
}

fn print_pair(pair: &RegisterPair) {
    println!("High byte:  {:#04x}", pair.high_byte);
    println!("Low byte:   {:#04x}", pair.low_byte);
    println!("Register:   {:#06x}", pair.to_u16());
}

fn print_description(symbols: &Description, codes: &Description) {
    for ((field, symbol), (_, code)) in symbols.iter().zip(codes.iter()) {
        println!("  {:<28} {:<28} ({})", field.name(), symbol.to_string(), code);
    }
}
