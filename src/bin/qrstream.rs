//! qrstream CLI - decode QR payload bit streams from the command line.
//!
//! Operates on error-corrected payload codewords (the bytes left after
//! Reed-Solomon decoding), not on images.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use qrstream_rs::{DecodeOptions, Mode, Version, decode_bit_stream};

/// QR payload bit-stream decoder
#[derive(Parser)]
#[command(name = "qrstream")]
#[command(version)]
#[command(about = "Decode QR payload bit streams into text", long_about = None)]
#[command(after_help = "EXAMPLES:
    qrstream decode --hex 10083b74 --symbol-version 1
    qrstream decode --input payload.bin --symbol-version 7 --show-segments
    qrstream info --symbol-version 12

The payload must be the corrected data codewords of one symbol; acquiring
the symbol and running error correction happen upstream.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an error-corrected payload to text
    #[command(visible_alias = "d")]
    Decode {
        /// Payload codewords as a hex string
        #[arg(short = 'x', long, conflicts_with = "input")]
        hex: Option<String>,

        /// File holding the raw payload bytes
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Symbol version (1-40); selects character count field widths
        #[arg(short = 's', long, default_value = "1")]
        symbol_version: u8,

        /// Treat ambiguous byte segments as Shift_JIS (Japanese locales)
        #[arg(long)]
        assume_shift_jis: bool,

        /// Also print each raw byte segment as hex
        #[arg(long)]
        show_segments: bool,
    },

    /// Print the mode table and count field widths for a version
    #[command(visible_alias = "i")]
    Info {
        /// Symbol version (1-40)
        #[arg(short = 's', long, default_value = "1")]
        symbol_version: u8,
    },
}

fn main() {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Decode {
            hex,
            input,
            symbol_version,
            assume_shift_jis,
            show_segments,
        } => run_decode(hex, input, symbol_version, assume_shift_jis, show_segments),
        Commands::Info { symbol_version } => run_info(symbol_version),
    };

    if let Err(message) = outcome {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run_decode(
    hex: Option<String>,
    input: Option<PathBuf>,
    symbol_version: u8,
    assume_shift_jis: bool,
    show_segments: bool,
) -> Result<(), String> {
    let payload = match (hex, input) {
        (Some(hex), None) => parse_hex(&hex)?,
        (None, Some(path)) => {
            fs::read(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))?
        }
        _ => return Err("provide exactly one of --hex or --input".into()),
    };

    let version = Version::new(symbol_version).map_err(|e| e.to_string())?;
    let options = DecodeOptions { assume_shift_jis };
    let result = decode_bit_stream(&payload, version, options).map_err(|e| e.to_string())?;

    println!("{}", result.text);
    if show_segments {
        eprintln!(
            "byte segments: {}, eci designator: {}",
            result.byte_segments.len(),
            if result.eci_seen { "yes" } else { "no" }
        );
        for (index, segment) in result.byte_segments.iter().enumerate() {
            eprintln!("  [{index}] {} bytes: {}", segment.len(), to_hex(segment));
        }
    }
    Ok(())
}

fn run_info(symbol_version: u8) -> Result<(), String> {
    let version = Version::new(symbol_version).map_err(|e| e.to_string())?;
    println!("symbol version {}", version.number());
    println!("mode            indicator  count bits");
    for (name, mode) in [
        ("numeric", Mode::Numeric),
        ("alphanumeric", Mode::Alphanumeric),
        ("byte", Mode::Byte),
        ("kanji", Mode::Kanji),
    ] {
        println!(
            "{name:<15} {:04b}       {}",
            mode as u8,
            mode.character_count_bits(version)
        );
    }
    Ok(())
}

fn parse_hex(hex: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err("hex payload must have an even number of digits".into());
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits at offset {i}"))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
