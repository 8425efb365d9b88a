//! # EncodingLoss CLI - Re-encoding Data Loss Checker
//!
//! Command-line interface for finding the characters a file would lose when
//! converted to another character encoding.

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use tracing::{debug, info};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use encoding_loss::{Codec, Diagnoser, Encoding, LossChunk, StandardCodec, sub_string_wrap};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// EncodingLoss: find characters that would not survive re-encoding
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "encoding-loss")]
#[command(version, about, long_about = None)]
#[command(author = "EncodingLoss Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Character written for anything the target cannot represent (ASCII only)
    #[arg(long, global = true, default_value = "?")]
    substitute: char,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Report the characters lost when converting between encodings
    Diagnose(DiagnoseArgs),

    /// Print the input with every lossy substring wrapped in markers
    Wrap(WrapArgs),

    /// List all supported encodings
    List(ListArgs),

    /// Validate that a file is properly encoded
    Validate(ValidateArgs),

    /// Display detailed information about an encoding
    Info(InfoArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConversionArgs {
    /// Source encoding
    #[arg(short = 'f', long = "from")]
    from: Encoding,

    /// Target encoding
    #[arg(short = 't', long = "to")]
    to: Encoding,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct DiagnoseArgs {
    #[command(flatten)]
    conversion: ConversionArgs,

    /// Exit with status 1 when any loss is found
    #[arg(long)]
    fail_on_loss: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct WrapArgs {
    #[command(flatten)]
    conversion: ConversionArgs,

    /// Marker inserted before each lossy substring
    #[arg(long, default_value = "[[")]
    pre: String,

    /// Marker inserted after each lossy substring
    #[arg(long, default_value = "]]")]
    post: String,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ListArgs {
    /// Show only ASCII-compatible encodings
    #[arg(long)]
    ascii_compatible: bool,

    /// Show only multibyte encodings
    #[arg(long)]
    multibyte: bool,

    /// Show encoding details
    #[arg(long)]
    details: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ValidateArgs {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Expected encoding
    #[arg(short, long)]
    encoding: Encoding,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct InfoArgs {
    /// Encoding to describe
    encoding: Encoding,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct DiagnosisReport<'a> {
    from: &'static str,
    to: &'static str,
    characters: usize,
    lossless: bool,
    chunks: &'a [LossChunk],
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Diagnose(ref args) => diagnose_command(args, &cli)?,
        Commands::Wrap(ref args) => wrap_command(args, &cli)?,
        Commands::List(ref args) => list_command(args, &cli)?,
        Commands::Validate(ref args) => validate_command(args, &cli)?,
        Commands::Info(ref args) => info_command(args, &cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "encoding_loss=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded in a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(feature = "cli")]
fn read_input(input: &Option<PathBuf>) -> Result<Vec<u8>> {
    if let Some(input_path) = input {
        debug!("Reading from: {}", input_path.display());
        fs::read(input_path)
            .with_context(|| format!("Failed to read input file: {}", input_path.display()))
    } else {
        debug!("Reading from stdin");
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    }
}

#[cfg(feature = "cli")]
fn build_diagnoser(args: &ConversionArgs, cli: &Cli) -> Result<Diagnoser> {
    let codec = StandardCodec::new().with_substitute(cli.substitute)?;
    Diagnoser::with_codec(codec, args.from.name(), args.to.name()).with_context(|| {
        format!(
            "Failed to create diagnoser from {} to {}",
            args.from.name(),
            args.to.name()
        )
    })
}

#[cfg(feature = "cli")]
fn diagnose_command(args: &DiagnoseArgs, cli: &Cli) -> Result<()> {
    let start_time = std::time::Instant::now();
    let conversion = &args.conversion;

    let diagnoser = build_diagnoser(conversion, cli)?;
    let input_data = read_input(&conversion.input)?;

    let chunks = diagnoser
        .diagnose(&input_data)
        .with_context(|| format!("Input is not valid {}", conversion.from.name()))?;

    let characters = diagnoser
        .codec()
        .decode_from(&input_data, conversion.from)
        .chars()
        .count();

    info!(
        bytes = input_data.len(),
        chunks = chunks.len(),
        elapsed = ?start_time.elapsed(),
        "Diagnosed {} -> {}",
        conversion.from.name(),
        conversion.to.name()
    );

    match cli.format {
        OutputFormat::Json => {
            let report = DiagnosisReport {
                from: conversion.from.name(),
                to: conversion.to.name(),
                characters,
                lossless: chunks.is_empty(),
                chunks: &chunks,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if chunks.is_empty() {
                println!(
                    "✓ No data loss converting {} to {}",
                    conversion.from.name(),
                    conversion.to.name()
                );
            } else {
                let lost: usize = chunks.iter().map(|chunk| chunk.length).sum();
                println!(
                    "✗ {} of {} characters would be lost converting {} to {}",
                    lost,
                    characters,
                    conversion.from.name(),
                    conversion.to.name()
                );
                for chunk in &chunks {
                    println!(
                        "  position {:>6}  length {:>4}  {:?}",
                        chunk.start_pos, chunk.length, chunk.characters
                    );
                }
            }
        }
    }

    if args.fail_on_loss && !chunks.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn wrap_command(args: &WrapArgs, cli: &Cli) -> Result<()> {
    let conversion = &args.conversion;

    let diagnoser = build_diagnoser(conversion, cli)?;
    let input_data = read_input(&conversion.input)?;

    let chunks = diagnoser
        .diagnose(&input_data)
        .with_context(|| format!("Input is not valid {}", conversion.from.name()))?;

    let text = diagnoser.codec().decode_from(&input_data, conversion.from);
    let marked = sub_string_wrap(&text, &chunks, &args.pre, &args.post);

    match cli.format {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "from": conversion.from.name(),
                "to": conversion.to.name(),
                "chunks": chunks,
                "text": marked,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => print!("{}", marked),
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn list_command(args: &ListArgs, cli: &Cli) -> Result<()> {
    let filtered_encodings: Vec<Encoding> = Encoding::ALL
        .into_iter()
        .filter(|encoding| !args.ascii_compatible || encoding.is_ascii_compatible())
        .filter(|encoding| !args.multibyte || encoding.is_multibyte())
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let encodings_info: Vec<_> = filtered_encodings
                .iter()
                .map(|encoding| encoding_json(*encoding))
                .collect();
            println!("{}", serde_json::to_string_pretty(&encodings_info)?);
        }
        OutputFormat::Text => {
            println!("Supported Encodings ({} total):", filtered_encodings.len());
            println!();

            for encoding in filtered_encodings {
                println!("{:15} {}", encoding.name(), get_encoding_description(encoding));

                if args.details {
                    print_details(encoding, "                ");
                    println!();
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn validate_command(args: &ValidateArgs, _cli: &Cli) -> Result<()> {
    let input_data = read_input(&args.input)?;
    let codec = StandardCodec::new();

    match codec.validate(&input_data, args.encoding.name()) {
        Ok(()) => {
            println!("✓ File is valid {}", args.encoding.name());
            std::process::exit(0);
        }
        Err(e) => {
            println!("✗ File is not valid {}", args.encoding.name());
            debug!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn info_command(args: &InfoArgs, cli: &Cli) -> Result<()> {
    let encoding = args.encoding;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&encoding_json(encoding))?);
        }
        OutputFormat::Text => {
            println!("Encoding Information: {}", encoding.name());
            println!("Description: {}", get_encoding_description(encoding));
            print_details(encoding, "");
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn encoding_json(encoding: Encoding) -> serde_json::Value {
    serde_json::json!({
        "name": encoding.name(),
        "description": get_encoding_description(encoding),
        "ascii_compatible": encoding.is_ascii_compatible(),
        "multibyte": encoding.is_multibyte(),
        "unicode": encoding.is_unicode(),
        "bom": encoding.bom().map(|b| format!("{:02X?}", b)),
    })
}

#[cfg(feature = "cli")]
fn print_details(encoding: Encoding, indent: &str) {
    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

    println!("{}ASCII Compatible: {}", indent, yes_no(encoding.is_ascii_compatible()));
    println!("{}Multibyte: {}", indent, yes_no(encoding.is_multibyte()));
    println!("{}Lossless for any text: {}", indent, yes_no(encoding.is_unicode()));
    match encoding.bom() {
        Some(bom) => println!("{}BOM: {:02X?}", indent, bom),
        None => println!("{}BOM: None", indent),
    }
}

#[cfg(feature = "cli")]
fn get_encoding_description(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::UTF8 => "Unicode Transformation Format 8-bit, variable-length encoding",
        Encoding::UTF16LE => "Unicode Transformation Format 16-bit, little-endian",
        Encoding::UTF16BE => "Unicode Transformation Format 16-bit, big-endian",
        Encoding::ASCII => "American Standard Code for Information Interchange (7-bit)",
        Encoding::ISO_8859_1 => "Latin alphabet No. 1, Western European",
        Encoding::ISO_8859_15 => "Latin alphabet No. 9, Western European with Euro symbol",
        Encoding::WINDOWS_1250 => "Windows code page for Central and Eastern European languages",
        Encoding::WINDOWS_1251 => "Windows code page for Cyrillic scripts",
        Encoding::WINDOWS_1252 => "Windows code page for Western European languages",
        Encoding::CP_866 => "DOS code page for Russian",
        Encoding::MAC_ROMAN => "Classic Macintosh Roman character encoding",
        Encoding::SHIFT_JIS => "Japanese double-byte encoding used on Windows",
        Encoding::EUC_JP => "Japanese Extended Unix Code",
        Encoding::ISO_2022_JP => "Stateful 7-bit Japanese encoding used in email",
        Encoding::GBK => "Simplified Chinese, extension of GB2312",
        Encoding::GB18030 => "Simplified Chinese national standard covering all of Unicode",
        Encoding::BIG5 => "Traditional Chinese double-byte encoding",
        Encoding::EUC_KR => "Korean Extended Unix Code",
        _ => "Character encoding for specific language/regional support",
    }
}
