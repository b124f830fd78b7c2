// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod input;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use safeparcel::{
    payload, CodecConfig, CreatorRegistry, EnvelopeEntries, ParcelReader, TYPE_TOKEN_FIELD_ID,
};
use std::path::{Path, PathBuf};

/// Payload bytes shown per entry by `inspect`.
const PREVIEW_BYTES: usize = 16;

#[derive(Parser)]
#[command(name = "parcel-dump")]
#[command(about = "Inspect and decode captured SafeParcel envelopes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the raw entries of an envelope
    Inspect {
        /// Captured envelope
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Decode an envelope with the built-in payload types
    Decode {
        /// Captured envelope
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Type token (required for untagged envelopes)
        #[arg(short, long)]
        token: Option<String>,

        /// Report missing required fields and token mismatches
        #[arg(long)]
        strict: bool,

        /// Codec configuration YAML
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// List registered type tokens and their fields
    Types,
}

fn main() {
    // Initialize logger for RUST_LOG-based debug output
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Inspect { input, hex } => cmd_inspect(&input, hex),
        Commands::Decode {
            input,
            token,
            strict,
            config,
            hex,
        } => cmd_decode(&input, token.as_deref(), strict, config.as_deref(), hex),
        Commands::Types => cmd_types(),
    }
}

fn builtin_registry() -> anyhow::Result<CreatorRegistry> {
    let mut builder = CreatorRegistry::builder();
    payload::register_all(&mut builder).context("failed to register payload types")?;
    Ok(builder.build())
}

fn cmd_inspect(input: &Path, hex: bool) -> anyhow::Result<()> {
    let bytes = input::read_input(input, hex)?;
    let mut reader = ParcelReader::new(&bytes);
    let entries = EnvelopeEntries::read(&mut reader, usize::MAX)?;

    println!(
        "{} {} ({} bytes)",
        "Envelope:".cyan().bold(),
        input.display(),
        entries.total_len()
    );

    let mut count = 0usize;
    for entry in entries {
        let entry = entry.with_context(|| format!("entry {} is malformed", count + 1))?;
        count += 1;
        let label = if entry.id == TYPE_TOKEN_FIELD_ID {
            let token = entry
                .payload()
                .read_string()
                .unwrap_or_else(|_| "<invalid token>".to_string());
            format!("type token {}", token.green())
        } else {
            input::hex_preview(entry.payload_bytes(), PREVIEW_BYTES)
        };
        println!(
            "  {} @{:<6} {:>6} bytes  {}",
            format!("[{:>3}]", entry.id).yellow(),
            entry.offset,
            entry.len(),
            label
        );
    }

    println!("{}", "--- Summary ---".dimmed());
    println!("  entries: {}", count.to_string().green());
    if !reader.is_empty() {
        println!(
            "  trailing: {}",
            format!("{} bytes", reader.remaining()).yellow()
        );
    }
    Ok(())
}

fn cmd_decode(
    input: &Path,
    token: Option<&str>,
    strict: bool,
    config: Option<&Path>,
    hex: bool,
) -> anyhow::Result<()> {
    let mut codec_config = match config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    codec_config.apply_env()?;
    if strict {
        codec_config.strict = true;
    }
    let options = codec_config.decode_options();
    log::debug!("[parcel-dump] decode options: {:?}", options);

    let registry = builtin_registry()?;
    let bytes = input::read_input(input, hex)?;

    let value = match token {
        Some(token) => registry.decode_as(token, &bytes, &options),
        None => registry.decode_any(&bytes, &options),
    }
    .with_context(|| format!("failed to decode {}", input.display()))?;

    println!(
        "{} {}",
        ">>>".green().bold(),
        value.type_token().cyan().bold()
    );
    println!("{:#?}", value);
    Ok(())
}

fn cmd_types() -> anyhow::Result<()> {
    let registry = builtin_registry()?;
    println!("{}", "=== Registered Types ===".bold());
    for token in registry.tokens() {
        let creator = registry.resolve(token)?;
        println!();
        println!("{} {}", token.cyan().bold(), creator.type_name().dimmed());
        for field in creator.field_summaries()? {
            println!("  {}", field);
        }
    }
    Ok(())
}
