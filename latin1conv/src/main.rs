//! Convert UTF-8 text to ISO-8859-1, or back.
//!
//! Usage:
//!   latin1conv [-f <fallback>] [-s] [-o <file>] [file...]
//!   latin1conv -d [file...]

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use latin1_fallback::{Encoder, Fallback};

/// Convert UTF-8 text to ISO-8859-1.
#[derive(Debug, Parser)]
#[command(name = "latin1conv", version)]
struct Cli {
    /// What to write for characters outside ISO-8859-1:
    /// default, ignore, escape or replace=<char>.
    #[arg(short, long, default_value = "default")]
    fallback: Fallback,

    /// Fail on the first character outside ISO-8859-1.
    #[arg(short, long, conflicts_with_all = ["fallback", "decode"])]
    strict: bool,

    /// Decode ISO-8859-1 input to UTF-8 instead.
    #[arg(short, long)]
    decode: bool,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Input files, concatenated (default: stdin).
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = read_input(&cli.files)?;
    let output = convert_input(cli, &input)?;
    debug!(input = input.len(), output = output.len(), "converted");
    write_output(cli.output.as_ref(), &output)
}

fn convert_input(cli: &Cli, input: &[u8]) -> anyhow::Result<Vec<u8>> {
    let encoder = Encoder::latin1(cli.fallback)?;
    if cli.decode {
        return Ok(encoder.decode(input).into_bytes());
    }

    if cli.strict {
        Ok(encoder.try_encode_utf8(input)?)
    } else {
        Ok(encoder.encode_utf8(input))
    }
}

fn read_input(files: &[PathBuf]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if files.is_empty() {
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }

    for path in files {
        let mut file =
            File::open(path).with_context(|| format!("opening {}", path.display()))?;
        file.read_to_end(&mut buf)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    Ok(buf)
}

fn write_output(path: Option<&PathBuf>, output: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            file.write_all(output)
                .with_context(|| format!("writing {}", path.display()))
        }
        None => io::stdout().write_all(output).context("writing stdout"),
    }
}
