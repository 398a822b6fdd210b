//! hrpack CLI - Pack a watch app directory into a Fossil Hybrid HR archive.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hrpack::prelude::*;

/// hrpack - Fossil Hybrid HR watch app packer
#[derive(Parser)]
#[command(name = "hrpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// App directory containing app.json and files/
    #[arg(env = "HRPACK_INPUT")]
    input: PathBuf,

    /// Output archive (defaults to the name of the first code file)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let start = Instant::now();
    let report = pack(&cli.input, cli.output.as_deref())
        .with_context(|| format!("Failed to pack {}", cli.input.display()))?;

    for (category, size) in report.sizes.iter() {
        println!("{:>12} {:>8} bytes", category, size);
    }
    println!(
        "Wrote {} ({} files, {} bytes, crc32c {:#010x}) in {:?}",
        report.output.display(),
        report.file_count,
        report.len,
        report.checksum,
        start.elapsed()
    );

    Ok(())
}
