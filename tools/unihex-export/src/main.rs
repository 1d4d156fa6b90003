//! unihex-export - Unifont hex font export tool
//!
//! Converts a `.hex` glyph font into unifont.dat (compressed range table)
//! and unifont.h (C arrays).

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use unihex_export::ExportOptions;

#[derive(Parser)]
#[command(name = "unihex-export")]
#[command(about = "Unifont hex font export tool")]
#[command(version)]
struct Cli {
    /// Input hex font (CODEPOINT:HEXBYTES per line)
    input: PathBuf,

    /// Output directory for unifont.dat and unifont.h
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Skip writing unifont.h
    #[arg(long)]
    no_header: bool,

    /// Re-read unifont.dat after writing and check it
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, stdout carries the summary)
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = ExportOptions {
        input: cli.input,
        out_dir: cli.out_dir,
        write_header: !cli.no_header,
        verify: cli.verify,
    };
    tracing::debug!("Exporting {:?} -> {:?}", options.input, options.out_dir);

    let (font, _files) = unihex_export::export(&options)
        .with_context(|| format!("Failed to export {:?}", options.input))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    font.write_summary(&mut out)
        .and_then(|_| out.flush())
        .context("Failed to print summary")?;

    Ok(())
}
