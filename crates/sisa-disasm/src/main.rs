use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sisa_disasm::{disassemble, load_words};

#[derive(Parser, Debug)]
#[command(author, version, about = "sisa disassembler CLI", long_about = None)]
struct Cli {
    /// Input binary path (big-endian instruction words)
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Emit a JSON report instead of a text listing
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let img = load_words(&cli.input, cli.skip, cli.len)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    tracing::info!(words = img.words.len(), "loaded {}", cli.input.display());
    let lines = disassemble(&img);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for l in &lines {
            println!("{l}");
        }
    }
    Ok(())
}
