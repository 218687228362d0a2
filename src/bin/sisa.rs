use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sisa_rs::exec::IntExecutor;
use sisa_rs::listing::{encode_listing, memory_dump, register_dump};
use sisa_rs::{encode, parse_program, Machine, MachineConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a sisa program to binary literals, or run it on the interpreter"
)]
struct Opts {
    /// Assembly source, one instruction per line
    #[arg(value_name = "SRCFILE")]
    input: PathBuf,
    /// Any value here runs the program instead of encoding it
    #[arg(value_name = "MODE")]
    mode: Option<String>,
    /// Encode mode: also write the big-endian instruction words to FILE
    #[arg(long, value_name = "FILE")]
    bin: Option<PathBuf>,
    /// Interpret mode: print the final machine state as JSON
    #[arg(long)]
    json: bool,
    /// Interpret mode: give up after N executed instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let text = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let program = parse_program(&text)?;
    info!(instructions = program.len(), "parsed {}", opts.input.display());

    if opts.mode.is_none() {
        for line in encode_listing(&program) {
            println!("{line}");
        }
        if let Some(path) = &opts.bin {
            let bytes: Vec<u8> = program
                .iter()
                .flat_map(|i| encode(i).word().to_be_bytes())
                .collect();
            std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            info!(bytes = bytes.len(), "wrote {}", path.display());
        }
        return Ok(());
    }

    let cfg = MachineConfig { max_steps: opts.max_steps };
    let mut machine = Machine::new(program, cfg);
    let steps = machine.run(&IntExecutor)?;
    info!(steps, "program halted");

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&machine.snapshot())?);
    } else {
        for line in register_dump(&machine.cpu) {
            println!("{line}");
        }
        for line in memory_dump(&machine.mem) {
            println!("{line}");
        }
    }
    Ok(())
}
