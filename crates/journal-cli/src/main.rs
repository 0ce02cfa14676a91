use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Inspect the journal variables of a running game")]
struct Args {
    /// Executable name of the game process
    #[arg(short, long, default_value = "SkyrimSE.exe")]
    process: String,

    /// Symbol table with per-build memory offsets
    #[arg(short, long, default_value = "journal-symbols.json")]
    symbols: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in variables with their current values
    List,
    /// Apply one variable's template and print the result
    Apply {
        /// Variable id (1 = game time, 2 = local time, 3 = player position)
        id: u32,

        /// Override the variable's stored template for this call
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("journal=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::List => commands::list::run(&args.process, &args.symbols),
        Command::Apply { id, format } => {
            commands::apply::run(&args.process, &args.symbols, id, format)
        }
    }
}
