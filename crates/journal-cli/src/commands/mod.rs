//! CLI command implementations.

pub mod apply;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use journal_core::{MemoryReader, ProcessHandle, SymbolTable, VariableRegistry};
use tracing::info;

/// Attach to the game process by executable name.
fn attach(process_name: &str) -> Result<ProcessHandle> {
    let process = ProcessHandle::find_and_open(process_name)
        .with_context(|| format!("attaching to {process_name}"))?;
    info!(
        "attached to {} (pid {}, base {:#x})",
        process_name, process.pid, process.base_address
    );
    Ok(process)
}

/// Build the variable registry against an attached process, using a symbol
/// table file in place of the host's resolver callback.
fn build_registry<'a>(
    process: &'a ProcessHandle,
    symbols: &Path,
) -> Result<VariableRegistry<MemoryReader<'a>>> {
    let table = SymbolTable::load(symbols)
        .with_context(|| format!("loading symbol table {}", symbols.display()))?;
    info!("symbol table is for game build {}", table.version);
    Ok(VariableRegistry::build(
        MemoryReader::new(process),
        Some(&table),
    ))
}
