//! Apply command implementation.

use std::path::Path;

use anyhow::{Context, Result};

/// Format one variable and print the result, optionally with a template
/// override in place of its stored one.
pub fn run(
    process_name: &str,
    symbols: &Path,
    id: u32,
    format: Option<String>,
) -> Result<()> {
    let process = super::attach(process_name)?;
    let mut registry = super::build_registry(&process, symbols)?;

    if let Some(template) = format {
        registry
            .get_mut(id)
            .with_context(|| format!("no variable with id {id}"))?
            .params = template;
    }

    let value = registry
        .apply_by_id(id)
        .with_context(|| format!("no variable with id {id}"))?;
    println!("{value}");

    Ok(())
}
