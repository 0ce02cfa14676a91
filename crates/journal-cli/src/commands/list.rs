//! List command implementation.

use std::path::Path;

use anyhow::Result;

/// Print every built-in variable with its template and current value.
pub fn run(process_name: &str, symbols: &Path) -> Result<()> {
    let process = super::attach(process_name)?;
    let registry = super::build_registry(&process, symbols)?;

    for variable in registry.variables() {
        println!("[{}] {}", variable.id, variable.name);
        println!("    template: {}", variable.params);
        println!("    value:    {}", registry.apply(variable));
    }

    Ok(())
}
