//! Symbol resolution: how chain offsets get their values.
//!
//! Inside the host game the plugin loader hands us a resolver callback; the
//! diagnostic CLI loads the same symbol set from a JSON file instead.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// External collaborator that maps symbolic names to resolved offsets.
///
/// Called once per chain slot during registry construction. `None` leaves
/// the slot at zero, which marks the feature unsupported by this game build.
pub trait SymbolResolver {
    fn find_target(&self, name: &str) -> Option<u64>;
}

impl SymbolResolver for HashMap<String, u64> {
    fn find_target(&self, name: &str) -> Option<u64> {
        self.get(name).copied().filter(|&offset| offset != 0)
    }
}

/// Adapter turning a plain lookup closure into a [`SymbolResolver`], for
/// hosts that expose symbol resolution as a callback.
pub struct FnResolver<F>(pub F);

impl<F> SymbolResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<u64>,
{
    fn find_target(&self, name: &str) -> Option<u64> {
        (self.0)(name)
    }
}

/// A named symbol→offset map with the game build it was resolved against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    /// Game build the offsets belong to (e.g. "1.6.1170").
    pub version: String,
    pub symbols: HashMap<String, u64>,
}

impl SymbolTable {
    /// Load a symbol table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let table: SymbolTable = serde_json::from_str(&content)?;
        debug!(
            "loaded {} symbols for game build {}",
            table.symbols.len(),
            table.version
        );
        Ok(table)
    }

    /// Save the symbol table as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!("saved symbol table to {}", path.as_ref().display());
        Ok(())
    }
}

impl SymbolResolver for SymbolTable {
    fn find_target(&self, name: &str) -> Option<u64> {
        self.symbols.find_target(name)
    }
}
