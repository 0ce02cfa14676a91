//! # journal-core
//!
//! Core library for the in-game journal's text variables.
//!
//! This crate provides:
//! - Relocation-chain resolution over live game memory
//! - The in-game calendar derived from the raw day counter
//! - Template token substitution (game time, player location, local time)
//! - The built-in variable registry exposed to the journal UI
//!
//! The host plugin loader supplies per-build memory offsets through a
//! [`SymbolResolver`]; nothing here scans or signature-matches memory.

pub mod calendar;
pub mod error;
pub mod memory;
pub mod offset;
pub mod vars;

pub use calendar::{CalendarDate, Month, Weekday};
pub use error::{Error, Result};
pub use memory::{CurrentProcess, MemoryReader, ProcessHandle, ReadMemory};
pub use offset::{FnResolver, OffsetsCollection, RelocationChain, SymbolResolver, SymbolTable};
pub use vars::{
    NOT_AVAILABLE, Variable, VariableKind, VariableRegistry, format_game_time,
    format_local_time, format_location,
};
