mod process;
mod reader;

#[cfg(test)]
pub mod mock;

pub use process::*;
pub use reader::ReadMemory;

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
