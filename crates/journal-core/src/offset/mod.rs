mod chain;
mod collection;
mod symbols;

pub use chain::*;
pub use collection::*;
pub use symbols::*;
