//! Relocation chains: base-relative pointer walks into game memory.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::memory::ReadMemory;

/// An ordered sequence of offsets locating one value inside the game.
///
/// Slot 0 is a displacement from the game module base; each following slot is
/// applied after dereferencing the address computed so far. The final slot is
/// added without a dereference, so the resolved address can itself point at a
/// float block or the first byte of a C string.
///
/// Slots are filled exactly once, at registry build time, from the host's
/// symbol resolver. Resolution is never cached: the game relocates the
/// underlying objects freely between frames, so every [`resolve`] walks the
/// chain from scratch.
///
/// [`resolve`]: RelocationChain::resolve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationChain {
    offsets: Vec<u64>,
}

impl RelocationChain {
    /// Build a chain from explicit offsets. `offsets` holds N+1 slots for a
    /// chain of N indirections and must not be empty.
    pub fn new(offsets: Vec<u64>) -> Self {
        assert!(!offsets.is_empty(), "a relocation chain needs at least one offset");
        Self { offsets }
    }

    /// An all-zero chain with `links` indirections, to be filled by the
    /// symbol resolver. A root left at zero marks the feature unsupported.
    pub fn unresolved(links: usize) -> Self {
        Self {
            offsets: vec![0; links + 1],
        }
    }

    /// The base-relative root displacement (slot 0).
    pub fn root(&self) -> u64 {
        self.offsets[0]
    }

    /// Whether the symbol resolver produced a usable root. An unbound chain
    /// gates its variable out of the registry entirely.
    pub fn is_bound(&self) -> bool {
        self.root() != 0
    }

    /// Number of dereference steps (one less than the slot count).
    pub fn links(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut u64 {
        &mut self.offsets[index]
    }

    /// Walk the chain from the reader's base address.
    ///
    /// Every link except the last is dereferenced; a zero value or a failed
    /// read means the backing object does not currently exist (main menu,
    /// player not spawned) and resolution stops right there; later offsets
    /// are never touched. The last offset is only added.
    pub fn resolve<R: ReadMemory>(&self, reader: &R) -> Option<u64> {
        let mut current = reader.base_address();
        let (last, links) = self.offsets.split_last().expect("non-empty by invariant");

        for offset in links {
            match reader.read_u64(current + offset) {
                Ok(0) => return None,
                Ok(next) => current = next,
                Err(e) => {
                    trace!("relocation link at {:#x} unreadable: {}", current + offset, e);
                    return None;
                }
            }
        }

        Some(current + last)
    }
}
