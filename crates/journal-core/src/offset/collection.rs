//! The fixed set of relocation chains backing the built-in variables.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::offset::{RelocationChain, SymbolResolver};

/// One relocation chain per memory-backed journal feature.
///
/// Arities match the game's object graph: the epoch float and the position
/// block sit one dereference behind their roots, while the two name strings
/// go root → object → fullname → string data. The cell and worldspace chains
/// share the player root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetsCollection {
    pub game_epoch: RelocationChain,
    pub player_position: RelocationChain,
    pub player_cell: RelocationChain,
    pub worldspace_name: RelocationChain,
}

impl Default for OffsetsCollection {
    fn default() -> Self {
        Self {
            game_epoch: RelocationChain::unresolved(1),
            player_position: RelocationChain::unresolved(1),
            player_cell: RelocationChain::unresolved(3),
            worldspace_name: RelocationChain::unresolved(3),
        }
    }
}

impl OffsetsCollection {
    /// Fill every chain slot from the host's symbol resolver.
    ///
    /// Runs once at registry build time. Symbols the resolver cannot supply
    /// leave their slot at zero; a zero root then gates the whole variable
    /// out of the registry. The trailing slot of the two name chains stays
    /// zero on purpose: the resolved fullname pointer already addresses the
    /// first byte of string data.
    pub fn resolve_symbols<S: SymbolResolver + ?Sized>(&mut self, resolver: &S) {
        let mut fill = |chain: &mut RelocationChain, slot: usize, name: &str| {
            match resolver.find_target(name) {
                Some(offset) => *chain.slot_mut(slot) = offset,
                None => debug!("symbol {} not provided by resolver", name),
            }
        };

        fill(&mut self.game_epoch, 0, "GameTime");
        fill(&mut self.game_epoch, 1, "GameTime.Offset");
        fill(&mut self.player_position, 0, "PlayerCharacter");
        fill(&mut self.player_position, 1, "PlayerCharacter.Position");
        fill(&mut self.player_cell, 1, "PlayerCharacter.Cell");
        fill(&mut self.player_cell, 2, "Cell.Fullname");
        fill(&mut self.worldspace_name, 1, "PlayerCharacter.Worldspace");
        fill(&mut self.worldspace_name, 2, "Worldspace.Fullname");

        // Both name chains hang off the player object.
        *self.player_cell.slot_mut(0) = self.player_position.root();
        *self.worldspace_name.slot_mut(0) = self.player_position.root();

        debug!(
            "resolved chain roots: epoch={:#x} position={:#x}",
            self.game_epoch.root(),
            self.player_position.root()
        );
    }

    /// Whether any memory-backed feature is usable at all.
    pub fn any_bound(&self) -> bool {
        self.game_epoch.is_bound() || self.player_position.is_bound()
    }
}
