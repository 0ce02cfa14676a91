//! Journal variables: named, user-formattable views over live game state.

mod game_time;
mod local_time;
mod location;

pub use game_time::format_game_time;
pub use local_time::{LOCAL_TIME_MAX_LEN, format_local_time, format_local_time_at};
pub use location::{WORLD_CELL_SIZE, format_location};

use tracing::{debug, info};

use crate::calendar::CalendarDate;
use crate::memory::ReadMemory;
use crate::offset::{OffsetsCollection, SymbolResolver};

/// Sentinel text shown when a variable's backing data is unavailable.
pub const NOT_AVAILABLE: &str = "(n/a)";

/// Longest name string read out of game memory.
const NAME_MAX_LEN: usize = 256;

/// Which formatting engine a variable dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    GameTime,
    PlayerPosition,
    LocalTime,
}

/// One journal variable as the surrounding UI sees it.
///
/// Identity (id, kind, name, help text) is fixed at registry build; only
/// `params`, the user-editable format template, changes afterwards.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: u32,
    /// Built-ins are non-deletable so the UI cannot remove them.
    pub deletable: bool,
    pub name: String,
    /// Help text describing the variable's token vocabulary.
    pub info: String,
    /// The format template substituted on every apply.
    pub params: String,
    pub kind: VariableKind,
}

/// The built-in variable set bound to one memory reader.
///
/// Built once at plugin load: the reader fixes the module base, the symbol
/// resolver fills the relocation chains, and each memory-backed variable
/// exists only if its chain root resolved. After that the registry is
/// read-only apart from template edits through [`variables_mut`] /
/// [`get_mut`].
///
/// [`variables_mut`]: VariableRegistry::variables_mut
/// [`get_mut`]: VariableRegistry::get_mut
pub struct VariableRegistry<R> {
    reader: R,
    offsets: OffsetsCollection,
    variables: Vec<Variable>,
}

impl<R: ReadMemory> VariableRegistry<R> {
    /// Build the registry. With no resolver only the local-time variable
    /// (which has no memory dependency) is constructed.
    pub fn build<S: SymbolResolver + ?Sized>(reader: R, resolver: Option<&S>) -> Self {
        let mut offsets = OffsetsCollection::default();
        if let Some(resolver) = resolver {
            offsets.resolve_symbols(resolver);
        } else {
            debug!("no symbol resolver; memory-backed variables disabled");
        }

        let mut variables = Vec::new();

        if offsets.game_epoch.is_bound() {
            variables.push(Variable {
                id: 1,
                deletable: false,
                name: "Game time".to_string(),
                info: game_time_help().to_string(),
                params: "%h:%m %ld, day %md of %lm, %Y".to_string(),
                kind: VariableKind::GameTime,
            });
        }

        if offsets.player_position.is_bound() {
            variables.push(Variable {
                id: 3,
                deletable: false,
                name: "Player position".to_string(),
                info: location_help().to_string(),
                params: "%wn, %cn: %x %y %z".to_string(),
                kind: VariableKind::PlayerPosition,
            });
        }

        variables.push(Variable {
            id: 2,
            deletable: false,
            name: "Local time".to_string(),
            info: "strftime-style format specifiers, e.g. %X %x %A %d %B %Y".to_string(),
            params: "%X %x".to_string(),
            kind: VariableKind::LocalTime,
        });

        info!(
            "built {} journal variables (base {:#x})",
            variables.len(),
            reader.base_address()
        );

        Self {
            reader,
            offsets,
            variables,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut [Variable] {
        &mut self.variables
    }

    pub fn get(&self, id: u32) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.id == id)
    }

    pub fn offsets(&self) -> &OffsetsCollection {
        &self.offsets
    }

    /// Format a variable against the current game state.
    ///
    /// Pure over the variable's template and live memory; chains are
    /// re-resolved on every call. Never fails: missing game state degrades
    /// to [`NOT_AVAILABLE`] or empty name substitutions, and unmatched
    /// tokens stay verbatim.
    pub fn apply(&self, variable: &Variable) -> String {
        match variable.kind {
            VariableKind::GameTime => self.apply_game_time(&variable.params),
            VariableKind::PlayerPosition => self.apply_location(&variable.params),
            VariableKind::LocalTime => format_local_time(&variable.params),
        }
    }

    /// Convenience lookup-and-apply.
    pub fn apply_by_id(&self, id: u32) -> Option<String> {
        self.get(id).map(|variable| self.apply(variable))
    }

    fn apply_game_time(&self, template: &str) -> String {
        let Some(address) = self.offsets.game_epoch.resolve(&self.reader) else {
            return NOT_AVAILABLE.to_string();
        };
        let Ok(raw) = self.reader.read_f32(address) else {
            return NOT_AVAILABLE.to_string();
        };
        match CalendarDate::from_epoch(raw) {
            Some(date) => format_game_time(template, &date),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    fn apply_location(&self, template: &str) -> String {
        let Some(address) = self.offsets.player_position.resolve(&self.reader) else {
            return NOT_AVAILABLE.to_string();
        };
        let Ok(pos) = self.reader.read_vec3(address) else {
            return NOT_AVAILABLE.to_string();
        };

        let read_name = |chain: &crate::offset::RelocationChain| {
            chain
                .resolve(&self.reader)
                .and_then(|addr| self.reader.read_cstring(addr, NAME_MAX_LEN).ok())
        };
        let cell = read_name(&self.offsets.player_cell);
        let worldspace = read_name(&self.offsets.worldspace_name);

        format_location(template, pos, cell.as_deref(), worldspace.as_deref())
    }
}

fn game_time_help() -> &'static str {
    "Substitutions start with %:\n\
     y is the year number (e.g. 201)\n\
     Y is the year with the era in front (e.g. 4E201)\n\
     lm is the long month name (e.g. First Seed)\n\
     bm is the birthsign for that month (e.g. The Mage)\n\
     am is the Argonian month (e.g. Hist-Dooka (Mature Hist))\n\
     mo is the month number (from 1 to 12)\n\
     md is the month day number (from 1 to 28, 30 or 31)\n\
     sd is the short day name, its first three letters (e.g. Tir)\n\
     ld is the long day name (e.g. Middas)\n\
     wd is the week day number (from 1 to 7)\n\
     h is the hour (from 0 to 23)\n\
     m are the minutes (from 0 to 59)\n\
     s are the seconds (from 0 to 59)\n\
     r is the raw day counter\n\
     ri is the integer part of %r (days since the clock started)"
}

fn location_help() -> &'static str {
    "The world/cell/xyz coordinates of the player.\n\
     %x %y %z each coordinate respectively\n\
     %cx %cy cell grid coordinates\n\
     %cn current cell name, if any\n\
     %wn worldspace name, if any"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockMemoryBuilder, MockMemoryReader};
    use std::collections::HashMap;

    const BASE: u64 = 0x1400_0000;

    fn full_resolver() -> HashMap<String, u64> {
        [
            ("GameTime", 0x100),
            ("GameTime.Offset", 0x34),
            ("PlayerCharacter", 0x200),
            ("PlayerCharacter.Position", 0x54),
            ("PlayerCharacter.Cell", 0x60),
            ("Cell.Fullname", 0x28),
            ("PlayerCharacter.Worldspace", 0x68),
            ("Worldspace.Fullname", 0x28),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v as u64))
        .collect()
    }

    /// Game memory with a running clock, a placed player and both names.
    fn live_world() -> MockMemoryReader {
        let mut builder = MockMemoryBuilder::new(BASE);
        builder
            // epoch: base+0x100 -> 0x5000; float at 0x5000+0x34
            .write_u64(BASE + 0x100, 0x5000)
            .write_f32(0x5000 + 0x34, 0.09375)
            // player: base+0x200 -> 0x6000; position floats at 0x6000+0x54
            .write_u64(BASE + 0x200, 0x6000)
            .write_f32(0x6000 + 0x54, 4100.0)
            .write_f32(0x6000 + 0x58, -10.0)
            .write_f32(0x6000 + 0x5c, 120.0)
            // cell: player+0x60 -> cell object -> fullname string
            .write_u64(0x6000 + 0x60, 0x7000)
            .write_u64(0x7000 + 0x28, 0x7100)
            .write_cstr(0x7100, "Dragonsreach")
            // worldspace: player+0x68 -> worldspace object -> fullname string
            .write_u64(0x6000 + 0x68, 0x8000)
            .write_u64(0x8000 + 0x28, 0x8100)
            .write_cstr(0x8100, "Whiterun");
        builder.build()
    }

    #[test]
    fn test_full_registry() {
        let registry = VariableRegistry::build(live_world(), Some(&full_resolver()));

        let ids: Vec<u32> = registry.variables().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert!(registry.variables().iter().all(|v| !v.deletable));
    }

    #[test]
    fn test_game_time_applies_default_template() {
        let registry = VariableRegistry::build(live_world(), Some(&full_resolver()));
        assert_eq!(
            registry.apply_by_id(1).unwrap(),
            "2:15 Sundas, day 17 of Last Seed, 4E201"
        );
    }

    #[test]
    fn test_location_applies_default_template() {
        let registry = VariableRegistry::build(live_world(), Some(&full_resolver()));
        assert_eq!(
            registry.apply_by_id(3).unwrap(),
            "Whiterun, Dragonsreach: 4100 -10 120"
        );
    }

    #[test]
    fn test_grid_cells_from_live_position() {
        let mut registry = VariableRegistry::build(live_world(), Some(&full_resolver()));
        registry.get_mut(3).unwrap().params = "%cx,%cy".to_string();
        assert_eq!(registry.apply_by_id(3).unwrap(), "1,-1");
    }

    #[test]
    fn test_editing_params_changes_output() {
        let mut registry = VariableRegistry::build(live_world(), Some(&full_resolver()));
        registry.get_mut(1).unwrap().params = "%Y".to_string();
        assert_eq!(registry.apply_by_id(1).unwrap(), "4E201");
    }

    #[test]
    fn test_unbound_roots_gate_variables_out() {
        let resolver: HashMap<String, u64> = [("GameTime", 0x100u64), ("GameTime.Offset", 0x34)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let registry = VariableRegistry::build(live_world(), Some(&resolver));
        let ids: Vec<u32> = registry.variables().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_no_resolver_leaves_only_local_time() {
        let registry =
            VariableRegistry::build(live_world(), None::<&HashMap<String, u64>>);
        let ids: Vec<u32> = registry.variables().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_unbound_clock_pointer_is_unavailable() {
        // Chain root resolves at build time, but the first link is null at
        // apply time (the main-menu state).
        let reader = MockMemoryBuilder::new(BASE).write_u64(BASE + 0x100, 0).build();
        let registry = VariableRegistry::build(reader, Some(&full_resolver()));

        assert_eq!(registry.apply_by_id(1).unwrap(), NOT_AVAILABLE);
    }

    #[test]
    fn test_menu_epoch_value_is_unavailable() {
        let mut builder = MockMemoryBuilder::new(BASE);
        builder
            .write_u64(BASE + 0x100, 0x5000)
            .write_f32(0x5000 + 0x34, -1.0);
        let registry = VariableRegistry::build(builder.build(), Some(&full_resolver()));

        assert_eq!(registry.apply_by_id(1).unwrap(), NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_names_degrade_to_empty() {
        // Player exists but has no current cell or worldspace.
        let mut builder = MockMemoryBuilder::new(BASE);
        builder
            .write_u64(BASE + 0x200, 0x6000)
            .write_f32(0x6000 + 0x54, 100.0)
            .write_f32(0x6000 + 0x58, 200.0)
            .write_f32(0x6000 + 0x5c, 300.0)
            .write_u64(0x6000 + 0x60, 0)
            .write_u64(0x6000 + 0x68, 0);
        let registry = VariableRegistry::build(builder.build(), Some(&full_resolver()));

        assert_eq!(registry.apply_by_id(3).unwrap(), ", : 100 200 300");
    }

    #[test]
    fn test_non_finite_position_is_unavailable() {
        let mut builder = MockMemoryBuilder::new(BASE);
        builder
            .write_u64(BASE + 0x200, 0x6000)
            .write_f32(0x6000 + 0x54, f32::NAN)
            .write_f32(0x6000 + 0x58, 0.0)
            .write_f32(0x6000 + 0x5c, 0.0)
            .write_u64(0x6000 + 0x60, 0)
            .write_u64(0x6000 + 0x68, 0);
        let registry = VariableRegistry::build(builder.build(), Some(&full_resolver()));

        assert_eq!(registry.apply_by_id(3).unwrap(), NOT_AVAILABLE);
    }

    #[test]
    fn test_local_time_always_present() {
        let reader = MockMemoryBuilder::new(BASE).build();
        let mut registry = VariableRegistry::build(reader, None::<&HashMap<String, u64>>);

        registry.get_mut(2).unwrap().params = "fixed".to_string();
        assert_eq!(registry.apply_by_id(2).unwrap(), "fixed");
    }
}
