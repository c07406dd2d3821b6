//! Dynamic NPC records from the line-script spawn list
//!
//! These records have no stable key of their own. The store identifies them
//! by an opaque `Handle` issued at load time; handles from an earlier load are
//! rejected.

use std::fmt;

use super::lookup::Placed;
use super::tile::Tile;

/// One `"<id> - <x> <y> <z>"` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicNpc {
    pub npc_id: i32,
    pub tile: Tile,
    /// Legacy area hash; never present in the script format
    pub area_hash: Option<i32>,
    /// Legacy out-of-area flag; never present in the script format
    pub attackable_from_outside_area: Option<bool>,
}

impl DynamicNpc {
    pub fn new(npc_id: i32, tile: Tile) -> Self {
        Self {
            npc_id,
            tile,
            area_hash: None,
            attackable_from_outside_area: None,
        }
    }
}

impl fmt::Display for DynamicNpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.npc_id, self.tile)?;
        if let Some(hash) = self.area_hash {
            write!(f, "  hash={} outOfArea={:?}", hash, self.attackable_from_outside_area)?;
        }
        Ok(())
    }
}

/// Opaque reference to a record of one particular load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) generation: u32,
    pub(crate) slot: u32,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.slot, self.generation)
    }
}

/// A dynamic NPC together with the handle that addresses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicEntry {
    pub handle: Handle,
    pub npc: DynamicNpc,
}

impl Placed for DynamicEntry {
    fn tile(&self) -> Tile {
        self.npc.tile
    }
}
