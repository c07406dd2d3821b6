//! Domain types for spawnedit
//!
//! This module contains the record model shared by both stores:
//! - Tile: world coordinate triple
//! - SpawnEntry / SpawnKey: elements of `spawns.json` and their identity
//! - SpawnProject: the decoded JSON collection
//! - DynamicNpc / Handle: line-script records and their load-scoped handles
//! - lookup: click resolution shared by both collections

pub mod dynamic;
pub mod lookup;
pub mod project;
pub mod spawn;
pub mod tile;

pub use dynamic::{DynamicEntry, DynamicNpc, Handle};
pub use lookup::Placed;
pub use project::SpawnProject;
pub use spawn::{
    ActionType, DEFAULT_OBJECT_TYPE, Direction, NpcPlacement, ObjectPlacement, SpawnEntry, SpawnKey,
    normalize_rotation,
};
pub use tile::Tile;

/// Any record the editor can select
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Spawn(SpawnEntry),
    Dynamic(DynamicEntry),
}

impl Record {
    pub fn tile(&self) -> Tile {
        match self {
            Record::Spawn(entry) => entry.tile(),
            Record::Dynamic(entry) => entry.npc.tile,
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Spawn(entry) => write!(f, "{}", entry),
            Record::Dynamic(entry) => write!(f, "dynamic_npc {}", entry.npc),
        }
    }
}
