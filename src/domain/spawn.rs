//! Spawn directives stored in `spawns.json`
//!
//! A `SpawnEntry` is one element of the JSON array. Its identity within the
//! collection is its `SpawnKey`: the action together with the tile.

use std::fmt;

use super::tile::Tile;

/// Default object type written when none is given
pub const DEFAULT_OBJECT_TYPE: i32 = 10;

/// Action tag carried in the `"action"` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    SpawnObject,
    SpawnOverObject,
    SpawnNpc,
    DeleteObject,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::SpawnObject,
        ActionType::SpawnOverObject,
        ActionType::SpawnNpc,
        ActionType::DeleteObject,
    ];

    /// Wire name used in the JSON file
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SpawnObject => "spawn_object",
            ActionType::SpawnOverObject => "spawn_over_object",
            ActionType::SpawnNpc => "spawn_npc",
            ActionType::DeleteObject => "delete_object",
        }
    }

    /// Case-insensitive lookup by wire name
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facing of a spawned NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::NorthEast => "NORTH_EAST",
            Direction::East => "EAST",
            Direction::SouthEast => "SOUTH_EAST",
            Direction::South => "SOUTH",
            Direction::SouthWest => "SOUTH_WEST",
            Direction::West => "WEST",
            Direction::NorthWest => "NORTH_WEST",
            Direction::None => "NONE",
        }
    }

    /// Lenient parse: accepts compass abbreviations and ignores separators.
    /// Anything unrecognised reads as `North`.
    pub fn parse_lenient(s: &str) -> Self {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match key.as_str() {
            "N" | "NORTH" => Direction::North,
            "NE" | "NORTHEAST" => Direction::NorthEast,
            "E" | "EAST" => Direction::East,
            "SE" | "SOUTHEAST" => Direction::SouthEast,
            "S" | "SOUTH" => Direction::South,
            "SW" | "SOUTHWEST" => Direction::SouthWest,
            "W" | "WEST" => Direction::West,
            "NW" | "NORTHWEST" => Direction::NorthWest,
            "NONE" | "STATIONARY" => Direction::None,
            _ => Direction::North,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce a raw rotation to the storage range with a truncating remainder.
///
/// Negative input keeps its sign (`-1` stays `-1`).
pub fn normalize_rotation(raw: i32) -> i32 {
    raw % 4
}

/// Object fields shared by `spawn_object` and `spawn_over_object`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectPlacement {
    pub id: i32,
    pub object_type: i32,
    pub rotation: i32,
}

impl ObjectPlacement {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            object_type: DEFAULT_OBJECT_TYPE,
            rotation: 0,
        }
    }

    pub fn with_type(mut self, object_type: i32) -> Self {
        self.object_type = object_type;
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = normalize_rotation(rotation);
        self
    }
}

/// NPC fields of `spawn_npc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcPlacement {
    pub id: i32,
    pub walk_radius: i32,
    pub aggressive: bool,
    pub direction: Direction,
}

impl NpcPlacement {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            walk_radius: 0,
            aggressive: false,
            direction: Direction::North,
        }
    }
}

/// One element of the spawn array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEntry {
    SpawnObject { tile: Tile, object: ObjectPlacement },
    SpawnOverObject { tile: Tile, object: ObjectPlacement },
    SpawnNpc { tile: Tile, npc: NpcPlacement },
    DeleteObject { tile: Tile },
}

impl SpawnEntry {
    pub fn action(&self) -> ActionType {
        match self {
            SpawnEntry::SpawnObject { .. } => ActionType::SpawnObject,
            SpawnEntry::SpawnOverObject { .. } => ActionType::SpawnOverObject,
            SpawnEntry::SpawnNpc { .. } => ActionType::SpawnNpc,
            SpawnEntry::DeleteObject { .. } => ActionType::DeleteObject,
        }
    }

    pub fn tile(&self) -> Tile {
        match self {
            SpawnEntry::SpawnObject { tile, .. }
            | SpawnEntry::SpawnOverObject { tile, .. }
            | SpawnEntry::SpawnNpc { tile, .. }
            | SpawnEntry::DeleteObject { tile } => *tile,
        }
    }

    pub fn key(&self) -> SpawnKey {
        SpawnKey {
            action: self.action(),
            tile: self.tile(),
        }
    }

    /// Object or NPC id, if the action carries one
    pub fn entity_id(&self) -> Option<i32> {
        match self {
            SpawnEntry::SpawnObject { object, .. } | SpawnEntry::SpawnOverObject { object, .. } => {
                Some(object.id)
            }
            SpawnEntry::SpawnNpc { npc, .. } => Some(npc.id),
            SpawnEntry::DeleteObject { .. } => None,
        }
    }
}

impl fmt::Display for SpawnEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entity_id() {
            Some(id) => write!(f, "{} {} @ {}", self.action(), id, self.tile()),
            None => write!(f, "{} @ {}", self.action(), self.tile()),
        }
    }
}

/// Identity of a record in the JSON collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnKey {
    pub action: ActionType,
    pub tile: Tile,
}

impl fmt::Display for SpawnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.action, self.tile)
    }
}
