//! World tile coordinates.

use std::fmt;

/// Integer world coordinate; `z` is the plane index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Tile {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// True if both tiles share `x` and `y`, ignoring the plane.
    pub fn same_column(&self, other: &Tile) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Region coordinates for a given region edge length in tiles; `None`
    /// unless `tile_size` is positive.
    pub fn region(&self, tile_size: i32) -> Option<(i32, i32)> {
        if tile_size <= 0 {
            return None;
        }
        Some((self.x.div_euclid(tile_size), self.y.div_euclid(tile_size)))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
