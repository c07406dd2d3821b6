//! Decoded `spawns.json` collection
//!
//! `SpawnProject` is the read-through cache the store rebuilds on every load.
//! It keeps file order and enforces one entry per `SpawnKey` on upsert.

use super::lookup::{self, Placed};
use super::spawn::{SpawnEntry, SpawnKey};
use super::tile::Tile;

impl Placed for SpawnEntry {
    fn tile(&self) -> Tile {
        SpawnEntry::tile(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnProject {
    entries: Vec<SpawnEntry>,
}

impl SpawnProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<SpawnEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &SpawnKey) -> Option<&SpawnEntry> {
        self.entries.iter().find(|e| e.key() == *key)
    }

    pub fn contains_key(&self, key: &SpawnKey) -> bool {
        self.get(key).is_some()
    }

    pub fn find_exact_at(&self, tile: Tile) -> Option<&SpawnEntry> {
        lookup::find_exact_at(&self.entries, tile)
    }

    pub fn find_first_at_xy(&self, tile: Tile) -> Option<&SpawnEntry> {
        lookup::find_first_at_xy(&self.entries, tile)
    }

    pub fn find_best_for_click(&self, tile: Tile) -> Option<&SpawnEntry> {
        lookup::find_best_for_click(&self.entries, tile)
    }

    /// Replace the first entry with the same key, or append.
    pub fn upsert(&mut self, entry: SpawnEntry) {
        let key = entry.key();
        match self.entries.iter_mut().find(|e| e.key() == key) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove the first entry with this key.
    pub fn remove(&mut self, key: &SpawnKey) -> Option<SpawnEntry> {
        let pos = self.entries.iter().position(|e| e.key() == *key)?;
        Some(self.entries.remove(pos))
    }

    pub fn entries_at_plane(&self, z: i32) -> Vec<&SpawnEntry> {
        lookup::entries_at_plane(&self.entries, z)
    }
}
