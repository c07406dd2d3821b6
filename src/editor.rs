//! Editor session over both spawn files.
//!
//! `SpawnEditor` owns the two stores and the two name indexes and answers
//! tile-level questions the way a map click would: the JSON collection is
//! consulted first, then the dynamic NPC list.

use std::sync::Arc;

use log::{info, warn};

use crate::config::Config;
use crate::domain::{Record, SpawnEntry, Tile};
use crate::error::Result;
use crate::names::{NameIndex, NameResolver};
use crate::search::{self, SearchHit};
use crate::storage::{DynamicNpcStore, LoadSummary, SpawnStore};

/// Load results for everything `refresh` reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub spawns: LoadSummary,
    pub dynamics: LoadSummary,
    pub object_names: usize,
    pub npc_names: usize,
}

#[derive(Debug)]
pub struct SpawnEditor {
    config: Config,
    objects: Arc<NameIndex>,
    npcs: Arc<NameIndex>,
    spawns: SpawnStore,
    dynamics: DynamicNpcStore,
}

impl SpawnEditor {
    pub fn new(config: Config) -> Self {
        let objects = Arc::new(NameIndex::new());
        let npcs = Arc::new(NameIndex::new());
        let spawns = SpawnStore::from_config(&config);
        let dynamics = DynamicNpcStore::from_config(&config, npcs.clone());
        Self {
            config,
            objects,
            npcs,
            spawns,
            dynamics,
        }
    }

    /// Reload the name lists and both stores from disk.
    pub fn refresh(&mut self) -> Result<RefreshSummary> {
        self.objects = Arc::new(NameIndex::load(&self.config.paths.objects_json)?);
        self.npcs = Arc::new(NameIndex::load(&self.config.paths.npcs_json)?);
        self.dynamics.set_resolver(self.npcs.clone());

        let spawns = self.spawns.load()?;
        let dynamics = self.dynamics.load()?;
        info!("Spawns {}; dynamic NPCs {}", spawns, dynamics);

        Ok(RefreshSummary {
            spawns,
            dynamics,
            object_names: self.objects.len(),
            npc_names: self.npcs.len(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn spawns(&self) -> &SpawnStore {
        &self.spawns
    }

    pub fn spawns_mut(&mut self) -> &mut SpawnStore {
        &mut self.spawns
    }

    pub fn dynamics(&self) -> &DynamicNpcStore {
        &self.dynamics
    }

    pub fn dynamics_mut(&mut self) -> &mut DynamicNpcStore {
        &mut self.dynamics
    }

    pub fn objects(&self) -> &NameIndex {
        &self.objects
    }

    pub fn npcs(&self) -> &NameIndex {
        &self.npcs
    }

    /// Display name for a record's entity, if it has one
    pub fn name_of(&self, record: &Record) -> Option<String> {
        match record {
            Record::Spawn(SpawnEntry::SpawnNpc { npc, .. }) => self.npcs.resolve(npc.id),
            Record::Spawn(entry) => entry.entity_id().and_then(|id| self.objects.resolve(id)),
            Record::Dynamic(entry) => self.npcs.resolve(entry.npc.npc_id),
        }
    }

    /// Record a click on `tile` would select
    pub fn select_at(&self, tile: Tile) -> Option<Record> {
        if let Some(entry) = self.spawns.project().find_best_for_click(tile) {
            return Some(Record::Spawn(*entry));
        }
        self.dynamics
            .find_best_for_click(tile)
            .map(|entry| Record::Dynamic(entry.clone()))
    }

    /// Delete whatever `select_at` would pick. Returns the removed record.
    pub fn delete_at(&mut self, tile: Tile) -> Result<Option<Record>> {
        let Some(record) = self.select_at(tile) else {
            return Ok(None);
        };
        match &record {
            Record::Spawn(entry) => self.spawns.delete(&entry.key())?,
            Record::Dynamic(entry) => self.dynamics.delete(entry.handle)?,
        }
        info!("Deleted {}", record);
        Ok(Some(record))
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search::search(
            query,
            self.spawns.project(),
            self.dynamics.entries(),
            self.objects.as_ref(),
            self.npcs.as_ref(),
        )
    }

    pub fn in_bounds(&self, tile: Tile) -> bool {
        self.config.regions.contains(tile)
    }

    /// Like `in_bounds`, but logs a warning for tiles outside the map.
    pub fn check_bounds(&self, tile: Tile) -> bool {
        let inside = self.in_bounds(tile);
        if !inside {
            match tile.region(self.config.regions.tile_size) {
                Some((rx, ry)) => warn!("Tile {} lies in region ({}, {}), outside the configured bounds", tile, rx, ry),
                None => warn!("Tile {} cannot be placed: tile_size is not positive", tile),
            }
        }
        inside
    }
}
