//! Formatting-preserving store for the dynamic NPC spawn list.
//!
//! Records here have no natural key, so each load issues a fresh generation
//! of handles. Each handle maps to the record's line span (data line plus an
//! optional comment line above it).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};

use super::buffer::LineBuffer;
use super::index::{LineSpan, PositionIndex};
use super::scan;
use super::{LoadStatus, LoadSummary};
use crate::codec::script;
use crate::config::Config;
use crate::domain::{DynamicEntry, DynamicNpc, Handle, Tile, lookup};
use crate::error::{Result, SpawnError};
use crate::names::NameResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScriptLayout {
    has_comment: bool,
}

pub struct DynamicNpcStore {
    path: PathBuf,
    signature: String,
    resolver: Arc<dyn NameResolver>,
    buffer: LineBuffer,
    index: PositionIndex<Handle, ScriptLayout>,
    entries: Vec<DynamicEntry>,
    generation: u32,
    next_slot: u32,
    loaded: bool,
}

impl fmt::Debug for DynamicNpcStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicNpcStore")
            .field("path", &self.path)
            .field("generation", &self.generation)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl DynamicNpcStore {
    pub fn new(path: impl Into<PathBuf>, signature: impl Into<String>, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            path: path.into(),
            signature: signature.into(),
            resolver,
            buffer: LineBuffer::new(),
            index: PositionIndex::new(),
            entries: Vec::new(),
            generation: 0,
            next_slot: 0,
            loaded: false,
        }
    }

    pub fn from_config(config: &Config, resolver: Arc<dyn NameResolver>) -> Self {
        Self::new(
            config.paths.dynamic_npcs_txt.clone(),
            config.editor.signature.clone(),
            resolver,
        )
    }

    /// Swap the id-to-name resolver used for new comment lines.
    pub fn set_resolver(&mut self, resolver: Arc<dyn NameResolver>) {
        self.resolver = resolver;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Records in file order
    pub fn entries(&self) -> &[DynamicEntry] {
        &self.entries
    }

    pub fn get(&self, handle: Handle) -> Option<&DynamicEntry> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    pub fn find_exact_at(&self, tile: Tile) -> Option<&DynamicEntry> {
        lookup::find_exact_at(&self.entries, tile)
    }

    pub fn find_best_for_click(&self, tile: Tile) -> Option<&DynamicEntry> {
        lookup::find_best_for_click(&self.entries, tile)
    }

    pub fn entries_at_plane(&self, z: i32) -> Vec<&DynamicEntry> {
        lookup::entries_at_plane(&self.entries, z)
    }

    pub fn span_of(&self, handle: Handle) -> Option<LineSpan> {
        self.index.get(&handle).map(|slot| slot.span)
    }

    /// Read the file, decode every data line and issue a new generation of
    /// handles. Handles from earlier loads become stale.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let buffer = match LineBuffer::load(&self.path) {
            Ok(buffer) => buffer,
            Err(SpawnError::NotFound(path)) => {
                warn!("Dynamic NPC list not found: {}", path.display());
                self.reset(LineBuffer::new());
                return Ok(LoadSummary::new(LoadStatus::Missing, 0, 0));
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e);
            }
        };
        self.reset(buffer);

        let decoded: Vec<DynamicNpc> = self.buffer.lines().iter().filter_map(|l| script::decode_line(l)).collect();
        let located = scan::locate_script_records(self.buffer.lines());
        if decoded.len() != located.len() {
            warn!(
                "Decoded {} records but located {} in {}",
                decoded.len(),
                located.len(),
                self.path.display()
            );
        }

        for (npc, line) in decoded.into_iter().zip(located) {
            let handle = self.issue_handle();
            self.index.push(
                handle,
                line.span,
                ScriptLayout {
                    has_comment: line.has_comment,
                },
            );
            self.entries.push(DynamicEntry { handle, npc });
        }

        info!(
            "Loaded {} dynamic NPCs from {} (generation {})",
            self.entries.len(),
            self.path.display(),
            self.generation
        );
        Ok(LoadSummary::new(LoadStatus::Loaded, self.entries.len(), self.index.len()))
    }

    /// Update the record behind `handle`, or append a new one when there is
    /// no handle. Returns the handle that now addresses the record.
    pub fn upsert(&mut self, handle: Option<Handle>, npc: DynamicNpc) -> Result<Handle> {
        match handle {
            Some(handle) => {
                self.update(handle, npc)?;
                Ok(handle)
            }
            None => self.create(npc),
        }
    }

    /// Append a comment line and a data line at the end of the file.
    pub fn create(&mut self, npc: DynamicNpc) -> Result<Handle> {
        self.ensure_loaded()?;
        let lines = self.render(&npc);
        let start = self.buffer.len();
        let added = self.buffer.insert_at(start, lines);

        let handle = self.issue_handle();
        self.index
            .push(handle, LineSpan::of_len(start, added), ScriptLayout { has_comment: true });
        debug!("Created dynamic NPC {} as {} at line {}", npc, handle, start + 1);
        self.entries.push(DynamicEntry { handle, npc });
        self.persist()?;
        Ok(handle)
    }

    /// Re-render the record behind `handle`. A record that had no comment
    /// line gains one.
    pub fn update(&mut self, handle: Handle, npc: DynamicNpc) -> Result<()> {
        self.ensure_loaded()?;
        let span = self.owned_span(handle)?;
        let lines = self.render(&npc);
        let count = lines.len();

        let delta = self.buffer.replace_range(span.start, span.end, lines);
        self.index.shift_from(span.end + 1, delta);
        if let Some(slot) = self.index.get_mut(&handle) {
            slot.span = LineSpan::of_len(span.start, count);
            slot.layout.has_comment = true;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.handle == handle) {
            entry.npc = npc;
        }
        debug!("Updated {} at lines {}-{} (delta {})", handle, span.start + 1, span.end + 1, delta);
        self.persist()
    }

    /// Remove the data line and the comment line directly above it.
    pub fn delete(&mut self, handle: Handle) -> Result<()> {
        self.ensure_loaded()?;
        let span = self.owned_span(handle)?;

        let removed = self.buffer.remove_range(span.start, span.end);
        self.index.remove(&handle);
        self.index.shift_from(span.end + 1, -(removed as isize));
        self.entries.retain(|e| e.handle != handle);
        debug!("Deleted {} from lines {}-{}", handle, span.start + 1, span.end + 1);
        self.persist()
    }

    fn reset(&mut self, buffer: LineBuffer) {
        self.buffer = buffer;
        self.index.clear();
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
        self.next_slot = 0;
        self.loaded = true;
    }

    fn issue_handle(&mut self) -> Handle {
        let handle = Handle {
            generation: self.generation,
            slot: self.next_slot,
        };
        self.next_slot += 1;
        handle
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(SpawnError::NotLoaded(self.path.clone()))
        }
    }

    /// Span the record owns right now, including a comment line that sits
    /// directly above an uncommented data line.
    fn owned_span(&mut self, handle: Handle) -> Result<LineSpan> {
        if handle.generation != self.generation {
            return Err(SpawnError::StaleHandle(handle.to_string()));
        }
        let buffer = &self.buffer;
        let slot = self
            .index
            .get_mut(&handle)
            .ok_or_else(|| SpawnError::IndexMiss(handle.to_string()))?;

        if !slot.layout.has_comment
            && slot.span.start > 0
            && buffer.line(slot.span.start - 1).is_some_and(script::is_comment)
        {
            slot.span.start -= 1;
            slot.layout.has_comment = true;
        }
        Ok(slot.span)
    }

    fn render(&self, npc: &DynamicNpc) -> Vec<String> {
        let name = self.resolver.resolve(npc.npc_id);
        script::render_record(npc, name.as_deref(), &self.signature)
    }

    fn persist(&self) -> Result<()> {
        self.buffer.write(&self.path).inspect_err(|e| {
            error!("Failed to save {}: {}", self.path.display(), e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LIST: &str = "// dynamic spawns\n//Goblin spawned by Old\n50 - 1 2 0\n51 - 3 4 0\n\n//Guard spawned by Old\n52 - 5 6 1\n";

    fn resolver() -> Arc<dyn NameResolver> {
        Arc::new(|id: i32| (id == 50).then(|| "Goblin".to_string()))
    }

    fn store_with(text: &str) -> (DynamicNpcStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("spawns.txt");
        fs::write(&path, text).unwrap();
        let mut store = DynamicNpcStore::new(&path, "Tester", resolver());
        store.load().unwrap();
        (store, temp)
    }

    fn read(store: &DynamicNpcStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    #[test]
    fn test_load_attaches_comments() {
        let (store, _temp) = store_with(LIST);
        let handles: Vec<Handle> = store.entries().iter().map(|e| e.handle).collect();
        assert_eq!(handles.len(), 3);
        assert_eq!(store.span_of(handles[0]), Some(LineSpan::new(1, 2)));
        assert_eq!(store.span_of(handles[1]), Some(LineSpan::new(3, 3)));
        assert_eq!(store.span_of(handles[2]), Some(LineSpan::new(5, 6)));
    }

    #[test]
    fn test_create_appends_two_lines() {
        let (mut store, _temp) = store_with(LIST);
        let handle = store.create(DynamicNpc::new(50, Tile::new(9, 9, 0))).unwrap();
        assert_eq!(
            read(&store),
            format!("{}//Goblin spawned by Tester\n50 - 9 9 0\n", LIST)
        );
        assert_eq!(store.span_of(handle), Some(LineSpan::new(7, 8)));
    }

    #[test]
    fn test_update_without_comment_inserts_one_and_shifts() {
        let (mut store, _temp) = store_with(LIST);
        let second = store.entries()[1].handle;
        let third = store.entries()[2].handle;

        store.update(second, DynamicNpc::new(77, Tile::new(3, 4, 0))).unwrap();
        assert_eq!(
            read(&store),
            "// dynamic spawns\n//Goblin spawned by Old\n50 - 1 2 0\n//null spawned by Tester\n77 - 3 4 0\n\n//Guard spawned by Old\n52 - 5 6 1\n"
        );
        assert_eq!(store.span_of(second), Some(LineSpan::new(3, 4)));
        assert_eq!(store.span_of(third), Some(LineSpan::new(6, 7)));
        assert_eq!(store.get(second).unwrap().npc.npc_id, 77);
    }

    #[test]
    fn test_delete_removes_comment_and_data() {
        let (mut store, _temp) = store_with(LIST);
        let first = store.entries()[0].handle;
        let third = store.entries()[2].handle;

        store.delete(first).unwrap();
        assert_eq!(read(&store), "// dynamic spawns\n51 - 3 4 0\n\n//Guard spawned by Old\n52 - 5 6 1\n");
        assert_eq!(store.span_of(third), Some(LineSpan::new(3, 4)));
        assert_eq!(store.entries().len(), 2);

        let err = store.delete(first).unwrap_err();
        assert!(matches!(err, SpawnError::IndexMiss(_)));
    }

    #[test]
    fn test_delete_picks_up_comment_left_above_uncommented_record() {
        let (mut store, _temp) = store_with(LIST);
        let first = store.entries()[0].handle;
        let second = store.entries()[1].handle;

        // "51" sits below "50"'s data line; once "50" and its comment are
        // gone the header comment lands directly above it
        store.delete(first).unwrap();
        store.delete(second).unwrap();
        assert_eq!(read(&store), "\n//Guard spawned by Old\n52 - 5 6 1\n");
    }

    #[test]
    fn test_reload_makes_handles_stale() {
        let (mut store, _temp) = store_with(LIST);
        let old = store.entries()[0].handle;
        store.load().unwrap();
        let err = store.update(old, DynamicNpc::new(1, Tile::new(0, 0, 0))).unwrap_err();
        assert!(matches!(err, SpawnError::StaleHandle(_)));
        assert_eq!(read(&store), LIST);
    }

    #[test]
    fn test_upsert_dispatches_on_handle() {
        let (mut store, _temp) = store_with(LIST);
        let first = store.entries()[0].handle;
        assert_eq!(store.upsert(Some(first), DynamicNpc::new(50, Tile::new(1, 2, 1))).unwrap(), first);
        let created = store.upsert(None, DynamicNpc::new(60, Tile::new(0, 0, 0))).unwrap();
        assert_ne!(created, first);
        assert_eq!(store.entries().len(), 4);
    }

    #[test]
    fn test_create_in_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.txt");
        let mut store = DynamicNpcStore::new(&path, "Tester", resolver());
        assert_eq!(store.load().unwrap().status, LoadStatus::Missing);

        store.create(DynamicNpc::new(50, Tile::new(1, 2, 0))).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "//Goblin spawned by Tester\n50 - 1 2 0\n");
    }

    #[test]
    fn test_mutation_before_load_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = DynamicNpcStore::new(temp.path().join("x.txt"), "Tester", resolver());
        let err = store.create(DynamicNpc::new(1, Tile::new(0, 0, 0))).unwrap_err();
        assert!(matches!(err, SpawnError::NotLoaded(_)));
    }

    #[test]
    fn test_click_resolution() {
        let (store, _temp) = store_with(LIST);
        assert_eq!(store.find_exact_at(Tile::new(3, 4, 0)).unwrap().npc.npc_id, 51);
        assert_eq!(store.find_best_for_click(Tile::new(5, 6, 3)).unwrap().npc.npc_id, 52);
        assert!(store.find_exact_at(Tile::new(5, 6, 3)).is_none());
    }

    #[test]
    fn test_entries_at_plane() {
        let (store, _temp) = store_with(LIST);
        let upper: Vec<i32> = store.entries_at_plane(1).iter().map(|e| e.npc.npc_id).collect();
        assert_eq!(upper, vec![52]);
        assert_eq!(store.entries_at_plane(0).len(), 2);
    }
}
