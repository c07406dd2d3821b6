//! Formatting-preserving store for `spawns.json`.
//!
//! Loading runs two independent passes over the same buffer: a whole-document
//! decode that supplies the record values, and a brace-matching scan that
//! supplies each record's line span, indent and separator style. Edits touch
//! only the lines of the record being changed (plus at most one separator
//! elsewhere); every other byte of the file is written back unchanged.
//!
//! When a record cannot be edited in place (it was never located, or its
//! neighbours are not cleanly separable) the store falls back to rewriting
//! the whole array canonically and reloading.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde_json::Value;

use super::buffer::LineBuffer;
use super::index::{LineSpan, PositionIndex};
use super::scan::{self, ArraySpan, LocatedObject, Separator};
use super::{LoadStatus, LoadSummary};
use crate::codec::json;
use crate::config::Config;
use crate::domain::{SpawnEntry, SpawnKey, SpawnProject};
use crate::error::{Result, SpawnError};

/// Layout of one located object
#[derive(Debug, Clone, PartialEq, Eq)]
struct JsonLayout {
    indent: String,
    separator: Separator,
}

#[derive(Debug)]
pub struct SpawnStore {
    path: PathBuf,
    buffer: LineBuffer,
    array: Option<ArraySpan>,
    index: PositionIndex<SpawnKey, JsonLayout>,
    project: SpawnProject,
    loaded: bool,
}

impl SpawnStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: LineBuffer::new(),
            array: None,
            index: PositionIndex::new(),
            project: SpawnProject::new(),
            loaded: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.spawns_json.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Decoded collection as of the last load plus later edits
    pub fn project(&self) -> &SpawnProject {
        &self.project
    }

    /// Line span currently recorded for a key
    pub fn span_of(&self, key: &SpawnKey) -> Option<LineSpan> {
        self.index.get(key).map(|slot| slot.span)
    }

    /// Number of records that can be edited in place
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }

    /// Read the file and rebuild the collection and position index.
    ///
    /// A missing file or a root that is not an array leaves an empty
    /// collection and is reported in the summary. Read errors leave the
    /// previous state untouched.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let buffer = match LineBuffer::load(&self.path) {
            Ok(buffer) => buffer,
            Err(SpawnError::NotFound(path)) => {
                warn!("Spawn file not found: {}", path.display());
                self.reset(LineBuffer::new());
                return Ok(LoadSummary::new(LoadStatus::Missing, 0, 0));
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e);
            }
        };
        self.reset(buffer);

        let items = match json::parse_array(&self.buffer.text()) {
            Ok(items) => items,
            Err(reason) => {
                warn!("Invalid JSON root in {}: {}", self.path.display(), reason);
                return Ok(LoadSummary::new(LoadStatus::MalformedRoot, 0, 0));
            }
        };
        self.project = SpawnProject::from_entries(json::decode_elements(&items));

        let located = scan::locate_objects(self.buffer.lines());
        self.array = located.array;
        self.build_index(located.objects);

        if self.index.len() != self.project.len() {
            warn!(
                "Located {} of {} records in {}; the rest are edited by full rewrite",
                self.index.len(),
                self.project.len(),
                self.path.display()
            );
        }
        info!(
            "Loaded {} spawn records from {} ({} indexed)",
            self.project.len(),
            self.path.display(),
            self.index.len()
        );

        Ok(LoadSummary::new(LoadStatus::Loaded, self.project.len(), self.index.len()))
    }

    /// Insert or replace the record with the same action and tile.
    pub fn upsert(&mut self, entry: SpawnEntry) -> Result<()> {
        self.ensure_loaded()?;
        let key = entry.key();

        if self.index.contains(&key) {
            self.replace_in_place(&entry);
        } else if self.project.contains_key(&key) {
            warn!("No position recorded for {}; rewriting {}", key, self.path.display());
            return self.rewrite(|items| {
                upsert_value(items, &entry);
                Ok(())
            });
        } else if !self.append_in_place(&entry) {
            warn!("Cannot append {} in place; rewriting {}", key, self.path.display());
            return self.rewrite(|items| {
                upsert_value(items, &entry);
                Ok(())
            });
        }

        self.project.upsert(entry);
        self.persist()
    }

    /// Remove the record with this key.
    pub fn delete(&mut self, key: &SpawnKey) -> Result<()> {
        self.ensure_loaded()?;

        if self.delete_in_place(key) {
            self.project.remove(key);
            return self.persist();
        }

        warn!("Cannot delete {} in place; rewriting {}", key, self.path.display());
        let key = *key;
        self.rewrite(move |items| {
            let pos = items
                .iter()
                .position(|item| json::value_has_key(item, &key))
                .ok_or_else(|| SpawnError::RecordNotFound(key.to_string()))?;
            items.remove(pos);
            Ok(())
        })
    }

    /// Write the decoded collection as a canonical document to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        let text = json::encode_document(self.project.entries())?;
        fs::write(path, text)?;
        info!("Exported {} records to {}", self.project.len(), path.display());
        Ok(())
    }

    fn reset(&mut self, buffer: LineBuffer) {
        self.buffer = buffer;
        self.array = None;
        self.index.clear();
        self.project.clear();
        self.loaded = true;
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(SpawnError::NotLoaded(self.path.clone()))
        }
    }

    fn build_index(&mut self, objects: Vec<LocatedObject>) {
        for object in objects {
            let entry = match json::decode_value(&object.value) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Lines {}-{} not indexed: {}", object.span.start + 1, object.span.end + 1, e);
                    continue;
                }
            };
            let layout = JsonLayout {
                indent: object.indent,
                separator: object.separator,
            };
            if !self.index.push(entry.key(), object.span, layout) {
                warn!("Duplicate record {} at line {}", entry.key(), object.span.start + 1);
            }
        }
    }

    fn replace_in_place(&mut self, entry: &SpawnEntry) {
        let key = entry.key();
        let Some(slot) = self.index.get(&key) else {
            return;
        };
        let old = slot.span;
        let lines = json::render(entry, &slot.layout.indent, slot.layout.separator == Separator::Inline);
        let count = lines.len();

        let delta = self.buffer.replace_range(old.start, old.end, lines);
        self.shift_lines(old.end + 1, delta);
        if let Some(slot) = self.index.get_mut(&key) {
            slot.span = LineSpan::of_len(old.start, count);
        }
        debug!("Replaced {} at lines {}-{} (delta {})", key, old.start + 1, old.end + 1, delta);
    }

    /// Append before the closing bracket. Returns `false` without touching
    /// the buffer if the array tail holds anything but blank or comment lines.
    fn append_in_place(&mut self, entry: &SpawnEntry) -> bool {
        let Some(array) = self.array else {
            return false;
        };
        let tail_from = match self.index.last() {
            Some(last) => last.span.end + 1,
            None if self.open_bracket_clear(array) => array.open + 1,
            None => return false,
        };
        if !self.close_bracket_clear(array) || !self.is_inert(tail_from, array.close, false) {
            return false;
        }

        if let Some(last) = self.index.last_mut() {
            if last.layout.separator == Separator::None {
                let line = self.buffer.line(last.span.end).unwrap_or_default().trim_end().to_string();
                self.buffer.set_line(last.span.end, format!("{},", line));
                last.layout.separator = Separator::Inline;
            }
        }

        let indent = match self.index.first() {
            Some(first) => first.layout.indent.clone(),
            None => {
                let open_line = self.buffer.line(array.open).unwrap_or_default();
                format!("{}{}", scan::leading_whitespace(open_line), json::INDENT_STEP)
            }
        };
        let lines = json::render(entry, &indent, false);
        let added = self.buffer.insert_at(array.close, lines);
        self.index.push(
            entry.key(),
            LineSpan::of_len(array.close, added),
            JsonLayout {
                indent,
                separator: Separator::None,
            },
        );
        self.array = Some(ArraySpan {
            open: array.open,
            close: array.close + added,
        });
        debug!("Appended {} at line {}", entry.key(), array.close + 1);
        true
    }

    /// Remove a located record. Returns `false` without touching the buffer
    /// if the record is not indexed or its separator cannot be fixed up
    /// safely.
    fn delete_in_place(&mut self, key: &SpawnKey) -> bool {
        let Some(array) = self.array else {
            return false;
        };
        let Some(slot) = self.index.get(key) else {
            return false;
        };
        let span = slot.span;
        let separator = slot.layout.separator;

        // Deleting the last element leaves the previous element's comma
        // dangling; that element must directly precede this one.
        let dangling = if separator == Separator::None {
            match self.index.previous(key) {
                Some(prev) if self.is_inert(prev.span.end + 1, span.start, true) => {
                    Some((prev.key, prev.span, prev.layout.separator))
                }
                Some(_) => return false,
                None if self.open_bracket_clear(array) && self.is_inert(array.open + 1, span.start, false) => None,
                None => return false,
            }
        } else {
            None
        };

        let own_comma = match separator {
            Separator::NextLine => scan::next_non_blank(self.buffer.lines(), span.end + 1),
            _ => None,
        };

        self.index.remove(key);
        if let Some(line) = own_comma {
            self.drop_comma_at(line);
        }
        self.remove_lines(span.start, span.end);

        if let Some((prev_key, prev_span, prev_separator)) = dangling {
            match prev_separator {
                Separator::Inline => {
                    let mut line = self.buffer.line(prev_span.end).unwrap_or_default().to_string();
                    if let Some(pos) = line.rfind(',') {
                        line.remove(pos);
                        self.buffer.set_line(prev_span.end, line.trim_end().to_string());
                    }
                }
                Separator::NextLine => {
                    if let Some(line) = scan::next_non_blank(self.buffer.lines(), prev_span.end + 1) {
                        self.drop_comma_at(line);
                    }
                }
                Separator::None => {}
            }
            if let Some(prev) = self.index.get_mut(&prev_key) {
                prev.layout.separator = Separator::None;
            }
        }

        debug!("Deleted {} from lines {}-{}", key, span.start + 1, span.end + 1);
        true
    }

    /// Remove a standalone comma line, or the first comma on a shared line.
    fn drop_comma_at(&mut self, line_no: usize) {
        let Some(line) = self.buffer.line(line_no) else {
            return;
        };
        if line.trim() == "," {
            self.remove_lines(line_no, line_no);
        } else if let Some(pos) = line.find(',') {
            let mut line = line.to_string();
            line.remove(pos);
            self.buffer.set_line(line_no, line);
        }
    }

    fn remove_lines(&mut self, start: usize, end: usize) {
        let removed = self.buffer.remove_range(start, end);
        self.shift_lines(end + 1, -(removed as isize));
    }

    /// Shift every located range and the closing bracket at or after `from`.
    fn shift_lines(&mut self, from: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        self.index.shift_from(from, delta);
        if let Some(array) = self.array.as_mut() {
            if array.close >= from {
                array.close = array.close.saturating_add_signed(delta);
            }
        }
    }

    /// Lines in `[from, to)` hold nothing but whitespace, comments and,
    /// if `allow_commas`, standalone separators.
    fn is_inert(&self, from: usize, to: usize, allow_commas: bool) -> bool {
        self.buffer.lines()[from.min(to)..to].iter().all(|line| {
            let t = line.trim();
            t.is_empty() || t.starts_with("//") || (allow_commas && t == ",")
        })
    }

    fn open_bracket_clear(&self, array: ArraySpan) -> bool {
        let line = self.buffer.line(array.open).unwrap_or_default();
        line.find('[').is_some_and(|pos| line[pos + 1..].trim().is_empty())
    }

    fn close_bracket_clear(&self, array: ArraySpan) -> bool {
        let line = self.buffer.line(array.close).unwrap_or_default();
        line.rfind(']').is_some_and(|pos| line[..pos].trim().is_empty())
    }

    fn persist(&self) -> Result<()> {
        self.buffer.write(&self.path).inspect_err(|e| {
            error!("Failed to save {}: {}", self.path.display(), e);
        })
    }

    /// Parse the current buffer, apply `edit` to the raw elements, write the
    /// canonical document and reload.
    fn rewrite<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Value>) -> Result<()>,
    {
        let mut items = json::parse_array(&self.buffer.text()).map_err(|reason| SpawnError::MalformedRoot {
            path: self.path.clone(),
            reason,
        })?;
        edit(&mut items)?;

        let text = json::encode_values(&items)?;
        LineBuffer::from_text(&text)
            .with_ending(self.buffer.ending())
            .write(&self.path)
            .inspect_err(|e| error!("Failed to rewrite {}: {}", self.path.display(), e))?;
        info!("Rewrote {} in canonical form", self.path.display());

        self.load()?;
        Ok(())
    }
}

/// Replace the first raw element with the same key, or append.
fn upsert_value(items: &mut Vec<Value>, entry: &SpawnEntry) {
    let key = entry.key();
    let value = json::to_value(entry);
    match items.iter_mut().find(|item| json::value_has_key(item, &key)) {
        Some(item) => *item = value,
        None => items.push(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NpcPlacement, ObjectPlacement, Tile};
    use tempfile::TempDir;

    const THREE: &str = r#"[
    {
        "action": "spawn_object",
        "tile": { "x": 3200, "y": 3200, "z": 0 },
        "id": 1276, "type": 10, "rotation": 1
    },
    {
        "action": "delete_object",
        "tile": { "x": 3201, "y": 3200, "z": 0 }
    },
    {
        "action": "spawn_npc",
        "tile": { "x": 3202, "y": 3200, "z": 1 },
        "id": 7
    }
]
"#;

    fn store_with(text: &str) -> (SpawnStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("spawns.json");
        fs::write(&path, text).unwrap();
        let mut store = SpawnStore::new(&path);
        store.load().unwrap();
        (store, temp)
    }

    fn read(store: &SpawnStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    fn delete_at(x: i32, y: i32, z: i32) -> SpawnKey {
        SpawnEntry::DeleteObject { tile: Tile::new(x, y, z) }.key()
    }

    #[test]
    fn test_load_indexes_every_record() {
        let (store, _temp) = store_with(THREE);
        assert_eq!(store.project().len(), 3);
        assert_eq!(store.indexed_len(), 3);
        assert_eq!(store.span_of(&delete_at(3201, 3200, 0)), Some(LineSpan::new(6, 9)));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let mut store = SpawnStore::new(temp.path().join("absent.json"));
        let summary = store.load().unwrap();
        assert_eq!(summary.status, LoadStatus::Missing);
        assert!(store.project().is_empty());
    }

    #[test]
    fn test_load_malformed_root() {
        let (store, _temp) = store_with("{\"action\": \"spawn_npc\"}");
        assert!(store.project().is_empty());
        assert_eq!(store.indexed_len(), 0);
    }

    #[test]
    fn test_upsert_before_load_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = SpawnStore::new(temp.path().join("spawns.json"));
        let err = store.upsert(SpawnEntry::DeleteObject { tile: Tile::new(0, 0, 0) }).unwrap_err();
        assert!(matches!(err, SpawnError::NotLoaded(_)));
    }

    #[test]
    fn test_replace_keeps_indent_and_shifts_later_records() {
        let (mut store, _temp) = store_with(THREE);
        let npc_key = SpawnEntry::SpawnNpc {
            tile: Tile::new(3202, 3200, 1),
            npc: NpcPlacement::new(0),
        }
        .key();
        assert_eq!(store.span_of(&npc_key), Some(LineSpan::new(10, 14)));

        let replacement = SpawnEntry::SpawnObject {
            tile: Tile::new(3200, 3200, 0),
            object: ObjectPlacement::new(99),
        };
        store.upsert(replacement).unwrap();

        // 5-line object re-rendered as 11 lines
        assert_eq!(store.span_of(&replacement.key()), Some(LineSpan::new(1, 11)));
        assert_eq!(store.span_of(&delete_at(3201, 3200, 0)), Some(LineSpan::new(12, 15)));
        assert_eq!(store.span_of(&npc_key), Some(LineSpan::new(16, 20)));

        let text = read(&store);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "    {");
        assert_eq!(lines[2], "      \"action\": \"spawn_object\",");
        assert_eq!(lines[11], "    },");
        assert_eq!(lines[12..].join("\n"), THREE.lines().skip(6).collect::<Vec<_>>().join("\n"));
    }

    #[test]
    fn test_append_adds_comma_to_previous_last() {
        let (mut store, _temp) = store_with(THREE);
        let entry = SpawnEntry::DeleteObject { tile: Tile::new(1, 1, 0) };
        store.upsert(entry).unwrap();

        let text = read(&store);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[14], "    },");
        assert_eq!(lines[15], "    {");
        assert_eq!(lines.last().unwrap(), &"]");
        assert_eq!(store.span_of(&entry.key()), Some(LineSpan::new(15, 22)));

        let mut reloaded = SpawnStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.project().len(), 4);
        assert_eq!(reloaded.indexed_len(), 4);
    }

    #[test]
    fn test_append_to_empty_array() {
        let (mut store, _temp) = store_with("[\n]\n");
        let entry = SpawnEntry::DeleteObject { tile: Tile::new(1, 1, 0) };
        store.upsert(entry).unwrap();
        let expected = format!("[\n{}\n]\n", json::render(&entry, "  ", false).join("\n"));
        assert_eq!(read(&store), expected);
    }

    #[test]
    fn test_delete_middle_record() {
        let (mut store, _temp) = store_with(THREE);
        store.delete(&delete_at(3201, 3200, 0)).unwrap();

        let expected: Vec<&str> = THREE
            .lines()
            .enumerate()
            .filter(|(i, _)| !(6..=9).contains(i))
            .map(|(_, l)| l)
            .collect();
        assert_eq!(read(&store), format!("{}\n", expected.join("\n")));
        assert_eq!(store.project().len(), 2);
        assert_eq!(store.indexed_len(), 2);
    }

    #[test]
    fn test_delete_last_record_strips_dangling_comma() {
        let (mut store, _temp) = store_with(THREE);
        let npc = store.project().entries()[2].key();
        store.delete(&npc).unwrap();

        let text = read(&store);
        assert!(serde_json::from_str::<Value>(&text).is_ok());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[9], "    }");
        assert_eq!(lines[10], "]");
    }

    #[test]
    fn test_delete_with_comma_on_own_line() {
        let doc = "[\n  {\"action\": \"delete_object\", \"tile\": {\"x\": 1, \"y\": 1, \"z\": 0}}\n  ,\n  {\"action\": \"delete_object\", \"tile\": {\"x\": 2, \"y\": 2, \"z\": 0}}\n]\n";
        let (mut store, _temp) = store_with(doc);
        store.delete(&delete_at(1, 1, 0)).unwrap();
        assert_eq!(
            read(&store),
            "[\n  {\"action\": \"delete_object\", \"tile\": {\"x\": 2, \"y\": 2, \"z\": 0}}\n]\n"
        );
        assert_eq!(store.span_of(&delete_at(2, 2, 0)), Some(LineSpan::new(1, 1)));
    }

    #[test]
    fn test_delete_unknown_key_reports_not_found() {
        let (mut store, _temp) = store_with(THREE);
        let before = read(&store);
        let err = store.delete(&delete_at(0, 0, 0)).unwrap_err();
        assert!(matches!(err, SpawnError::RecordNotFound(_)));
        assert_eq!(read(&store), before);
    }

    #[test]
    fn test_unindexed_record_falls_back_to_rewrite() {
        let doc = "[{\"action\": \"delete_object\", \"tile\": {\"x\": 1, \"y\": 1, \"z\": 0}},\n  {\"action\": \"delete_object\", \"tile\": {\"x\": 2, \"y\": 2, \"z\": 0}}\n]\n";
        let (mut store, _temp) = store_with(doc);
        assert_eq!(store.project().len(), 2);
        assert_eq!(store.indexed_len(), 1);

        store.delete(&delete_at(1, 1, 0)).unwrap();
        let text = read(&store);
        let expected = json::encode_document(&[SpawnEntry::DeleteObject { tile: Tile::new(2, 2, 0) }]).unwrap();
        assert_eq!(text, expected);
        assert_eq!(store.project().len(), 1);
        assert_eq!(store.indexed_len(), 1);
    }

    #[test]
    fn test_upsert_into_missing_file_creates_it() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("spawns.json");
        let mut store = SpawnStore::new(&path);
        store.load().unwrap();

        let entry = SpawnEntry::SpawnNpc {
            tile: Tile::new(5, 5, 0),
            npc: NpcPlacement::new(100),
        };
        store.upsert(entry).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), json::encode_document(&[entry]).unwrap());
        assert_eq!(store.project().entries(), &[entry]);
    }

    #[test]
    fn test_malformed_root_refuses_edits() {
        let (mut store, _temp) = store_with("{ \"not\": \"an array\" }");
        let err = store.upsert(SpawnEntry::DeleteObject { tile: Tile::new(0, 0, 0) }).unwrap_err();
        assert!(matches!(err, SpawnError::MalformedRoot { .. }));
        assert_eq!(read(&store), "{ \"not\": \"an array\" }");
    }

    #[test]
    fn test_export_writes_canonical_document() {
        let (store, temp) = store_with(THREE);
        let out = temp.path().join("export.json");
        store.export(&out).unwrap();
        let exported = fs::read_to_string(&out).unwrap();
        assert_eq!(exported, json::encode_document(store.project().entries()).unwrap());
    }

    const COMMENTED: &str = r#"[
  // lumbridge trees
  {"action": "delete_object", "tile": {"x": 3200, "y": 3200, "z": 0}},
  // guards
  {"action": "spawn_npc", "tile": {"x": 3201, "y": 3200, "z": 0}, "id": 3}
]
"#;

    #[test]
    fn test_commented_file_loads_and_edits_in_place() {
        let (mut store, _temp) = store_with(COMMENTED);
        assert_eq!(store.project().len(), 2);
        assert_eq!(store.indexed_len(), 2);

        let added = SpawnEntry::DeleteObject { tile: Tile::new(1, 1, 0) };
        store.upsert(added).unwrap();
        store.delete(&delete_at(3200, 3200, 0)).unwrap();

        let text = read(&store);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  // lumbridge trees");
        assert_eq!(lines[2], "  // guards");
        assert_eq!(lines[3], format!("{},", COMMENTED.lines().nth(4).unwrap()));
        assert_eq!(lines[4..12], json::render(&added, "  ", false)[..]);
        assert_eq!(lines[12], "]");

        let mut reloaded = SpawnStore::new(store.path());
        let summary = reloaded.load().unwrap();
        assert_eq!(summary.status, LoadStatus::Loaded);
        assert_eq!(reloaded.project().entries(), store.project().entries());
        assert_eq!(reloaded.indexed_len(), 2);
    }

    #[test]
    fn test_trailing_comma_before_bracket_is_tolerated() {
        let text = "[\n  {\"action\": \"delete_object\", \"tile\": {\"x\": 1, \"y\": 1, \"z\": 0}},\n]\n";
        let (mut store, _temp) = store_with(text);
        assert_eq!(store.project().len(), 1);
        assert_eq!(store.indexed_len(), 1);

        store.delete(&delete_at(1, 1, 0)).unwrap();
        assert_eq!(read(&store), "[\n]\n");
    }
}
