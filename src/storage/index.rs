//! Position index: where each live record sits in its line buffer.
//!
//! Slots are kept in file order. `by_key` maps a record key (or handle) to
//! the slot's position in that order and is rebuilt whenever a slot is
//! removed.

use std::collections::HashMap;
use std::hash::Hash;

/// Inclusive, 0-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    /// Span of `count` lines starting at `start`; `count` must be non-zero.
    pub fn of_len(start: usize, count: usize) -> Self {
        Self::new(start, start + count - 1)
    }

    fn shifted(self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<K, L> {
    pub key: K,
    pub span: LineSpan,
    pub layout: L,
}

#[derive(Debug, Clone)]
pub struct PositionIndex<K, L> {
    slots: Vec<Slot<K, L>>,
    by_key: HashMap<K, usize>,
}

impl<K, L> Default for PositionIndex<K, L> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            by_key: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, L> PositionIndex<K, L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.by_key.clear();
    }

    pub fn contains(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    /// Add a slot positioned after every existing slot. Returns `false` and
    /// leaves the index unchanged if the key is already present.
    pub fn push(&mut self, key: K, span: LineSpan, layout: L) -> bool {
        if self.by_key.contains_key(&key) {
            return false;
        }
        debug_assert!(self.slots.last().is_none_or(|last| last.span.end < span.start));
        self.by_key.insert(key.clone(), self.slots.len());
        self.slots.push(Slot { key, span, layout });
        true
    }

    pub fn get(&self, key: &K) -> Option<&Slot<K, L>> {
        self.by_key.get(key).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Slot<K, L>> {
        let i = *self.by_key.get(key)?;
        self.slots.get_mut(i)
    }

    pub fn remove(&mut self, key: &K) -> Option<Slot<K, L>> {
        let i = self.by_key.remove(key)?;
        let slot = self.slots.remove(i);
        self.reindex();
        Some(slot)
    }

    /// Slot positioned directly before the one holding `key`
    pub fn previous(&self, key: &K) -> Option<&Slot<K, L>> {
        let i = *self.by_key.get(key)?;
        i.checked_sub(1).map(|p| &self.slots[p])
    }

    pub fn first(&self) -> Option<&Slot<K, L>> {
        self.slots.first()
    }

    pub fn last(&self) -> Option<&Slot<K, L>> {
        self.slots.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Slot<K, L>> {
        self.slots.last_mut()
    }

    /// Move every slot that starts at or after `from_line` by `delta` lines.
    pub fn shift_from(&mut self, from_line: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for slot in self.slots.iter_mut().filter(|s| s.span.start >= from_line) {
            slot.span = slot.span.shifted(delta);
        }
    }

    fn reindex(&mut self) {
        self.by_key.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.by_key.insert(slot.key.clone(), i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(spans: &[(usize, usize)]) -> PositionIndex<&'static str, ()> {
        let keys = ["a", "b", "c", "d"];
        let mut index = PositionIndex::new();
        for (key, &(start, end)) in keys.iter().zip(spans) {
            assert!(index.push(*key, LineSpan::new(start, end), ()));
        }
        index
    }

    #[test]
    fn test_push_rejects_duplicate_key() {
        let mut index = index_of(&[(1, 3)]);
        assert!(!index.push("a", LineSpan::new(5, 6), ()));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&"a").unwrap().span, LineSpan::new(1, 3));
    }

    #[test]
    fn test_shift_only_moves_later_slots() {
        let mut index = index_of(&[(1, 3), (4, 6), (7, 9)]);
        index.shift_from(4, 2);
        assert_eq!(index.get(&"a").unwrap().span, LineSpan::new(1, 3));
        assert_eq!(index.get(&"b").unwrap().span, LineSpan::new(6, 8));
        assert_eq!(index.get(&"c").unwrap().span, LineSpan::new(9, 11));

        index.shift_from(9, -1);
        assert_eq!(index.get(&"b").unwrap().span, LineSpan::new(6, 8));
        assert_eq!(index.get(&"c").unwrap().span, LineSpan::new(8, 10));
    }

    #[test]
    fn test_remove_reindexes() {
        let mut index = index_of(&[(1, 3), (4, 6), (7, 9)]);
        let removed = index.remove(&"b").unwrap();
        assert_eq!(removed.span, LineSpan::new(4, 6));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&"c").unwrap().span, LineSpan::new(7, 9));
        assert_eq!(index.previous(&"c").unwrap().key, "a");
        assert!(index.remove(&"b").is_none());
    }

    #[test]
    fn test_span_helpers() {
        let span = LineSpan::of_len(4, 3);
        assert_eq!(span, LineSpan::new(4, 6));
        assert_eq!(LineSpan::of_len(0, 1), LineSpan::new(0, 0));
    }
}
