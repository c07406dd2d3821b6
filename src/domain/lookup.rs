//! Tile lookups shared by both collections.
//!
//! Click resolution prefers an exact `(x, y, z)` hit and falls back to the
//! first record on the same `(x, y)` column on any plane.

use super::tile::Tile;

/// Anything positioned on a tile
pub trait Placed {
    fn tile(&self) -> Tile;
}

/// First record exactly on `tile`
pub fn find_exact_at<'a, T: Placed>(items: impl IntoIterator<Item = &'a T>, tile: Tile) -> Option<&'a T>
where
    T: 'a,
{
    items.into_iter().find(|item| item.tile() == tile)
}

/// First record on the same column as `tile`, any plane
pub fn find_first_at_xy<'a, T: Placed>(items: impl IntoIterator<Item = &'a T>, tile: Tile) -> Option<&'a T>
where
    T: 'a,
{
    items.into_iter().find(|item| item.tile().same_column(&tile))
}

/// Exact hit if there is one, otherwise the first same-column hit
pub fn find_best_for_click<T: Placed>(items: &[T], tile: Tile) -> Option<&T> {
    find_exact_at(items, tile).or_else(|| find_first_at_xy(items, tile))
}

/// Every record on plane `z`, in order
pub fn entries_at_plane<T: Placed>(items: &[T], z: i32) -> Vec<&T> {
    items.iter().filter(|item| item.tile().z == z).collect()
}
