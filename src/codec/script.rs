//! Commented-line codec for the dynamic NPC spawn list.
//!
//! A record is one data line `"<id> - <x> <y> <z>"`, optionally preceded by a
//! `//` comment line. Every other line is inert.

use crate::domain::{DynamicNpc, Tile};

pub const COMMENT_PREFIX: &str = "//";
pub const SEPARATOR: &str = " - ";

/// Name written when the resolver has nothing for an id
pub const UNRESOLVED_NAME: &str = "null";

pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with(COMMENT_PREFIX)
}

/// Decode a data line. Blank lines, comments and anything that does not
/// match the record shape yield `None`.
pub fn decode_line(line: &str) -> Option<DynamicNpc> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return None;
    }

    let (left, right) = trimmed.split_once(SEPARATOR)?;
    let npc_id: i32 = left.trim().parse().ok()?;

    let coords: Vec<i32> = right
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let &[x, y, z] = coords.as_slice() else {
        return None;
    };

    Some(DynamicNpc::new(npc_id, Tile::new(x, y, z)))
}

pub fn render_data(npc_id: i32, tile: Tile) -> String {
    format!("{}{}{} {} {}", npc_id, SEPARATOR, tile.x, tile.y, tile.z)
}

pub fn render_comment(name: Option<&str>, signature: &str) -> String {
    format!(
        "{}{} spawned by {}",
        COMMENT_PREFIX,
        name.unwrap_or(UNRESOLVED_NAME),
        signature
    )
}

/// Comment line followed by the data line
pub fn render_record(npc: &DynamicNpc, name: Option<&str>, signature: &str) -> Vec<String> {
    vec![render_comment(name, signature), render_data(npc.npc_id, npc.tile)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_line() {
        let npc = decode_line("  50 - 1 2 0  ").unwrap();
        assert_eq!(npc.npc_id, 50);
        assert_eq!(npc.tile, Tile::new(1, 2, 0));
        assert!(npc.area_hash.is_none());
    }

    #[test]
    fn test_decode_tolerates_extra_whitespace_between_coords() {
        let npc = decode_line("7 - 3200\t3201   1").unwrap();
        assert_eq!(npc.tile, Tile::new(3200, 3201, 1));
    }

    #[test]
    fn test_inert_lines() {
        assert!(decode_line("").is_none());
        assert!(decode_line("// 50 - 1 2 0").is_none());
        assert!(decode_line("50 - 1 2").is_none());
        assert!(decode_line("50 - 1 2 0 4").is_none());
        assert!(decode_line("abc - 1 2 0").is_none());
        assert!(decode_line("50 - 1 two 0").is_none());
        assert!(decode_line("50-1 2 0").is_none());
    }

    #[test]
    fn test_render_round_trip() {
        let npc = DynamicNpc::new(-3, Tile::new(10, -20, 2));
        let line = render_data(npc.npc_id, npc.tile);
        assert_eq!(line, "-3 - 10 -20 2");
        assert_eq!(decode_line(&line), Some(npc));
    }

    #[test]
    fn test_render_comment() {
        assert_eq!(render_comment(Some("Goblin"), "Editor"), "//Goblin spawned by Editor");
        assert_eq!(render_comment(None, "Editor"), "//null spawned by Editor");
        assert!(is_comment(&render_comment(None, "Editor")));
    }
}
