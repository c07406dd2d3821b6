//! Tabular-JSON codec for `spawns.json` elements.
//!
//! The renderer emits a fixed block per record with a two-space step per
//! nesting level. Field order is fixed per action, and everything the
//! renderer writes is accepted by the decoder unchanged.

use std::io::Read;

use json_comments::StripComments;
use log::debug;
use serde_json::{Map, Value, json};

use crate::domain::{
    ActionType, DEFAULT_OBJECT_TYPE, Direction, NpcPlacement, ObjectPlacement, SpawnEntry, SpawnKey,
    Tile, normalize_rotation,
};
use crate::error::{Result, SpawnError};

/// Indent step per nesting level
pub const INDENT_STEP: &str = "  ";

/// Parse a whole document and return the elements of its root array.
///
/// Comments and trailing commas are tolerated (see [`parse_lenient`]). A
/// document that is blank once comments are removed reads as an empty array.
/// Anything else that is not an array is rejected with the reason as the
/// error.
pub fn parse_array(text: &str) -> std::result::Result<Vec<Value>, String> {
    let cleaned = clean(text)?;
    if cleaned.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(format!("expected array at root, found {}", kind_name(&other))),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse JSON that may carry `//`, `/* */` or `#` comments and trailing
/// commas before a closing bracket or brace.
pub fn parse_lenient(text: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(&clean(text)?).map_err(|e| e.to_string())
}

/// Blank out comments and trailing commas. Byte offsets are kept so parse
/// errors still point at the right line and column.
fn clean(text: &str) -> std::result::Result<String, String> {
    let mut stripped = String::with_capacity(text.len());
    StripComments::new(text.as_bytes())
        .read_to_string(&mut stripped)
        .map_err(|e| e.to_string())?;
    Ok(blank_trailing_commas(&stripped))
}

fn blank_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending: Option<usize> = None;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                pending = None;
                in_string = true;
            }
            ',' => pending = Some(out.len()),
            ']' | '}' => {
                if let Some(at) = pending.take() {
                    out.replace_range(at..at + 1, " ");
                }
            }
            c if c.is_whitespace() => {}
            _ => pending = None,
        }
        out.push(c);
    }
    out
}

/// Decode every element, skipping the ones that are not spawn records.
pub fn decode_elements(items: &[Value]) -> Vec<SpawnEntry> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match decode_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping element {}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Decode one JSON value into a record.
pub fn decode_value(value: &Value) -> Result<SpawnEntry> {
    match value {
        Value::Object(obj) => decode_object(obj),
        other => Err(SpawnError::MalformedElement(format!(
            "expected object, found {}",
            kind_name(other)
        ))),
    }
}

pub fn decode_object(obj: &Map<String, Value>) -> Result<SpawnEntry> {
    let action_str = get_str(obj, "action").ok_or_else(|| SpawnError::MalformedElement("missing action".to_string()))?;
    let action = ActionType::from_wire(&action_str)
        .ok_or_else(|| SpawnError::MalformedElement(format!("unknown action: {}", action_str)))?;

    let tile_obj = obj
        .get("tile")
        .and_then(Value::as_object)
        .ok_or_else(|| SpawnError::MalformedElement("missing tile".to_string()))?;
    let coord = |name: &str| {
        get_int(tile_obj, name).ok_or_else(|| SpawnError::MalformedElement(format!("tile missing {}", name)))
    };
    let tile = Tile::new(coord("x")?, coord("y")?, coord("z")?);

    let entry = match action {
        ActionType::SpawnObject | ActionType::SpawnOverObject => {
            let object = ObjectPlacement {
                id: get_int(obj, "id").unwrap_or(0),
                object_type: get_int(obj, "type").unwrap_or(DEFAULT_OBJECT_TYPE),
                rotation: normalize_rotation(get_int(obj, "rotation").unwrap_or(0)),
            };
            if action == ActionType::SpawnObject {
                SpawnEntry::SpawnObject { tile, object }
            } else {
                SpawnEntry::SpawnOverObject { tile, object }
            }
        }
        ActionType::SpawnNpc => SpawnEntry::SpawnNpc {
            tile,
            npc: NpcPlacement {
                id: get_int(obj, "id").unwrap_or(0),
                walk_radius: get_int(obj, "walk_radius").unwrap_or(0),
                aggressive: get_bool(obj, "aggressive").unwrap_or(false),
                direction: get_str(obj, "direction")
                    .map(|d| Direction::parse_lenient(&d))
                    .unwrap_or_default(),
            },
        },
        ActionType::DeleteObject => SpawnEntry::DeleteObject { tile },
    };

    Ok(entry)
}

/// Render one record as lines at `indent`, with an optional trailing comma.
pub fn render(entry: &SpawnEntry, indent: &str, trailing_comma: bool) -> Vec<String> {
    let p1 = indent.to_string();
    let p2 = format!("{}{}", indent, INDENT_STEP);
    let p3 = format!("{}{}", p2, INDENT_STEP);
    let tile = entry.tile();
    let has_fields = !matches!(entry, SpawnEntry::DeleteObject { .. });

    let mut out = vec![
        format!("{}{{", p1),
        format!("{}\"action\": \"{}\",", p2, entry.action().as_str()),
        format!("{}\"tile\": {{", p2),
        format!("{}\"x\": {},", p3, tile.x),
        format!("{}\"y\": {},", p3, tile.y),
        format!("{}\"z\": {}", p3, tile.z),
        format!("{}}}{}", p2, if has_fields { "," } else { "" }),
    ];

    match entry {
        SpawnEntry::SpawnObject { object, .. } | SpawnEntry::SpawnOverObject { object, .. } => {
            out.push(format!("{}\"id\": {},", p2, object.id));
            out.push(format!("{}\"type\": {},", p2, object.object_type));
            out.push(format!("{}\"rotation\": {}", p2, normalize_rotation(object.rotation)));
        }
        SpawnEntry::SpawnNpc { npc, .. } => {
            out.push(format!("{}\"id\": {},", p2, npc.id));
            out.push(format!("{}\"walk_radius\": {},", p2, npc.walk_radius));
            out.push(format!("{}\"aggressive\": {},", p2, npc.aggressive));
            out.push(format!("{}\"direction\": \"{}\"", p2, npc.direction.as_str()));
        }
        SpawnEntry::DeleteObject { .. } => {}
    }

    out.push(format!("{}}}{}", p1, if trailing_comma { "," } else { "" }));
    out
}

/// Value form of a record, same field order as `render`.
pub fn to_value(entry: &SpawnEntry) -> Value {
    let tile = entry.tile();
    let mut value = json!({
        "action": entry.action().as_str(),
        "tile": { "x": tile.x, "y": tile.y, "z": tile.z },
    });
    // json! always builds an object here
    if let Value::Object(obj) = &mut value {
        match entry {
            SpawnEntry::SpawnObject { object, .. } | SpawnEntry::SpawnOverObject { object, .. } => {
                obj.insert("id".to_string(), json!(object.id));
                obj.insert("type".to_string(), json!(object.object_type));
                obj.insert("rotation".to_string(), json!(normalize_rotation(object.rotation)));
            }
            SpawnEntry::SpawnNpc { npc, .. } => {
                obj.insert("id".to_string(), json!(npc.id));
                obj.insert("walk_radius".to_string(), json!(npc.walk_radius));
                obj.insert("aggressive".to_string(), json!(npc.aggressive));
                obj.insert("direction".to_string(), json!(npc.direction.as_str()));
            }
            SpawnEntry::DeleteObject { .. } => {}
        }
    }
    value
}

/// True if `value` decodes to a record with this key.
pub fn value_has_key(value: &Value, key: &SpawnKey) -> bool {
    decode_value(value).is_ok_and(|e| e.key() == *key)
}

/// Canonical pretty-printed document for a list of raw elements.
pub fn encode_values(items: &[Value]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&Value::Array(items.to_vec()))?;
    text.push('\n');
    Ok(text)
}

/// Canonical pretty-printed document for a list of records.
pub fn encode_document(entries: &[SpawnEntry]) -> Result<String> {
    let items: Vec<Value> = entries.iter().map(to_value).collect();
    encode_values(&items)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn get_int(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    match obj.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .or_else(|| n.as_f64().map(|f| f as i32)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn get_bool(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
        _ => None,
    }
}

fn get_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<SpawnEntry> {
        vec![
            SpawnEntry::SpawnObject {
                tile: Tile::new(3200, 3201, 0),
                object: ObjectPlacement::new(1276).with_type(22).with_rotation(3),
            },
            SpawnEntry::SpawnOverObject {
                tile: Tile::new(3210, 3211, 1),
                object: ObjectPlacement::new(409).with_rotation(-1),
            },
            SpawnEntry::SpawnNpc {
                tile: Tile::new(5, 5, 0),
                npc: NpcPlacement {
                    id: 100,
                    walk_radius: 4,
                    aggressive: true,
                    direction: Direction::SouthWest,
                },
            },
            SpawnEntry::DeleteObject {
                tile: Tile::new(-7, 12, 3),
            },
        ]
    }

    #[test]
    fn test_render_then_decode_is_identity() {
        for entry in samples() {
            for comma in [false, true] {
                let text = render(&entry, "    ", comma).join("\n");
                let text = text.trim_end_matches(',');
                let value: Value = serde_json::from_str(text).unwrap();
                assert_eq!(decode_value(&value).unwrap(), entry, "{}", text);
            }
        }
    }

    #[test]
    fn test_render_npc_block() {
        let entry = SpawnEntry::SpawnNpc {
            tile: Tile::new(5, 5, 0),
            npc: NpcPlacement::new(100),
        };
        let lines = render(&entry, "  ", true);
        assert_eq!(
            lines,
            vec![
                "  {",
                "    \"action\": \"spawn_npc\",",
                "    \"tile\": {",
                "      \"x\": 5,",
                "      \"y\": 5,",
                "      \"z\": 0",
                "    },",
                "    \"id\": 100,",
                "    \"walk_radius\": 0,",
                "    \"aggressive\": false,",
                "    \"direction\": \"NORTH\"",
                "  },",
            ]
        );
    }

    #[test]
    fn test_render_delete_has_no_dangling_comma() {
        let entry = SpawnEntry::DeleteObject { tile: Tile::new(1, 2, 3) };
        let lines = render(&entry, "", false);
        assert_eq!(lines[6], "  }");
        assert_eq!(lines.last().unwrap(), "}");
    }

    #[test]
    fn test_render_matches_canonical_document() {
        let entries = samples();
        let doc = encode_document(&entries).unwrap();
        let mut expected = vec!["[".to_string()];
        for (i, entry) in entries.iter().enumerate() {
            expected.extend(render(entry, INDENT_STEP, i + 1 < entries.len()));
        }
        expected.push("]".to_string());
        assert_eq!(doc, format!("{}\n", expected.join("\n")));
    }

    #[test]
    fn test_decode_defaults() {
        let value = json!({"action": "spawn_npc", "tile": {"x": 1, "y": 2, "z": 0}, "id": 9});
        let entry = decode_value(&value).unwrap();
        assert_eq!(
            entry,
            SpawnEntry::SpawnNpc {
                tile: Tile::new(1, 2, 0),
                npc: NpcPlacement::new(9),
            }
        );

        let value = json!({"action": "spawn_object", "tile": {"x": 1, "y": 2, "z": 0}, "id": 9});
        match decode_value(&value).unwrap() {
            SpawnEntry::SpawnObject { object, .. } => {
                assert_eq!(object.object_type, 10);
                assert_eq!(object.rotation, 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_normalizes_rotation() {
        let value = json!({"action": "spawn_object", "tile": {"x": 0, "y": 0, "z": 0}, "id": 1, "rotation": 7});
        match decode_value(&value).unwrap() {
            SpawnEntry::SpawnObject { object, .. } => assert_eq!(object.rotation, 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_action_and_missing_tile() {
        let unknown = json!({"action": "teleport", "tile": {"x": 0, "y": 0, "z": 0}});
        assert!(matches!(decode_value(&unknown), Err(SpawnError::MalformedElement(_))));

        let no_action = json!({"tile": {"x": 0, "y": 0, "z": 0}});
        assert!(decode_value(&no_action).is_err());

        let partial_tile = json!({"action": "delete_object", "tile": {"x": 0, "y": 0}});
        assert!(decode_value(&partial_tile).is_err());

        assert!(decode_value(&json!(42)).is_err());
    }

    #[test]
    fn test_decode_lenient_values() {
        let value = json!({
            "action": "Spawn_Npc",
            "tile": {"x": "4", "y": 5, "z": 0},
            "id": 3,
            "aggressive": "TRUE",
            "walk_radius": "oops",
            "direction": "se"
        });
        match decode_value(&value).unwrap() {
            SpawnEntry::SpawnNpc { tile, npc } => {
                assert_eq!(tile, Tile::new(4, 5, 0));
                assert!(npc.aggressive);
                assert_eq!(npc.walk_radius, 0);
                assert_eq!(npc.direction, Direction::SouthEast);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_array() {
        assert!(parse_array("  \n").unwrap().is_empty());
        assert_eq!(parse_array("[1, 2]").unwrap().len(), 2);
        assert!(parse_array("{}").unwrap_err().contains("expected array"));
        assert!(parse_array("[").is_err());
    }

    #[test]
    fn test_parse_array_tolerates_comments_and_trailing_commas() {
        let text = "[\n  // lumbridge\n  {\"a\": 1, /* inline */ \"b\": \"x // y,]\",},\n  # shell\n  2,\n]\n";
        let items = parse_array(text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["b"], "x // y,]");
        assert_eq!(items[1], 2);

        assert!(parse_array("// only a comment\n").unwrap().is_empty());
        assert!(parse_array("[1,,]").is_err());
    }

    #[test]
    fn test_parse_lenient_keeps_error_position() {
        let err = parse_lenient("{\n  // note\n  \"a\": ]\n}").unwrap_err();
        assert!(err.contains("line 3"), "{}", err);
    }

    #[test]
    fn test_decode_elements_skips_bad_items() {
        let items = parse_array(
            r#"[{"action": "delete_object", "tile": {"x": 1, "y": 1, "z": 0}}, "junk", {"action": "nope"}]"#,
        )
        .unwrap();
        assert_eq!(decode_elements(&items).len(), 1);
    }

    #[test]
    fn test_value_has_key() {
        let entry = SpawnEntry::DeleteObject { tile: Tile::new(1, 1, 0) };
        assert!(value_has_key(&to_value(&entry), &entry.key()));
        let other = SpawnEntry::DeleteObject { tile: Tile::new(1, 1, 1) };
        assert!(!value_has_key(&to_value(&other), &entry.key()));
        assert!(!value_has_key(&json!("junk"), &entry.key()));
    }
}
