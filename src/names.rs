//! Id-to-name lookup for objects and NPCs.
//!
//! Name lists come either as a JSON array of `{"id": .., "name": ..}`
//! objects or as text lines `"<id> - <name>"`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;

use crate::codec::script::SEPARATOR;
use crate::error::{Result, SpawnError};

/// Resolves an entity id to a display name
pub trait NameResolver: Send + Sync {
    fn resolve(&self, id: i32) -> Option<String>;
}

impl<F> NameResolver for F
where
    F: Fn(i32) -> Option<String> + Send + Sync,
{
    fn resolve(&self, id: i32) -> Option<String> {
        self(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: HashMap<i32, String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    /// Load a name list. A missing file yields an empty index.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Name list not found: {}", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let is_json = matches!(text.trim_start().chars().next(), Some('[' | '{'))
            || path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let index = if is_json {
            Self::parse_json(&text, path)?
        } else {
            Self::parse_text(&text)
        };
        info!("Loaded {} names from {}", index.len(), path.display());
        Ok(index)
    }

    fn parse_json(text: &str, path: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Array(items) = root else {
            return Err(SpawnError::MalformedRoot {
                path: path.to_path_buf(),
                reason: "name list root is not an array".to_string(),
            });
        };

        let mut names = HashMap::new();
        for item in &items {
            let Some(obj) = item.as_object() else {
                continue;
            };
            let id = match obj.get("id") {
                Some(Value::Number(n)) => n.as_i64(),
                Some(Value::String(s)) => s.trim().parse().ok(),
                _ => None,
            };
            let Some(id) = id.and_then(|id| i32::try_from(id).ok()).filter(|id| *id >= 0) else {
                debug!("Skipping name entry without usable id: {}", item);
                continue;
            };
            let name = match obj.get("name") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            names.insert(id, name);
        }
        Ok(Self { names })
    }

    fn parse_text(text: &str) -> Self {
        let names = text
            .lines()
            .filter_map(|line| {
                let (id, name) = line.trim().split_once(SEPARATOR)?;
                Some((id.trim().parse().ok()?, name.trim().to_string()))
            })
            .collect();
        Self { names }
    }

    pub fn name_for(&self, id: i32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameResolver for NameIndex {
    fn resolve(&self, id: i32) -> Option<String> {
        self.name_for(id).map(str::to_string)
    }
}
