//! Name or id search across both collections.

use std::fmt;

use crate::domain::{DynamicEntry, Record, SpawnEntry, SpawnProject};
use crate::names::NameResolver;

/// Category a hit was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Object,
    Npc,
    Dynamic,
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HitKind::Object => "object",
            HitKind::Npc => "npc",
            HitKind::Dynamic => "dynamic",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: HitKind,
    pub record: Record,
    pub name: String,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (id, tile) = match &self.record {
            Record::Spawn(entry) => (entry.entity_id().unwrap_or_default(), entry.tile()),
            Record::Dynamic(entry) => (entry.npc.npc_id, entry.npc.tile),
        };
        write!(f, "[{}] {} - {}  @ {}", self.kind, id, self.name, tile)
    }
}

/// Parsed query: lowercase text and the digits it contains
struct Query {
    text: String,
    digits: String,
}

impl Query {
    fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_lowercase(),
            digits: raw.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.digits.is_empty()
    }

    fn matches(&self, name: &str, id: i32) -> bool {
        let name_hit = !self.text.is_empty() && name.to_lowercase().contains(&self.text);
        let id_hit = !self.digits.is_empty() && id.to_string().contains(&self.digits);
        name_hit || id_hit
    }
}

/// Search object spawns, then NPC spawns, then dynamic NPCs.
///
/// A record matches if its resolved name contains the query (ignoring case)
/// or its id contains the digits of the query. Unresolved names fall back to
/// the id.
pub fn search(
    query: &str,
    project: &SpawnProject,
    dynamics: &[DynamicEntry],
    objects: &dyn NameResolver,
    npcs: &dyn NameResolver,
) -> Vec<SearchHit> {
    let query = Query::new(query);
    if query.is_empty() {
        return Vec::new();
    }

    let name_of = |resolver: &dyn NameResolver, id: i32| resolver.resolve(id).unwrap_or_else(|| id.to_string());
    let mut hits = Vec::new();

    for (kind, resolver) in [(HitKind::Object, objects), (HitKind::Npc, npcs)] {
        for entry in project.iter() {
            let id = match (kind, entry) {
                (HitKind::Object, SpawnEntry::SpawnObject { object, .. })
                | (HitKind::Object, SpawnEntry::SpawnOverObject { object, .. }) => object.id,
                (HitKind::Npc, SpawnEntry::SpawnNpc { npc, .. }) => npc.id,
                _ => continue,
            };
            let name = name_of(resolver, id);
            if query.matches(&name, id) {
                hits.push(SearchHit {
                    kind,
                    record: Record::Spawn(*entry),
                    name,
                });
            }
        }
    }

    for entry in dynamics {
        let name = name_of(npcs, entry.npc.npc_id);
        if query.matches(&name, entry.npc.npc_id) {
            hits.push(SearchHit {
                kind: HitKind::Dynamic,
                record: Record::Dynamic(entry.clone()),
                name,
            });
        }
    }

    hits
}
