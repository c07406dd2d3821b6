//! spawnedit - incremental, formatting-preserving editing of game spawn files
//!
//! Two backing files are supported: `spawns.json`, a JSON array of spawn
//! directives, and a dynamic NPC list of `"<id> - <x> <y> <z>"` lines with
//! optional `//` comments. Edits rewrite only the lines of the record that
//! changed, so hand formatting and comments elsewhere survive.

pub mod codec;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod names;
pub mod search;
pub mod storage;

pub use error::{Result, SpawnError};
