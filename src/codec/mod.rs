//! Record codecs
//!
//! Stateless decode/encode helpers used by the stores:
//! - json: elements of the `spawns.json` array
//! - script: comment + data lines of the dynamic NPC list

pub mod json;
pub mod script;
