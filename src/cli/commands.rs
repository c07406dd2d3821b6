//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list / at / search: inspect both spawn files
//! - set: insert or replace a record in spawns.json
//! - delete: remove whatever a click on a tile would select
//! - dynamic: edit the dynamic NPC list
//! - export: write spawns.json canonically to another path

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use spawnedit::domain::{DEFAULT_OBJECT_TYPE, Tile};

/// spawnedit - edit game spawn files without disturbing their formatting
#[derive(Parser, Debug)]
#[command(name = "spawnedit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every record in both files
    List {
        /// Only records on this plane
        #[arg(short = 'z', long)]
        plane: Option<i32>,
    },

    /// Show the record a click on a tile would select
    At {
        /// Tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        tile: Tile,
    },

    /// Search by name or id across all categories
    Search {
        /// Name fragment or id digits
        query: String,
    },

    /// Insert or replace a record in spawns.json
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },

    /// Delete the record a click on a tile would select
    Delete {
        /// Tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        tile: Tile,
    },

    /// Dynamic NPC list commands
    Dynamic {
        #[command(subcommand)]
        command: DynamicCommands,
    },

    /// Write spawns.json in canonical form to another path
    Export {
        /// Destination file
        output: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ObjectArgs {
    /// Tile as x,y[,z]
    #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
    pub tile: Tile,

    /// Object id
    #[arg(long)]
    pub id: i32,

    /// Object type
    #[arg(long = "type", default_value_t = DEFAULT_OBJECT_TYPE)]
    pub object_type: i32,

    /// Rotation, reduced modulo 4
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub rotation: i32,
}

#[derive(Args, Debug, Clone)]
pub struct NpcArgs {
    /// Tile as x,y[,z]
    #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
    pub tile: Tile,

    /// NPC id
    #[arg(long)]
    pub id: i32,

    /// Walk radius in tiles
    #[arg(short, long, default_value_t = 0)]
    pub walk_radius: i32,

    /// Spawn as aggressive
    #[arg(short, long)]
    pub aggressive: bool,

    /// Facing (NORTH, SE, south-west, ...)
    #[arg(short, long, default_value = "NORTH")]
    pub direction: String,
}

/// Record kinds for `set`
#[derive(Subcommand, Debug, Clone)]
pub enum SetCommands {
    /// spawn_object
    Object(ObjectArgs),

    /// spawn_over_object
    OverObject(ObjectArgs),

    /// spawn_npc
    Npc(NpcArgs),

    /// delete_object
    DeleteObject {
        /// Tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        tile: Tile,
    },
}

/// Dynamic NPC list subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DynamicCommands {
    /// Append an NPC
    Add {
        /// NPC id
        #[arg(long)]
        id: i32,

        /// Tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        tile: Tile,
    },

    /// Move (and optionally re-id) the NPC a click on a tile would select
    Move {
        /// Current tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        from: Tile,

        /// New tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        to: Tile,

        /// New NPC id
        #[arg(long)]
        id: Option<i32>,
    },

    /// Delete the NPC a click on a tile would select
    Delete {
        /// Tile as x,y[,z]
        #[arg(value_parser = parse_tile, allow_hyphen_values = true)]
        tile: Tile,
    },

    /// List every dynamic NPC
    List,
}

/// Parse `x,y` or `x,y,z`; a missing plane is 0.
pub fn parse_tile(s: &str) -> Result<Tile, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i32>().map_err(|e| format!("invalid coordinate '{}': {}", p.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        &[x, y] => Ok(Tile::new(x, y, 0)),
        &[x, y, z] => Ok(Tile::new(x, y, z)),
        _ => Err(format!("expected x,y or x,y,z, got '{}'", s)),
    }
}
