use eyre::{Context, Result, eyre};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Tile;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub paths: PathsConfig,
    pub regions: RegionBounds,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub spawns_json: PathBuf,
    pub dynamic_npcs_txt: PathBuf,
    pub objects_json: PathBuf,
    pub npcs_json: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            spawns_json: PathBuf::from("resources/spawns.json"),
            dynamic_npcs_txt: PathBuf::from("resources/unpackedSpawnslist.txt"),
            objects_json: PathBuf::from("resources/objects.json"),
            npcs_json: PathBuf::from("resources/npcs.json"),
        }
    }
}

/// Inclusive bounds on region coordinates the editor accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionBounds {
    pub rx_min: i32,
    pub rx_max: i32,
    pub ry_min: i32,
    pub ry_max: i32,
    pub tile_size: i32,
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self {
            rx_min: 1,
            rx_max: 98,
            ry_min: 12,
            ry_max: 162,
            tile_size: 64,
        }
    }
}

impl RegionBounds {
    /// Whether the region holding `tile` lies inside the bounds
    pub fn contains(&self, tile: Tile) -> bool {
        tile.region(self.tile_size)
            .is_some_and(|(rx, ry)| (self.rx_min..=self.rx_max).contains(&rx) && (self.ry_min..=self.ry_max).contains(&ry))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Written after "spawned by" in dynamic NPC comment lines
    pub signature: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            signature: "Xeon's Spawn Editor".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            paths: PathsConfig::default(),
            regions: RegionBounds::default(),
            editor: EditorConfig::default(),
        }
    }
}

/// Result of the config lookup. Messages are held here because the lookup
/// runs before logging is set up.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Candidate files that existed but failed to load
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Replay the lookup outcome through the logger.
    pub fn log(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        match &self.source {
            Some(path) => info!("Loaded config from: {}", path.display()),
            None => info!("No config file found, using defaults"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain: an explicit path must load;
    /// otherwise the first candidate file that loads wins, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok(LoadedConfig {
                config,
                source: Some(path.clone()),
                warnings: Vec::new(),
            });
        }

        let mut warnings = Vec::new();
        for candidate in Self::candidates().into_iter().filter(|p| p.exists()) {
            match Self::load_from_file(&candidate) {
                Ok(config) => {
                    return Ok(LoadedConfig {
                        config,
                        source: Some(candidate),
                        warnings,
                    });
                }
                Err(e) => warnings.push(format!("Failed to load config from {}: {:#}", candidate.display(), e)),
            }
        }

        Ok(LoadedConfig {
            config: Self::default(),
            source: None,
            warnings,
        })
    }

    /// `~/.config/<project>/<project>.yml`, then `./<project>.yml`
    fn candidates() -> Vec<PathBuf> {
        let project_name = env!("CARGO_PKG_NAME");
        let file_name = format!("{}.yml", project_name);
        dirs::config_dir()
            .map(|dir| dir.join(project_name).join(&file_name))
            .into_iter()
            .chain([PathBuf::from(&file_name)])
            .collect()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        if config.regions.tile_size <= 0 {
            return Err(eyre!("regions.tile_size must be positive, got {}", config.regions.tile_size));
        }
        Ok(config)
    }
}
