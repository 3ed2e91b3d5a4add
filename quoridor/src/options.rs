use anyhow::{bail, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_FORBIDDEN_WALLS_CACHE_CAPACITY, DEFAULT_GRID_SIZE, DEFAULT_PATH_CACHE_CAPACITY,
    MAX_GRID_SIZE, MIN_GRID_SIZE, NUM_WALLS_PER_PLAYER,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameOptions {
    pub grid_size: usize,
    pub walls_per_player: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            walls_per_player: NUM_WALLS_PER_PLAYER,
        }
    }
}

impl Config for GameOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let grid_size = config
            .get("grid_size")
            .and_then(|v| v.as_usize())
            .unwrap_or(DEFAULT_GRID_SIZE);

        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            bail!(
                "grid_size must be within {}..={} but was {}",
                MIN_GRID_SIZE,
                MAX_GRID_SIZE,
                grid_size
            );
        }

        Ok(Self {
            grid_size,
            walls_per_player: config
                .get("walls_per_player")
                .and_then(|v| v.as_usize())
                .unwrap_or(NUM_WALLS_PER_PLAYER),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub path_cache_capacity: usize,
    pub forbidden_walls_cache_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            path_cache_capacity: DEFAULT_PATH_CACHE_CAPACITY,
            forbidden_walls_cache_capacity: DEFAULT_FORBIDDEN_WALLS_CACHE_CAPACITY,
        }
    }
}

impl Config for EngineOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        Ok(Self {
            path_cache_capacity: config
                .get("path_cache_capacity")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_PATH_CACHE_CAPACITY),
            forbidden_walls_cache_capacity: config
                .get("forbidden_walls_cache_capacity")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_FORBIDDEN_WALLS_CACHE_CAPACITY),
        })
    }
}
